//! Stencil kernels for the iso3dfd engine.
//!
//! A [`StencilKernel`] performs one leapfrog step of the 8th-order
//! isotropic acoustic wave equation over a [`StencilContext`]. Three
//! traversals are provided, selected by an explicit [`KernelStrategy`]:
//!
//! - [`DirectKernel`]: indexed access, the canonical summation order
//! - [`PointerOffsetKernel`]: linear offsets with precomputed strides,
//!   bit-identical to `Direct`
//! - [`BlockedKernel`]: `(i, j)` tiling with a rolling z window
//!
//! All three split the interior into z-slabs and run them through
//! [`dispatch::for_each_slab`], in parallel on the rayon pool or serially
//! per [`Execution`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod blocked;
pub mod context;
pub mod direct;
pub mod dispatch;
pub mod kernel;
pub mod pointer_offset;

pub use blocked::BlockedKernel;
pub use context::{Inputs, StencilContext};
pub use direct::DirectKernel;
pub use dispatch::Execution;
pub use kernel::{BlockShape, KernelStrategy, StencilKernel};
pub use pointer_offset::PointerOffsetKernel;
