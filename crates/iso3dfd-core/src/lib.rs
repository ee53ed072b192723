//! Core types for the iso3dfd stencil engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the grid geometry shared by every buffer ([`Dims3`], [`PaddedLayout`]),
//! the finite-difference [`CoefficientTable`], and the error types used
//! throughout the workspace.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod coeff;
pub mod error;
pub mod layout;

pub use coeff::{CoefficientTable, DEFAULT_DT, DEFAULT_DXYZ, DEFAULT_VELOCITY, HALF_LENGTH};
pub use error::{GridError, KernelError};
pub use layout::{Axis, Dims3, PaddedLayout};
