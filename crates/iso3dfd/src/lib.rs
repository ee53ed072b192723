//! iso3dfd: an 8th-order isotropic acoustic finite-difference stencil engine.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! iso3dfd sub-crates. For most users, adding `iso3dfd` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use iso3dfd::prelude::*;
//!
//! // A small grid with a centred impulse, checked against the reference.
//! let config = RunConfig {
//!     grid_sizes: [24, 20, 16],
//!     iterations: 4,
//!     warmup_iterations: 1,
//!     strategy: KernelStrategy::Blocked(BlockShape { n1: 16, n2: 4, n3: 8 }),
//!     source: SourceSpec::Impulse { amplitude: 1.0 },
//!     tolerance: 0.01,
//!     ..RunConfig::default()
//! };
//! let session = Session::new(config).unwrap();
//! let report = session.run().unwrap();
//! assert!(report.passed());
//! assert_eq!(report.perf.iterations, 4);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `iso3dfd-core` | Grid dimensions, padded layout, coefficients, errors |
//! | [`arena`] | `iso3dfd-arena` | `FieldBuffer`, ping-pong `WavefieldPair`, field statistics |
//! | [`kernel`] | `iso3dfd-kernel` | `StencilKernel` trait and the three traversals |
//! | [`engine`] | `iso3dfd-engine` | Iteration driver, reference engine, verification, sessions |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Grid geometry and stencil weights (`iso3dfd-core`).
///
/// Contains [`types::Dims3`], [`types::PaddedLayout`] and
/// [`types::CoefficientTable`], plus the shared error types.
pub use iso3dfd_core as types;

/// Field storage (`iso3dfd-arena`).
///
/// [`arena::FieldBuffer`] holds one padded field; [`arena::WavefieldPair`]
/// alternates the two wavefield buffers between steps.
pub use iso3dfd_arena as arena;

/// Stencil kernels (`iso3dfd-kernel`).
///
/// The [`kernel::StencilKernel`] trait and the strategies behind
/// [`kernel::KernelStrategy`].
pub use iso3dfd_kernel as kernel;

/// Time stepping, verification and benchmark sessions (`iso3dfd-engine`).
///
/// [`engine::Session`] runs a full benchmark from a [`engine::RunConfig`];
/// [`engine::IterationDriver`] and [`engine::ReferenceEngine`] are the
/// lower-level pieces.
pub use iso3dfd_engine as engine;

/// Common imports for typical iso3dfd usage.
///
/// ```rust
/// use iso3dfd::prelude::*;
/// ```
pub mod prelude {
    // Geometry
    pub use iso3dfd_core::{CoefficientTable, Dims3, PaddedLayout, HALF_LENGTH};

    // Storage
    pub use iso3dfd_arena::{FieldBuffer, FieldStats, Wavefield, WavefieldPair};

    // Kernels
    pub use iso3dfd_kernel::{BlockShape, Execution, KernelStrategy, StencilKernel};

    // Engine
    pub use iso3dfd_engine::{
        verify, InitialCondition, IterationDriver, PerfReport, ReferenceEngine, RunConfig,
        RunReport, Session, SourceSpec, VerifyReport,
    };

    // Errors
    pub use iso3dfd_core::{GridError, KernelError};
    pub use iso3dfd_arena::ArenaError;
    pub use iso3dfd_engine::{ConfigError, RunError};
}
