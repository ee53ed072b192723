//! Error types for the iso3dfd stencil engine.
//!
//! Organized by subsystem: grid geometry (rejected before any buffer is
//! allocated) and kernel execution (rejected before the first point is
//! updated). Neither class is recoverable mid-step.

use std::error::Error;
use std::fmt;

use crate::layout::Axis;

/// Errors from constructing grid geometry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// An interior extent was zero.
    ZeroExtent {
        /// The offending axis.
        axis: Axis,
    },
    /// The halo is narrower than the stencil half-length, so neighbour
    /// reads near the domain edge would leave the allocation.
    HaloTooNarrow {
        /// The configured halo width.
        halo: usize,
        /// The minimum width the stencil requires.
        required: usize,
    },
    /// The padded element count does not fit in `usize`.
    SizeOverflow {
        /// Interior extents that overflowed.
        dims: [usize; 3],
        /// The configured halo width.
        halo: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroExtent { axis } => write!(f, "interior extent along {axis} is zero"),
            Self::HaloTooNarrow { halo, required } => {
                write!(f, "halo width {halo} is narrower than stencil half-length {required}")
            }
            Self::SizeOverflow { dims, halo } => write!(
                f,
                "padded grid {}x{}x{} with halo {halo} overflows usize",
                dims[0], dims[1], dims[2]
            ),
        }
    }
}

impl Error for GridError {}

/// Errors from a single kernel step.
///
/// Returned by `StencilKernel::apply()` and propagated unchanged by the
/// iteration driver. All variants are detected before any point is written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KernelError {
    /// A buffer slice does not cover the padded layout exactly.
    LengthMismatch {
        /// Which buffer was wrong (`"prev"`, `"next"` or `"vel"`).
        buffer: &'static str,
        /// Expected element count (`layout.len()`).
        expected: usize,
        /// Actual slice length.
        actual: usize,
    },
    /// The layout halo cannot hold the stencil's neighbour reads.
    HaloTooNarrow {
        /// The layout's halo width.
        halo: usize,
        /// The stencil half-length.
        required: usize,
    },
    /// A blocked traversal was configured with a zero block extent.
    InvalidBlockShape {
        /// The rejected block extents `(n1, n2, n3)`.
        shape: [usize; 3],
    },
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch {
                buffer,
                expected,
                actual,
            } => write!(
                f,
                "buffer '{buffer}' has {actual} elements, layout requires {expected}"
            ),
            Self::HaloTooNarrow { halo, required } => {
                write!(f, "halo width {halo} cannot hold stencil half-length {required}")
            }
            Self::InvalidBlockShape { shape } => write!(
                f,
                "block shape {}x{}x{} has a zero extent",
                shape[0], shape[1], shape[2]
            ),
        }
    }
}

impl Error for KernelError {}
