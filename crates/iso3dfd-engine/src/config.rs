//! Run configuration, validation, and error types.
//!
//! [`RunConfig`] is the input for constructing a [`Session`](crate::Session).
//! [`validate()`](RunConfig::validate) checks every structural invariant
//! before any buffer is allocated.

use std::error::Error;
use std::fmt;

use iso3dfd_core::{
    Dims3, GridError, KernelError, PaddedLayout, DEFAULT_DT, DEFAULT_DXYZ, DEFAULT_VELOCITY,
    HALF_LENGTH,
};
use iso3dfd_kernel::{Execution, KernelStrategy};

use crate::init::SourceSpec;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`RunConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Grid extents or halo are invalid.
    Grid(GridError),
    /// Kernel strategy parameters are invalid.
    Kernel(KernelError),
    /// `dxyz` is NaN, infinite, zero, or negative.
    InvalidSpacing {
        /// The invalid value.
        value: f32,
    },
    /// `dt` is NaN, infinite, zero, or negative.
    InvalidTimeStep {
        /// The invalid value.
        value: f32,
    },
    /// `velocity` is NaN, infinite, zero, or negative.
    InvalidVelocity {
        /// The invalid value.
        value: f32,
    },
    /// `tolerance` is NaN, infinite, or negative.
    InvalidTolerance {
        /// The invalid value.
        value: f32,
    },
    /// Warm-up plus timed iterations does not fit in `u64`.
    IterationOverflow {
        /// Configured warm-up iterations.
        warmup: u64,
        /// Configured timed iterations.
        iterations: u64,
    },
    /// A point source lies outside the interior.
    SourceOutOfBounds {
        /// Interior coordinate of the source.
        point: [usize; 3],
        /// Interior extents.
        dims: [usize; 3],
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::Kernel(e) => write!(f, "kernel: {e}"),
            Self::InvalidSpacing { value } => {
                write!(f, "dxyz must be finite and positive, got {value}")
            }
            Self::InvalidTimeStep { value } => {
                write!(f, "dt must be finite and positive, got {value}")
            }
            Self::InvalidVelocity { value } => {
                write!(f, "velocity must be finite and positive, got {value}")
            }
            Self::InvalidTolerance { value } => {
                write!(f, "tolerance must be finite and >= 0, got {value}")
            }
            Self::IterationOverflow { warmup, iterations } => write!(
                f,
                "warm-up ({warmup}) plus timed ({iterations}) iterations overflows u64"
            ),
            Self::SourceOutOfBounds { point, dims } => write!(
                f,
                "source at {point:?} lies outside interior {}x{}x{}",
                dims[0], dims[1], dims[2]
            ),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::Kernel(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<KernelError> for ConfigError {
    fn from(e: KernelError) -> Self {
        Self::Kernel(e)
    }
}

// ── RunConfig ──────────────────────────────────────────────────────

/// Complete configuration for one benchmark run.
///
/// Defaults reproduce the classic iso3dfd setup: a 256³ interior, the
/// layered-cube source, ten timed iterations after two warm-up steps,
/// and verification against the reference engine.
#[derive(Clone, Debug, PartialEq)]
pub struct RunConfig {
    /// Interior extents `[n1, n2, n3]`. Default: `[256, 256, 256]`.
    pub grid_sizes: [usize; 3],
    /// Halo width. Default and minimum: 8.
    pub halo: usize,
    /// Timed iterations. Default: 10.
    pub iterations: u64,
    /// Untimed iterations before the timed run. Default: 2.
    pub warmup_iterations: u64,
    /// Kernel traversal. Default: blocked 32×8×64.
    pub strategy: KernelStrategy,
    /// Parallel or serial slab dispatch. Default: parallel.
    pub execution: Execution,
    /// Grid spacing in metres. Default: 50.
    pub dxyz: f32,
    /// Time step in seconds. Default: 0.002.
    pub dt: f32,
    /// Homogeneous medium velocity in m/s. Default: 1500.
    pub velocity: f32,
    /// Initial disturbance. Default: layered cube.
    pub source: SourceSpec,
    /// Largest accepted per-point difference in verification. Default: 0.1.
    pub tolerance: f32,
    /// Run the reference engine and compare. Default: true.
    pub verify: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            grid_sizes: [256; 3],
            halo: HALF_LENGTH,
            iterations: 10,
            warmup_iterations: 2,
            strategy: KernelStrategy::default(),
            execution: Execution::Parallel,
            dxyz: DEFAULT_DXYZ,
            dt: DEFAULT_DT,
            velocity: DEFAULT_VELOCITY,
            source: SourceSpec::LayeredCube,
            tolerance: 0.1,
            verify: true,
        }
    }
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

impl RunConfig {
    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Geometry: non-zero extents, stencil-wide halo, no overflow.
        let layout = self.layout()?;
        // 2. Strategy parameters.
        if let KernelStrategy::Blocked(shape) = self.strategy {
            shape.validate()?;
        }
        // 3. Physical parameters.
        if !positive(self.dxyz) {
            return Err(ConfigError::InvalidSpacing { value: self.dxyz });
        }
        if !positive(self.dt) {
            return Err(ConfigError::InvalidTimeStep { value: self.dt });
        }
        if !positive(self.velocity) {
            return Err(ConfigError::InvalidVelocity {
                value: self.velocity,
            });
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ConfigError::InvalidTolerance {
                value: self.tolerance,
            });
        }
        // 4. Iteration budget: the reference run covers warm-up plus timed.
        self.total_iterations()?;
        // 5. Source placement.
        if let SourceSpec::Point { i, j, k, .. } = self.source {
            let dims = layout.dims().as_array();
            if i >= dims[0] || j >= dims[1] || k >= dims[2] {
                return Err(ConfigError::SourceOutOfBounds {
                    point: [i, j, k],
                    dims,
                });
            }
        }
        Ok(())
    }

    /// Interior extents.
    pub fn dims(&self) -> Result<Dims3, ConfigError> {
        Ok(Dims3::try_from(self.grid_sizes)?)
    }

    /// Padded layout shared by every buffer of the run.
    pub fn layout(&self) -> Result<PaddedLayout, ConfigError> {
        Ok(PaddedLayout::for_stencil(self.dims()?, self.halo)?)
    }

    /// Total iterations the wavefield advances: warm-up plus timed.
    ///
    /// Returns `Err(ConfigError::IterationOverflow)` if the sum does not
    /// fit in `u64`.
    pub fn total_iterations(&self) -> Result<u64, ConfigError> {
        self.warmup_iterations
            .checked_add(self.iterations)
            .ok_or(ConfigError::IterationOverflow {
                warmup: self.warmup_iterations,
                iterations: self.iterations,
            })
    }
}
