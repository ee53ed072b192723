//! End-to-end benchmark run: initialize, warm up, time, verify.

use std::error::Error;
use std::fmt;
use std::time::Instant;

use iso3dfd_arena::{ArenaError, FieldBuffer, FieldStats, WavefieldPair};
use iso3dfd_core::{CoefficientTable, KernelError, PaddedLayout, HALF_LENGTH};
use tracing::{info, warn};

use crate::config::{ConfigError, RunConfig};
use crate::driver::{DriverError, IterationDriver};
use crate::init::InitialCondition;
use crate::metrics::PerfReport;
use crate::reference::ReferenceEngine;
use crate::verify::{verify, VerifyError, VerifyReport};

// ── RunError ───────────────────────────────────────────────────────

/// Errors that abort a [`Session::run`].
///
/// A verification mismatch is not among them; it is reported through
/// [`RunReport::verification`].
#[derive(Clone, Debug, PartialEq)]
pub enum RunError {
    /// The configuration failed validation.
    Config(ConfigError),
    /// Buffer allocation or initialization failed.
    Arena(ArenaError),
    /// A kernel step was rejected.
    Kernel(KernelError),
    /// The comparison could not be performed.
    Verify(VerifyError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Arena(e) => write!(f, "arena: {e}"),
            Self::Kernel(e) => write!(f, "kernel: {e}"),
            Self::Verify(e) => write!(f, "verify: {e}"),
        }
    }
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Arena(e) => Some(e),
            Self::Kernel(e) => Some(e),
            Self::Verify(e) => Some(e),
        }
    }
}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<ArenaError> for RunError {
    fn from(e: ArenaError) -> Self {
        Self::Arena(e)
    }
}

impl From<KernelError> for RunError {
    fn from(e: KernelError) -> Self {
        Self::Kernel(e)
    }
}

impl From<VerifyError> for RunError {
    fn from(e: VerifyError) -> Self {
        Self::Verify(e)
    }
}

impl From<DriverError> for RunError {
    fn from(e: DriverError) -> Self {
        match e {
            DriverError::Arena(e) => Self::Arena(e),
            DriverError::Kernel(e) => Self::Kernel(e),
        }
    }
}

// ── RunReport ──────────────────────────────────────────────────────

/// Everything a run measured.
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    /// Timing of the timed iterations.
    pub perf: PerfReport,
    /// Statistics of `prev` right after initialization.
    pub initial_stats: FieldStats,
    /// Statistics of the current field after the last step.
    pub final_stats: FieldStats,
    /// Bytes held by the three field buffers.
    pub memory_bytes: usize,
    /// Comparison against the reference engine, if requested.
    pub verification: Option<VerifyReport>,
}

impl RunReport {
    /// `true` unless verification ran and found a mismatch.
    pub fn passed(&self) -> bool {
        self.verification.as_ref().is_none_or(|v| !v.has_error)
    }
}

// ── Session ────────────────────────────────────────────────────────

/// A validated run configuration ready to execute.
#[derive(Clone, Debug)]
pub struct Session {
    config: RunConfig,
    layout: PaddedLayout,
    coeff: CoefficientTable,
}

impl Session {
    /// Validate `config`. Nothing is allocated until [`run`](Self::run).
    pub fn new(config: RunConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let layout = config.layout()?;
        let coeff = CoefficientTable::new(config.dxyz);
        Ok(Self {
            config,
            layout,
            coeff,
        })
    }

    /// The validated configuration.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Buffer layout of the run.
    pub fn layout(&self) -> &PaddedLayout {
        &self.layout
    }

    /// Bytes held by the three field buffers.
    pub fn memory_bytes(&self) -> usize {
        3 * self.layout.bytes()
    }

    /// Execute the run.
    pub fn run(&self) -> Result<RunReport, RunError> {
        let cfg = &self.config;
        let init = InitialCondition::from_config(cfg);
        let dims = self.layout.dims();

        let mut prev = FieldBuffer::zeroed(self.layout)?;
        let mut next = FieldBuffer::zeroed(self.layout)?;
        let mut vel = FieldBuffer::zeroed(self.layout)?;
        init.apply(&mut prev, &mut next, &mut vel)?;

        let initial_stats = prev.stats();
        let memory_bytes = self.memory_bytes();
        info!("Grid Sizes: {} {} {}", dims.n1(), dims.n2(), dims.n3());
        info!("Memory Usage: {} MB", memory_bytes / (1024 * 1024));
        info!("Initial {}", initial_stats);

        let mut driver = IterationDriver::new(
            WavefieldPair::new(prev, next)?,
            vel,
            self.coeff,
            cfg.strategy,
            cfg.execution,
        )?;
        info!("Using {} kernel ({:?})", cfg.strategy, cfg.execution);

        driver.run(cfg.warmup_iterations)?;

        let t0 = Instant::now();
        let wavefield = driver.run(cfg.iterations)?;
        let elapsed = t0.elapsed();

        let perf = PerfReport::compute(elapsed, dims.point_count(), HALF_LENGTH, cfg.iterations);
        info!("\n{}", perf);

        let current = driver.read(wavefield.current)?;
        let final_stats = current.stats();
        info!("Final {}", final_stats);

        let verification = if cfg.verify {
            info!("Running reference version for result comparison");
            let mut reference = ReferenceEngine::new(self.layout, self.coeff, &init)?;
            reference.run(cfg.total_iterations()?);
            let report = verify(
                current.as_slice(),
                reference.current(),
                dims,
                self.layout.halo(),
                cfg.tolerance,
            )?;
            if report.has_error {
                warn!("error (Euclidean norm): {}", report.l2_norm);
                warn!("Final wavefields from optimized and reference runs are not equivalent: Fail");
            } else {
                info!("Final wavefields from optimized and reference runs are equivalent: Success");
            }
            Some(report)
        } else {
            None
        };

        Ok(RunReport {
            perf,
            initial_stats,
            final_stats,
            memory_bytes,
            verification,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::SourceSpec;
    use iso3dfd_kernel::KernelStrategy;

    fn small(strategy: KernelStrategy) -> RunConfig {
        RunConfig {
            grid_sizes: [20, 20, 14],
            iterations: 3,
            warmup_iterations: 1,
            strategy,
            ..RunConfig::default()
        }
    }

    #[test]
    fn invalid_config_rejected_before_allocation() {
        let cfg = RunConfig {
            grid_sizes: [0, 4, 4],
            ..RunConfig::default()
        };
        assert!(matches!(Session::new(cfg), Err(ConfigError::Grid(_))));
    }

    #[test]
    fn overflowing_iteration_total_rejected_before_allocation() {
        let cfg = RunConfig {
            warmup_iterations: u64::MAX,
            iterations: 2,
            ..small(KernelStrategy::Direct)
        };
        assert!(matches!(
            Session::new(cfg),
            Err(ConfigError::IterationOverflow { .. })
        ));
    }

    #[test]
    fn memory_is_three_buffers() {
        let s = Session::new(small(KernelStrategy::Direct)).unwrap();
        assert_eq!(s.memory_bytes(), 3 * 4 * 36 * 36 * 30);
    }

    #[test]
    fn layered_run_verifies() {
        let report = Session::new(small(KernelStrategy::default()))
            .unwrap()
            .run()
            .unwrap();
        assert!(report.passed(), "{:?}", report.verification);
        assert_eq!(report.initial_stats.max, 1e4);
        assert_eq!(report.perf.iterations, 3);
        assert_eq!(report.perf.points, 20 * 20 * 14);
        assert!(report.final_stats.norm2 > 0.0);
    }

    #[test]
    fn verification_can_be_skipped() {
        let cfg = RunConfig {
            verify: false,
            source: SourceSpec::Impulse { amplitude: 1.0 },
            ..small(KernelStrategy::PointerOffset)
        };
        let report = Session::new(cfg).unwrap().run().unwrap();
        assert!(report.verification.is_none());
        assert!(report.passed());
    }

    #[test]
    fn run_error_flattens_driver_error() {
        let e = RunError::from(DriverError::Kernel(KernelError::InvalidBlockShape {
            shape: [0, 1, 1],
        }));
        assert!(matches!(e, RunError::Kernel(_)));
        assert!(e.source().is_some());
    }
}
