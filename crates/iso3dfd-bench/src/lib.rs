//! Benchmark profiles and utilities for the iso3dfd stencil engine.
//!
//! Provides pre-built [`RunConfig`] profiles for benchmarks and examples:
//!
//! - [`reference_profile`]: 64³ interior, centred impulse, 5 iterations
//! - [`stress_profile`]: 256³ interior with the layered-cube source
//! - [`compare_strategies`]: time several kernel strategies on one profile

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use indexmap::IndexMap;
use iso3dfd_engine::{PerfReport, RunConfig, RunError, Session, SourceSpec};
use iso3dfd_kernel::{BlockShape, KernelStrategy};

/// Build the reference profile: 64³ interior (262K points).
///
/// Centred unit impulse, 5 timed iterations after 2 warm-up steps,
/// verified with a 0.01 tolerance.
pub fn reference_profile() -> RunConfig {
    RunConfig {
        grid_sizes: [64; 3],
        iterations: 5,
        source: SourceSpec::Impulse { amplitude: 1.0 },
        tolerance: 0.01,
        ..RunConfig::default()
    }
}

/// Build the stress profile: 256³ interior (~16.8M points).
///
/// The classic iso3dfd setup: layered-cube source, 10 iterations,
/// blocked 32×8×64 kernel.
pub fn stress_profile() -> RunConfig {
    RunConfig::default()
}

/// Strategies compared by default: every traversal, two tile shapes.
pub fn default_strategies() -> Vec<KernelStrategy> {
    vec![
        KernelStrategy::Direct,
        KernelStrategy::PointerOffset,
        KernelStrategy::Blocked(BlockShape::default()),
        KernelStrategy::Blocked(BlockShape {
            n1: 64,
            n2: 4,
            n3: 16,
        }),
    ]
}

/// Run `base` once per strategy, without verification.
///
/// Returns reports keyed by the strategy's display name, in input order.
pub fn compare_strategies(
    base: &RunConfig,
    strategies: &[KernelStrategy],
) -> Result<IndexMap<String, PerfReport>, RunError> {
    let mut out = IndexMap::with_capacity(strategies.len());
    for &strategy in strategies {
        let config = RunConfig {
            strategy,
            verify: false,
            ..base.clone()
        };
        let report = Session::new(config)?.run()?;
        out.insert(strategy.to_string(), report.perf);
    }
    Ok(out)
}
