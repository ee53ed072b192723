//! Throughput metrics for a timed run.
//!
//! [`PerfReport`] turns wall-clock time, interior point count and
//! iteration count into points, floating-point operations and bytes
//! per second. Each point update costs `7H + 5` flops and moves 12
//! bytes (three `f32` streams: `prev`, `next`, `vel`).

use std::fmt;
use std::time::Duration;

/// Bytes streamed per point update.
pub const BYTES_PER_POINT: f64 = 12.0;

/// Floating-point operations per point update for half-length `h`.
pub fn flops_per_point(h: usize) -> f64 {
    7.0 * h as f64 + 5.0
}

/// Performance summary of a timed run.
///
/// Rates are in base units per second. Degenerate input (zero
/// iterations or zero elapsed time) yields zero rates rather than
/// infinities.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PerfReport {
    /// Total wall-clock time of the timed iterations.
    pub elapsed: Duration,
    /// Timed iterations.
    pub iterations: u64,
    /// Interior points updated per iteration.
    pub points: u64,
    /// Seconds per iteration.
    pub normalized_time: f64,
    /// Points per second.
    pub throughput: f64,
    /// Floating-point operations per second.
    pub flops: f64,
    /// Bytes per second.
    pub bytes: f64,
}

impl PerfReport {
    /// Compute rates for `iterations` updates of `points` points.
    pub fn compute(elapsed: Duration, points: u64, half_length: usize, iterations: u64) -> Self {
        let secs = elapsed.as_secs_f64();
        let mut report = Self {
            elapsed,
            iterations,
            points,
            ..Self::default()
        };
        if iterations == 0 || secs <= 0.0 {
            return report;
        }
        report.normalized_time = secs / iterations as f64;
        report.throughput = points as f64 / report.normalized_time;
        report.flops = flops_per_point(half_length) * report.throughput;
        report.bytes = BYTES_PER_POINT * report.throughput;
        report
    }

    /// Millions of points per second.
    pub fn mpts_per_sec(&self) -> f64 {
        self.throughput / 1e6
    }

    /// Billions of floating-point operations per second.
    pub fn gflops(&self) -> f64 {
        self.flops / 1e9
    }

    /// Billions of bytes per second.
    pub fn gbytes_per_sec(&self) -> f64 {
        self.bytes / 1e9
    }
}

impl fmt::Display for PerfReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--------------------------------------")?;
        writeln!(f, "time         : {:.6} secs", self.elapsed.as_secs_f64())?;
        writeln!(f, "throughput   : {:.3} Mpts/s", self.mpts_per_sec())?;
        writeln!(f, "flops        : {:.3} GFlops", self.gflops())?;
        writeln!(f, "bytes        : {:.3} GBytes/s", self.gbytes_per_sec())?;
        write!(f, "--------------------------------------")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rates_follow_point_counts() {
        // 1e6 points, 10 iterations in 2 s: 0.2 s per iteration.
        let r = PerfReport::compute(Duration::from_secs(2), 1_000_000, 8, 10);
        assert!((r.normalized_time - 0.2).abs() < 1e-12);
        assert!((r.throughput - 5e6).abs() < 1e-3);
        assert!((r.flops - 61.0 * 5e6).abs() < 1e-1);
        assert!((r.bytes - 12.0 * 5e6).abs() < 1e-2);
        assert!((r.mpts_per_sec() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn flops_per_point_for_half_length_eight() {
        assert_eq!(flops_per_point(8), 61.0);
    }

    #[test]
    fn zero_iterations_yield_zero_rates() {
        let r = PerfReport::compute(Duration::from_secs(1), 100, 8, 0);
        assert_eq!(r.throughput, 0.0);
        assert_eq!(r.flops, 0.0);
        assert_eq!(r.bytes, 0.0);
        assert_eq!(r.points, 100);
    }

    #[test]
    fn zero_elapsed_yields_zero_rates() {
        let r = PerfReport::compute(Duration::ZERO, 100, 8, 5);
        assert_eq!(r.throughput, 0.0);
        assert!(r.to_string().contains("0.000 Mpts/s"));
    }

    #[test]
    fn banner_lists_all_rates() {
        let r = PerfReport::compute(Duration::from_millis(500), 2_000_000, 8, 1);
        let s = r.to_string();
        assert!(s.contains("time         : 0.500000 secs"));
        assert!(s.contains("throughput   : 4.000 Mpts/s"));
        assert!(s.contains("GFlops"));
        assert!(s.contains("GBytes/s"));
    }
}
