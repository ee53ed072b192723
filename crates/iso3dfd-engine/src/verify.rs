//! Interior comparison of an optimized result against the reference.

use std::error::Error;
use std::fmt;

use iso3dfd_core::{Axis, Dims3, GridError, PaddedLayout};
use tracing::{debug, warn};

/// Mismatches recorded and logged at `warn`; the rest are counted and
/// logged at `debug`.
pub const MAX_RECORDED_MISMATCHES: usize = 64;

/// One interior point whose difference exceeds the tolerance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mismatch {
    /// Padded index along axis 1.
    pub i: usize,
    /// Padded index along axis 2.
    pub j: usize,
    /// Padded index along axis 3.
    pub k: usize,
    /// Value from the optimized run.
    pub computed: f32,
    /// Value from the reference run.
    pub expected: f32,
    /// `|computed - expected|`.
    pub abs_diff: f32,
}

/// Outcome of [`verify`].
///
/// A failed comparison is data, not an error: callers decide what to do
/// with `has_error`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VerifyReport {
    /// Whether any interior point exceeded the tolerance.
    pub has_error: bool,
    /// Euclidean norm of all interior differences.
    pub l2_norm: f64,
    /// Interior points compared.
    pub compared: u64,
    /// Points that exceeded the tolerance.
    pub mismatch_count: u64,
    /// The first [`MAX_RECORDED_MISMATCHES`] mismatches in memory order.
    pub mismatches: Vec<Mismatch>,
}

/// Errors that prevent a comparison from running.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerifyError {
    /// The padded layout could not be formed.
    Grid(GridError),
    /// A slice does not cover the padded layout.
    LengthMismatch {
        /// `"optimized"` or `"reference"`.
        buffer: &'static str,
        /// Padded layout length.
        expected: usize,
        /// Slice length.
        actual: usize,
    },
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::LengthMismatch {
                buffer,
                expected,
                actual,
            } => write!(
                f,
                "{buffer} field has {actual} elements, padded layout requires {expected}"
            ),
        }
    }
}

impl Error for VerifyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::LengthMismatch { .. } => None,
        }
    }
}

impl From<GridError> for VerifyError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

/// Compare the interior `[halo, halo + n)` of two padded fields.
///
/// Every point with `|optimized - reference| > tolerance` counts as a
/// mismatch and is logged: the first [`MAX_RECORDED_MISMATCHES`] at
/// `warn`, the rest at `debug`.
/// Halo cells are ignored.
pub fn verify(
    optimized: &[f32],
    reference: &[f32],
    dims: Dims3,
    halo: usize,
    tolerance: f32,
) -> Result<VerifyReport, VerifyError> {
    let layout = PaddedLayout::new(dims, halo)?;
    for (buffer, len) in [("optimized", optimized.len()), ("reference", reference.len())] {
        if len != layout.len() {
            return Err(VerifyError::LengthMismatch {
                buffer,
                expected: layout.len(),
                actual: len,
            });
        }
    }

    let mut report = VerifyReport::default();
    let mut sq = 0.0f64;
    for k in layout.interior(Axis::Z) {
        for j in layout.interior(Axis::Y) {
            for i in layout.interior(Axis::X) {
                let o = layout.index(i, j, k);
                let (computed, expected) = (optimized[o], reference[o]);
                let abs_diff = (expected - computed).abs();
                sq += f64::from(abs_diff) * f64::from(abs_diff);
                report.compared += 1;
                if abs_diff > tolerance || abs_diff.is_nan() {
                    report.has_error = true;
                    report.mismatch_count += 1;
                    if report.mismatches.len() < MAX_RECORDED_MISMATCHES {
                        warn!(
                            "ERROR: {}, {}, {}   {} instead of {}  (|e|={})",
                            i, j, k, computed, expected, abs_diff
                        );
                        report.mismatches.push(Mismatch {
                            i,
                            j,
                            k,
                            computed,
                            expected,
                            abs_diff,
                        });
                    } else {
                        debug!(
                            "ERROR: {}, {}, {}   {} instead of {}  (|e|={})",
                            i, j, k, computed, expected, abs_diff
                        );
                    }
                }
            }
        }
    }
    report.l2_norm = sq.sqrt();
    if report.mismatch_count > report.mismatches.len() as u64 {
        warn!(
            "{} further mismatches logged at debug level",
            report.mismatch_count - report.mismatches.len() as u64
        );
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (PaddedLayout, Vec<f32>) {
        let dims = Dims3::new(3, 4, 5).unwrap();
        let layout = PaddedLayout::new(dims, 2).unwrap();
        let data = (0..layout.len()).map(|n| n as f32 * 0.01).collect();
        (layout, data)
    }

    #[test]
    fn identical_fields_pass() {
        let (l, a) = setup();
        let r = verify(&a, &a, l.dims(), 2, 0.0).unwrap();
        assert!(!r.has_error);
        assert_eq!(r.l2_norm, 0.0);
        assert_eq!(r.compared, 60);
        assert!(r.mismatches.is_empty());
    }

    #[test]
    fn halo_differences_are_ignored() {
        let (l, a) = setup();
        let mut b = a.clone();
        b[0] += 100.0;
        b[l.len() - 1] -= 100.0;
        let r = verify(&a, &b, l.dims(), 2, 0.01).unwrap();
        assert!(!r.has_error);
        assert_eq!(r.l2_norm, 0.0);
    }

    #[test]
    fn interior_difference_is_reported_with_coordinates() {
        let (l, a) = setup();
        let mut b = a.clone();
        let o = l.index(3, 4, 5);
        b[o] += 0.5;
        let r = verify(&a, &b, l.dims(), 2, 0.1).unwrap();
        assert!(r.has_error);
        assert_eq!(r.mismatch_count, 1);
        let m = r.mismatches[0];
        assert_eq!((m.i, m.j, m.k), (3, 4, 5));
        assert_eq!(m.computed, a[o]);
        assert_eq!(m.expected, b[o]);
        assert!((r.l2_norm - 0.5).abs() < 1e-6);
    }

    #[test]
    fn within_tolerance_contributes_to_norm_only() {
        let (l, a) = setup();
        let mut b = a.clone();
        b[l.index(2, 2, 2)] += 0.25;
        b[l.index(4, 5, 6)] -= 0.25;
        let r = verify(&a, &b, l.dims(), 2, 0.5).unwrap();
        assert!(!r.has_error);
        assert!((r.l2_norm - (0.125f64).sqrt()).abs() < 1e-6);
    }

    #[test]
    fn nan_is_a_mismatch() {
        let (l, a) = setup();
        let mut b = a.clone();
        b[l.index(2, 3, 4)] = f32::NAN;
        let r = verify(&a, &b, l.dims(), 2, 1.0).unwrap();
        assert!(r.has_error);
    }

    #[test]
    fn recorded_mismatches_are_capped() {
        let l = PaddedLayout::new(Dims3::cube(6).unwrap(), 1).unwrap();
        let a = vec![0.0f32; l.len()];
        let b = vec![1.0f32; l.len()];
        let r = verify(&a, &b, l.dims(), 1, 0.5).unwrap();
        assert_eq!(r.mismatch_count, 216);
        assert_eq!(r.mismatches.len(), MAX_RECORDED_MISMATCHES);
        let first = r.mismatches[0];
        assert_eq!((first.i, first.j, first.k), (1, 1, 1));
        assert!((r.l2_norm - 216f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn wrong_length_rejected() {
        let (l, a) = setup();
        match verify(&a, &a[1..], l.dims(), 2, 0.1) {
            Err(VerifyError::LengthMismatch {
                buffer: "reference",
                ..
            }) => {}
            other => panic!("expected LengthMismatch, got {other:?}"),
        }
    }
}
