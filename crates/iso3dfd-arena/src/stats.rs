//! Whole-field summary statistics.

use std::fmt;

/// Min, max, norms and sum of a field.
///
/// Norms and the sum accumulate in `f64` so that large fields with
/// values spanning many decades (the layered source reaches `1e4`) do
/// not lose the small shells to rounding.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FieldStats {
    /// Smallest element.
    pub min: f32,
    /// Largest element.
    pub max: f32,
    /// Sum of absolute values.
    pub norm1: f64,
    /// Euclidean norm.
    pub norm2: f64,
    /// Largest absolute value.
    pub norm_inf: f32,
    /// Sum of values.
    pub sum: f64,
}

impl FieldStats {
    /// Compute statistics over `values`. An empty slice yields all zeros.
    pub fn of(values: &[f32]) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        let mut s = Self {
            min: f32::INFINITY,
            max: f32::NEG_INFINITY,
            ..Self::default()
        };
        let mut sq = 0.0f64;
        for &v in values {
            s.min = s.min.min(v);
            s.max = s.max.max(v);
            let a = v.abs();
            s.norm_inf = s.norm_inf.max(a);
            s.norm1 += a as f64;
            sq += (v as f64) * (v as f64);
            s.sum += v as f64;
        }
        s.norm2 = sq.sqrt();
        s
    }
}

impl fmt::Display for FieldStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "min, max, 1-norm, 2-norm, inf-norm, sum: {}, {}, {}, {}, {}, {}",
            self.min, self.max, self.norm1, self.norm2, self.norm_inf, self.sum
        )
    }
}
