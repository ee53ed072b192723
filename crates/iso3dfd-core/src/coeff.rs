//! Finite-difference coefficients for the 8th-order Laplacian stencil.
//!
//! The base table is the 8th-order central-difference approximation of the
//! second derivative. Index 0 weighs the centre point; index `r` weighs
//! each of the six neighbours at distance `r` (±r along each axis). The
//! centre weight appears once per axis, hence the factor of three.

/// Stencil half-length: the largest neighbour offset read by the kernel.
/// Also the minimum halo width.
pub const HALF_LENGTH: usize = 8;

/// Default grid spacing (metres), identical on all axes.
pub const DEFAULT_DXYZ: f32 = 50.0;

/// Default time step (seconds).
pub const DEFAULT_DT: f32 = 0.002;

/// Default homogeneous medium velocity (metres per second).
pub const DEFAULT_VELOCITY: f32 = 1500.0;

const BASE: [f32; HALF_LENGTH + 1] = [
    -3.0548446,
    1.7777778,
    -3.1111111e-1,
    7.572087e-2,
    -1.76767677e-2,
    3.480962e-3,
    -5.180005e-4,
    5.074287e-5,
    -2.42812e-6,
];

/// Spacing-scaled stencil weights, immutable for the run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoefficientTable {
    c: [f32; HALF_LENGTH + 1],
}

impl CoefficientTable {
    /// Scale the base table by grid spacing `dxyz`.
    ///
    /// `c[0] = 3 * base[0] / dxyz²`, `c[r] = base[r] / dxyz²`.
    pub fn new(dxyz: f32) -> Self {
        let inv_d2 = 1.0 / (dxyz * dxyz);
        let mut c = BASE;
        c[0] = 3.0 * BASE[0] * inv_d2;
        for w in c.iter_mut().skip(1) {
            *w *= inv_d2;
        }
        Self { c }
    }

    /// Use `c` verbatim.
    pub fn from_raw(c: [f32; HALF_LENGTH + 1]) -> Self {
        Self { c }
    }

    /// The unscaled 8th-order base table.
    pub fn base() -> [f32; HALF_LENGTH + 1] {
        BASE
    }

    /// Weight for neighbour distance `r` (0 = centre).
    #[inline]
    pub fn get(&self, r: usize) -> f32 {
        self.c[r]
    }

    /// All weights, centre first.
    pub fn as_array(&self) -> &[f32; HALF_LENGTH + 1] {
        &self.c
    }
}

impl Default for CoefficientTable {
    fn default() -> Self {
        Self::new(DEFAULT_DXYZ)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centre_weight_scaled_three_times() {
        let t = CoefficientTable::new(50.0);
        let expected = 3.0 * -3.0548446f32 / 2500.0;
        assert!((t.get(0) - expected).abs() <= expected.abs() * 1e-6);
    }

    #[test]
    fn neighbour_weights_scaled_by_inverse_square() {
        let t = CoefficientTable::new(50.0);
        for r in 1..=HALF_LENGTH {
            let expected = CoefficientTable::base()[r] / 2500.0;
            assert!(
                (t.get(r) - expected).abs() <= expected.abs() * 1e-6,
                "r={r}: {} vs {expected}",
                t.get(r)
            );
        }
    }

    #[test]
    fn unit_spacing_keeps_neighbour_weights() {
        let t = CoefficientTable::new(1.0);
        assert_eq!(&t.as_array()[1..], &CoefficientTable::base()[1..]);
        assert_eq!(t.get(0), 3.0 * CoefficientTable::base()[0]);
    }

    #[test]
    fn default_uses_default_spacing() {
        assert_eq!(CoefficientTable::default(), CoefficientTable::new(DEFAULT_DXYZ));
    }
}
