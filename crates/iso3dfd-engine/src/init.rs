//! Initial wavefield and velocity model.
//!
//! Both wavefield buffers start at zero everywhere (so `u(-1) = u(0)`
//! outside the source), the velocity buffer holds `v² · dt²` folded into
//! a single factor, and a [`SourceSpec`] seeds the disturbance into `prev`.

use iso3dfd_arena::{ArenaError, FieldBuffer};
use iso3dfd_core::PaddedLayout;

use crate::config::RunConfig;

/// Initial disturbance written into the `prev` buffer.
///
/// Coordinates are interior coordinates: `(0, 0, 0)` is the first point
/// inside the halo.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SourceSpec {
    /// Quiescent field.
    None,
    /// A single value at the interior centre `(n1/2, n2/2, n3/2)`.
    Impulse {
        /// Value at the centre point.
        amplitude: f32,
    },
    /// A single value at an interior point.
    Point {
        /// Interior index along axis 1.
        i: usize,
        /// Interior index along axis 2.
        j: usize,
        /// Interior index along axis 3.
        k: usize,
        /// Value at the point.
        amplitude: f32,
    },
    /// Nested cubes centred on `(e1/4, e2/4, e3/2)` in padded coordinates,
    /// where `e` is the padded extent.
    ///
    /// For `s = 5, 4, …, 0` the box `[c - s, c + s)` on every axis is set
    /// to `10^(5 - s)`, innermost last. The `s = 0` box is empty, so the
    /// 2×2×2 core holds `1e4`. Boxes are clipped to the interior, so on
    /// grids narrower than about `4H` the inner shells may be cut off.
    LayeredCube,
}

/// Everything needed to reproduce the state at `t = 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InitialCondition {
    /// Medium velocity (m/s).
    pub velocity: f32,
    /// Time step (s).
    pub dt: f32,
    /// Disturbance.
    pub source: SourceSpec,
}

impl InitialCondition {
    /// Take the physical parameters and source from a run configuration.
    pub fn from_config(config: &RunConfig) -> Self {
        Self {
            velocity: config.velocity,
            dt: config.dt,
            source: config.source,
        }
    }

    /// The folded velocity factor `v² · dt²` stored in every cell of `vel`.
    pub fn velocity_factor(&self) -> f32 {
        self.velocity * self.velocity * (self.dt * self.dt)
    }

    /// Initialize all three buffers in place.
    ///
    /// Returns `Err(ArenaError::LayoutMismatch)` if the buffers do not
    /// share a layout, or `Err(ArenaError::BoxOutOfBounds)` for a point
    /// source outside the interior.
    pub fn apply(
        &self,
        prev: &mut FieldBuffer,
        next: &mut FieldBuffer,
        vel: &mut FieldBuffer,
    ) -> Result<(), ArenaError> {
        let layout = *prev.layout();
        for other in [next.layout(), vel.layout()] {
            if *other != layout {
                return Err(ArenaError::LayoutMismatch {
                    expected: layout,
                    actual: *other,
                });
            }
        }
        prev.fill(0.0);
        next.fill(0.0);
        vel.fill(self.velocity_factor());
        self.seed(prev, &layout)
    }

    fn seed(&self, prev: &mut FieldBuffer, layout: &PaddedLayout) -> Result<(), ArenaError> {
        let h = layout.halo();
        let n = layout.dims().as_array();
        match self.source {
            SourceSpec::None => Ok(()),
            SourceSpec::Impulse { amplitude } => {
                prev.set(h + n[0] / 2, h + n[1] / 2, h + n[2] / 2, amplitude);
                Ok(())
            }
            SourceSpec::Point { i, j, k, amplitude } => {
                let p = [i, j, k];
                if (0..3).any(|a| p[a] >= n[a]) {
                    return Err(ArenaError::BoxOutOfBounds {
                        lo: [h + i, h + j, h + k],
                        hi: [h + i + 1, h + j + 1, h + k + 1],
                        extent: layout.extent(),
                    });
                }
                prev.set(h + i, h + j, h + k, amplitude);
                Ok(())
            }
            SourceSpec::LayeredCube => {
                let e = layout.extent();
                let c = [e[0] / 4, e[1] / 4, e[2] / 2];
                let mut value = 1.0f32;
                for s in (0..=5usize).rev() {
                    let lo: [usize; 3] = std::array::from_fn(|a| c[a].saturating_sub(s).max(h));
                    let hi: [usize; 3] =
                        std::array::from_fn(|a| (c[a] + s).min(h + n[a]).max(lo[a]));
                    prev.fill_box(lo, hi, value)?;
                    value *= 10.0;
                }
                Ok(())
            }
        }
    }
}
