//! Indexed-access stencil, the canonical form of the update.
//!
//! For every interior point:
//! ```text
//! value = c[0] * prev(i,j,k)
//! value += c[r] * (prev(i-r,j,k) + prev(i+r,j,k)
//!                + prev(i,j-r,k) + prev(i,j+r,k)
//!                + prev(i,j,k-r) + prev(i,j,k+r))     for r in 1..=8
//! next(i,j,k) = 2 * prev(i,j,k) - next(i,j,k) + value * vel(i,j,k)
//! ```

use iso3dfd_core::{Axis, KernelError, HALF_LENGTH};

use crate::context::{Inputs, StencilContext};
use crate::dispatch::{for_each_slab, Execution};
use crate::kernel::StencilKernel;

/// Stencil addressing every neighbour through [`PaddedLayout::index`](iso3dfd_core::PaddedLayout::index).
#[derive(Debug)]
pub struct DirectKernel {
    execution: Execution,
}

impl DirectKernel {
    /// Kernel dispatching one plane per task.
    pub fn new(execution: Execution) -> Self {
        Self { execution }
    }
}

fn update_slab(inp: Inputs<'_>, k_start: usize, slab: &mut [f32]) {
    let l = inp.layout;
    let c = inp.coeff;
    let p = inp.prev;
    let base = k_start * l.plane_len();
    let planes = slab.len() / l.plane_len();
    for k in k_start..k_start + planes {
        for j in l.interior(Axis::Y) {
            for i in l.interior(Axis::X) {
                let idx = l.index(i, j, k);
                let centre = p[idx];
                let mut value = c.get(0) * centre;
                for r in 1..=HALF_LENGTH {
                    value += c.get(r)
                        * (p[l.index(i - r, j, k)]
                            + p[l.index(i + r, j, k)]
                            + p[l.index(i, j - r, k)]
                            + p[l.index(i, j + r, k)]
                            + p[l.index(i, j, k - r)]
                            + p[l.index(i, j, k + r)]);
                }
                let out = &mut slab[idx - base];
                *out = 2.0 * centre - *out + value * inp.vel[idx];
            }
        }
    }
}

impl StencilKernel for DirectKernel {
    fn name(&self) -> &str {
        "direct"
    }

    fn apply(&self, ctx: &mut StencilContext<'_>) -> Result<(), KernelError> {
        let (inp, next) = ctx.split();
        for_each_slab(&inp.layout, next, 1, self.execution, |k_start, slab| {
            update_slab(inp, k_start, slab)
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iso3dfd_core::{CoefficientTable, Dims3, PaddedLayout};

    #[test]
    fn single_impulse_spreads_along_axes() {
        let l = PaddedLayout::for_stencil(Dims3::cube(5).unwrap(), HALF_LENGTH).unwrap();
        let coeff = CoefficientTable::new(1.0);
        let mut prev = vec![0.0f32; l.len()];
        let vel = vec![1.0f32; l.len()];
        let mut next = vec![0.0f32; l.len()];
        let centre = l.index(10, 10, 10);
        prev[centre] = 1.0;

        let mut ctx = StencilContext::new(l, &coeff, &prev, &vel, &mut next).unwrap();
        DirectKernel::new(Execution::Serial).apply(&mut ctx).unwrap();

        assert_eq!(next[centre], 2.0 + coeff.get(0));
        for r in 1..=2 {
            let w = coeff.get(r);
            assert_eq!(next[l.index(10 + r, 10, 10)], w);
            assert_eq!(next[l.index(10, 10 - r, 10)], w);
            assert_eq!(next[l.index(10, 10, 10 + r)], w);
        }
        // Off-axis points see nothing.
        assert_eq!(next[l.index(11, 11, 10)], 0.0);
    }

    #[test]
    fn old_next_is_subtracted() {
        let l = PaddedLayout::for_stencil(Dims3::cube(1).unwrap(), HALF_LENGTH).unwrap();
        let coeff = CoefficientTable::from_raw([0.0; HALF_LENGTH + 1]);
        let prev = vec![3.0f32; l.len()];
        let vel = vec![1.0f32; l.len()];
        let mut next = vec![1.0f32; l.len()];
        let mut ctx = StencilContext::new(l, &coeff, &prev, &vel, &mut next).unwrap();
        DirectKernel::new(Execution::Serial).apply(&mut ctx).unwrap();
        assert_eq!(next[l.index(8, 8, 8)], 5.0);
        assert_eq!(next[l.index(7, 8, 8)], 1.0);
    }
}
