//! Stride-offset stencil.
//!
//! Computes one linear offset per point and reaches each neighbour by
//! adding or subtracting a precomputed multiple of the axis stride. The
//! summation order is the same as [`DirectKernel`](crate::DirectKernel),
//! so the two are bit-identical.

use iso3dfd_core::{Axis, KernelError, HALF_LENGTH};

use crate::context::{Inputs, StencilContext};
use crate::dispatch::{for_each_slab, Execution};
use crate::kernel::StencilKernel;

/// Stencil walking neighbours by linear offset.
#[derive(Debug)]
pub struct PointerOffsetKernel {
    execution: Execution,
}

impl PointerOffsetKernel {
    /// Kernel dispatching one plane per task.
    pub fn new(execution: Execution) -> Self {
        Self { execution }
    }
}

fn update_slab(inp: Inputs<'_>, k_start: usize, slab: &mut [f32]) {
    let l = inp.layout;
    let [_, s2, s3] = l.strides();
    let p = inp.prev;
    let v = inp.vel;
    let c = inp.coeff.as_array();
    let dy: [usize; HALF_LENGTH + 1] = std::array::from_fn(|r| r * s2);
    let dz: [usize; HALF_LENGTH + 1] = std::array::from_fn(|r| r * s3);

    let base = k_start * s3;
    let planes = slab.len() / s3;
    let xs = l.interior(Axis::X);
    for k in k_start..k_start + planes {
        for j in l.interior(Axis::Y) {
            let row = j * s2 + k * s3;
            for o in row + xs.start..row + xs.end {
                let centre = p[o];
                let mut value = c[0] * centre;
                for r in 1..=HALF_LENGTH {
                    value += c[r]
                        * (p[o - r] + p[o + r] + p[o - dy[r]] + p[o + dy[r]] + p[o - dz[r]] + p[o + dz[r]]);
                }
                let out = &mut slab[o - base];
                *out = 2.0 * centre - *out + value * v[o];
            }
        }
    }
}

impl StencilKernel for PointerOffsetKernel {
    fn name(&self) -> &str {
        "pointer_offset"
    }

    fn apply(&self, ctx: &mut StencilContext<'_>) -> Result<(), KernelError> {
        let (inp, next) = ctx.split();
        for_each_slab(&inp.layout, next, 1, self.execution, |k_start, slab| {
            update_slab(inp, k_start, slab)
        });
        Ok(())
    }
}
