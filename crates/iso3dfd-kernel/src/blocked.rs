//! Cache-blocked stencil with a rolling z window.
//!
//! The `(i, j)` plane is tiled into `n1 × n2` blocks and `k` is cut into
//! slabs of `n3` planes. Within a tile, every row `j` keeps a ring of the
//! `2H + 1` rows `k - H ..= k + H`, each widened by `H` on both sides of
//! the tile so the x neighbours come from the ring too. Advancing one
//! plane loads a single new row into the slot of the row that fell out.
//!
//! The ring for a slab is filled completely before its first plane is
//! computed.
//!
//! Summation order per radius is `(z+ + z-) + x+ + x- + y+ + y-`, so
//! results match [`DirectKernel`](crate::DirectKernel) up to rounding.

use iso3dfd_core::{Axis, KernelError, HALF_LENGTH};

use crate::context::{Inputs, StencilContext};
use crate::dispatch::{for_each_slab, Execution};
use crate::kernel::{BlockShape, StencilKernel};

const RING: usize = 2 * HALF_LENGTH + 1;

#[inline]
fn slot(k: usize) -> usize {
    k % RING
}

/// Tiled stencil.
#[derive(Debug)]
pub struct BlockedKernel {
    shape: BlockShape,
    execution: Execution,
}

impl BlockedKernel {
    /// Kernel dispatching one `shape.n3`-plane slab per task.
    ///
    /// Returns `Err(KernelError::InvalidBlockShape)` if any extent is zero.
    pub fn new(shape: BlockShape, execution: Execution) -> Result<Self, KernelError> {
        shape.validate()?;
        Ok(Self { shape, execution })
    }

    /// Tile extents.
    pub fn shape(&self) -> BlockShape {
        self.shape
    }
}

fn update_slab(inp: Inputs<'_>, shape: BlockShape, k_start: usize, slab: &mut [f32]) {
    let l = inp.layout;
    let [_, s2, s3] = l.strides();
    let p = inp.prev;
    let v = inp.vel;
    let c = inp.coeff.as_array();
    let dy: [usize; HALF_LENGTH + 1] = std::array::from_fn(|r| r * s2);

    let base = k_start * s3;
    let k_end = k_start + slab.len() / s3;
    let xs = l.interior(Axis::X);
    let ys = l.interior(Axis::Y);

    let row_cap = shape.n1 + 2 * HALF_LENGTH;
    let tile_rows = shape.n2.min(ys.len());
    let mut ring = vec![0.0f32; tile_rows * RING * row_cap];

    for j0 in ys.clone().step_by(shape.n2) {
        let j1 = (j0 + shape.n2).min(ys.end);
        for i0 in xs.clone().step_by(shape.n1) {
            let i1 = (i0 + shape.n1).min(xs.end);
            let width = i1 - i0 + 2 * HALF_LENGTH;

            let load = |ring: &mut [f32], j: usize, k: usize| {
                let src = l.index(i0 - HALF_LENGTH, j, k);
                let dst = ((j - j0) * RING + slot(k)) * row_cap;
                ring[dst..dst + width].copy_from_slice(&p[src..src + width]);
            };

            for j in j0..j1 {
                for k in k_start - HALF_LENGTH..=k_start + HALF_LENGTH {
                    load(&mut ring, j, k);
                }
            }

            for k in k_start..k_end {
                for j in j0..j1 {
                    let rows = &ring[(j - j0) * RING * row_cap..(j - j0 + 1) * RING * row_cap];
                    let centre_row = slot(k) * row_cap;
                    for i in i0..i1 {
                        let w = i - i0 + HALF_LENGTH;
                        let o = l.index(i, j, k);
                        let centre = rows[centre_row + w];
                        let mut value = c[0] * centre;
                        for r in 1..=HALF_LENGTH {
                            let zp = rows[slot(k + r) * row_cap + w];
                            let zm = rows[slot(k - r) * row_cap + w];
                            value += c[r]
                                * ((zp + zm)
                                    + rows[centre_row + w + r]
                                    + rows[centre_row + w - r]
                                    + p[o + dy[r]]
                                    + p[o - dy[r]]);
                        }
                        let out = &mut slab[o - base];
                        *out = 2.0 * centre - *out + value * v[o];
                    }
                }
                if k + 1 < k_end {
                    for j in j0..j1 {
                        load(&mut ring, j, k + 1 + HALF_LENGTH);
                    }
                }
            }
        }
    }
}

impl StencilKernel for BlockedKernel {
    fn name(&self) -> &str {
        "blocked"
    }

    fn apply(&self, ctx: &mut StencilContext<'_>) -> Result<(), KernelError> {
        let shape = self.shape;
        let (inp, next) = ctx.split();
        for_each_slab(&inp.layout, next, shape.n3, self.execution, |k_start, slab| {
            update_slab(inp, shape, k_start, slab)
        });
        Ok(())
    }
}
