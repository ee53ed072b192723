//! Validated buffer views handed to a kernel for one step.

use iso3dfd_core::{CoefficientTable, KernelError, PaddedLayout, HALF_LENGTH};

/// Everything one stencil step reads and writes.
///
/// Construction checks, once per step, that every slice covers the
/// layout exactly and that the halo can hold the stencil. Kernels rely
/// on both facts to index neighbours without per-point bounds logic.
///
/// `next` holds `u(t-1)` on entry and `u(t+1)` on return; `prev` holds
/// `u(t)` and is never written.
pub struct StencilContext<'a> {
    layout: PaddedLayout,
    coeff: &'a CoefficientTable,
    prev: &'a [f32],
    vel: &'a [f32],
    next: &'a mut [f32],
}

impl<'a> StencilContext<'a> {
    /// Validate and bundle the step inputs.
    ///
    /// Returns `Err(KernelError::HaloTooNarrow)` if `layout.halo()` is
    /// below [`HALF_LENGTH`], or `Err(KernelError::LengthMismatch)`
    /// naming the first slice whose length differs from `layout.len()`.
    pub fn new(
        layout: PaddedLayout,
        coeff: &'a CoefficientTable,
        prev: &'a [f32],
        vel: &'a [f32],
        next: &'a mut [f32],
    ) -> Result<Self, KernelError> {
        if layout.halo() < HALF_LENGTH {
            return Err(KernelError::HaloTooNarrow {
                halo: layout.halo(),
                required: HALF_LENGTH,
            });
        }
        for (buffer, len) in [("prev", prev.len()), ("next", next.len()), ("vel", vel.len())] {
            if len != layout.len() {
                return Err(KernelError::LengthMismatch {
                    buffer,
                    expected: layout.len(),
                    actual: len,
                });
            }
        }
        Ok(Self {
            layout,
            coeff,
            prev,
            vel,
            next,
        })
    }

    /// Shared layout of all three buffers.
    pub fn layout(&self) -> &PaddedLayout {
        &self.layout
    }

    /// Stencil weights.
    pub fn coeff(&self) -> &CoefficientTable {
        self.coeff
    }

    /// Field at the current time level.
    pub fn prev(&self) -> &[f32] {
        self.prev
    }

    /// Folded velocity field (`v² · dt²`).
    pub fn vel(&self) -> &[f32] {
        self.vel
    }

    /// Output buffer.
    pub fn next_mut(&mut self) -> &mut [f32] {
        &mut *self.next
    }

    /// Split into read-only inputs and the mutable output.
    pub fn split(&mut self) -> (Inputs<'_>, &mut [f32]) {
        (
            Inputs {
                layout: self.layout,
                coeff: self.coeff,
                prev: self.prev,
                vel: self.vel,
            },
            &mut *self.next,
        )
    }
}

/// Read-only half of a split [`StencilContext`].
///
/// `Copy` and `Sync`, so parallel slab closures can capture it by value.
#[derive(Clone, Copy)]
pub struct Inputs<'a> {
    /// Shared layout.
    pub layout: PaddedLayout,
    /// Stencil weights.
    pub coeff: &'a CoefficientTable,
    /// Field at the current time level.
    pub prev: &'a [f32],
    /// Folded velocity field.
    pub vel: &'a [f32],
}
