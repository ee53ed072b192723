//! Scalar reference implementation used for verification.
//!
//! Shares nothing with the optimized path beyond the layout
//! arithmetic: plain `Vec<f32>` buffers, a single-threaded triple loop,
//! and an explicit `std::mem::swap` after every step.

use iso3dfd_arena::FieldBuffer;
use iso3dfd_core::{CoefficientTable, KernelError, PaddedLayout, HALF_LENGTH};

use crate::driver::DriverError;
use crate::init::InitialCondition;

/// Sequential wavefield evolution from a fresh initial condition.
#[derive(Clone, Debug)]
pub struct ReferenceEngine {
    layout: PaddedLayout,
    coeff: [f32; HALF_LENGTH + 1],
    prev: Vec<f32>,
    next: Vec<f32>,
    vel: Vec<f32>,
    steps: u64,
}

impl ReferenceEngine {
    /// Allocate and initialize the three buffers from `init`.
    ///
    /// Returns `Err(DriverError::Kernel(KernelError::HaloTooNarrow))` if
    /// the halo cannot hold the stencil, before anything is allocated.
    pub fn new(
        layout: PaddedLayout,
        coeff: CoefficientTable,
        init: &InitialCondition,
    ) -> Result<Self, DriverError> {
        if layout.halo() < HALF_LENGTH {
            return Err(KernelError::HaloTooNarrow {
                halo: layout.halo(),
                required: HALF_LENGTH,
            }
            .into());
        }
        let mut prev = FieldBuffer::zeroed(layout)?;
        let mut next = FieldBuffer::zeroed(layout)?;
        let mut vel = FieldBuffer::zeroed(layout)?;
        init.apply(&mut prev, &mut next, &mut vel)?;
        Ok(Self {
            layout,
            coeff: *coeff.as_array(),
            prev: prev.into_vec(),
            next: next.into_vec(),
            vel: vel.into_vec(),
            steps: 0,
        })
    }

    /// Advance `steps` time steps.
    pub fn run(&mut self, steps: u64) {
        for _ in 0..steps {
            self.iteration();
            std::mem::swap(&mut self.prev, &mut self.next);
            self.steps += 1;
        }
    }

    fn iteration(&mut self) {
        let [e1, e2, e3] = self.layout.extent();
        let h = self.layout.halo();
        let d = self.layout.dims();
        let (n1, n2, n3) = (d.n1(), d.n2(), d.n3());
        let s2 = e1;
        let s3 = e1 * e2;
        debug_assert_eq!(self.prev.len(), s3 * e3);

        let c = &self.coeff;
        let prev = &self.prev;
        let vel = &self.vel;
        let next = &mut self.next;

        for iz in h..h + n3 {
            for iy in h..h + n2 {
                let row = iz * s3 + iy * s2;
                for ix in h..h + n1 {
                    let at = row + ix;
                    let mut value = prev[at] * c[0];
                    for r in 1..=HALF_LENGTH {
                        value += c[r]
                            * (prev[at - r]
                                + prev[at + r]
                                + prev[at - r * s2]
                                + prev[at + r * s2]
                                + prev[at - r * s3]
                                + prev[at + r * s3]);
                    }
                    next[at] = 2.0 * prev[at] - next[at] + value * vel[at];
                }
            }
        }
    }

    /// Steps taken since initialization.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Layout of the reference buffers.
    pub fn layout(&self) -> &PaddedLayout {
        &self.layout
    }

    /// Latest field.
    pub fn current(&self) -> &[f32] {
        &self.prev
    }

    /// Field one step older than [`current`](Self::current).
    pub fn previous(&self) -> &[f32] {
        &self.next
    }
}
