//! Time-stepping loop over a [`WavefieldPair`].
//!
//! Each step reads the current field and overwrites the older one with
//! the next time level, so `next` doubles as storage for `u(t-1)`. After
//! an even total number of steps the latest field sits in the buffer
//! originally passed as `prev`; after an odd number, in `next`. Callers
//! do not need that rule: [`IterationDriver::run`] returns a [`Wavefield`]
//! whose handles resolve to the right buffers through
//! [`IterationDriver::read`].

use std::error::Error;
use std::fmt;

use iso3dfd_arena::{ArenaError, FieldBuffer, FieldHandle, Wavefield, WavefieldPair};
use iso3dfd_core::{CoefficientTable, KernelError, PaddedLayout, HALF_LENGTH};
use iso3dfd_kernel::{Execution, KernelStrategy, StencilContext, StencilKernel};
use tracing::debug;

/// Errors from binding buffers to an [`IterationDriver`] or a
/// [`ReferenceEngine`](crate::ReferenceEngine).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DriverError {
    /// Allocation failed or a buffer does not share the wavefield layout.
    Arena(ArenaError),
    /// The stencil cannot run on this layout or configuration.
    Kernel(KernelError),
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arena(e) => write!(f, "arena: {e}"),
            Self::Kernel(e) => write!(f, "kernel: {e}"),
        }
    }
}

impl Error for DriverError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Arena(e) => Some(e),
            Self::Kernel(e) => Some(e),
        }
    }
}

impl From<ArenaError> for DriverError {
    fn from(e: ArenaError) -> Self {
        Self::Arena(e)
    }
}

impl From<KernelError> for DriverError {
    fn from(e: KernelError) -> Self {
        Self::Kernel(e)
    }
}

/// Owns the run's buffers and advances them with one kernel.
pub struct IterationDriver {
    fields: WavefieldPair,
    vel: FieldBuffer,
    coeff: CoefficientTable,
    strategy: KernelStrategy,
    kernel: Box<dyn StencilKernel>,
}

impl IterationDriver {
    /// Bind buffers, coefficients and a kernel strategy.
    ///
    /// `fields` must be freshly initialized: its `prev` slot holds `u(0)`
    /// and its `next` slot holds `u(-1)`.
    pub fn new(
        fields: WavefieldPair,
        vel: FieldBuffer,
        coeff: CoefficientTable,
        strategy: KernelStrategy,
        execution: Execution,
    ) -> Result<Self, DriverError> {
        let layout = *fields.layout();
        if *vel.layout() != layout {
            return Err(ArenaError::LayoutMismatch {
                expected: layout,
                actual: *vel.layout(),
            }
            .into());
        }
        if layout.halo() < HALF_LENGTH {
            return Err(KernelError::HaloTooNarrow {
                halo: layout.halo(),
                required: HALF_LENGTH,
            }
            .into());
        }
        let kernel = strategy.build(execution)?;
        Ok(Self {
            fields,
            vel,
            coeff,
            strategy,
            kernel,
        })
    }

    /// Advance `steps` time steps. `run(0)` leaves both buffers untouched.
    ///
    /// Successive calls compose: `run(n)` then `run(m)` leaves the same
    /// state as `run(n + m)`.
    pub fn run(&mut self, steps: u64) -> Result<Wavefield, KernelError> {
        for _ in 0..steps {
            let guard = self.fields.begin_step();
            let mut ctx = StencilContext::new(
                *guard.read.layout(),
                &self.coeff,
                guard.read.as_slice(),
                self.vel.as_slice(),
                guard.write.as_mut_slice(),
            )?;
            self.kernel.apply(&mut ctx)?;
            self.fields.publish();
        }
        debug!(
            "{} ran {} steps (total {}, current in {:?})",
            self.kernel.name(),
            steps,
            self.fields.steps(),
            self.fields.current_slot()
        );
        Ok(self.fields.wavefield())
    }

    /// Resolve a handle issued by [`run`](Self::run) or [`wavefield`](Self::wavefield).
    ///
    /// Returns `Err(ArenaError::StaleHandle)` once another step has run.
    pub fn read(&self, handle: FieldHandle) -> Result<&FieldBuffer, ArenaError> {
        self.fields.read(handle)
    }

    /// Handles to the current and previous time levels.
    pub fn wavefield(&self) -> Wavefield {
        self.fields.wavefield()
    }

    /// Total steps taken.
    pub fn steps(&self) -> u64 {
        self.fields.steps()
    }

    /// Selected strategy.
    pub fn strategy(&self) -> KernelStrategy {
        self.strategy
    }

    /// Shared buffer layout.
    pub fn layout(&self) -> &PaddedLayout {
        self.fields.layout()
    }

    /// Stencil weights.
    pub fn coeff(&self) -> &CoefficientTable {
        &self.coeff
    }

    /// Velocity buffer.
    pub fn vel(&self) -> &FieldBuffer {
        &self.vel
    }

    /// The wavefield pair, for slot-level inspection.
    pub fn fields(&self) -> &WavefieldPair {
        &self.fields
    }

    /// Release the buffers.
    pub fn into_parts(self) -> (WavefieldPair, FieldBuffer) {
        (self.fields, self.vel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iso3dfd_arena::BufferSlot;
    use iso3dfd_core::Dims3;

    fn layout(halo: usize) -> PaddedLayout {
        PaddedLayout::new(Dims3::cube(4).unwrap(), halo).unwrap()
    }

    fn driver(strategy: KernelStrategy) -> IterationDriver {
        let l = layout(HALF_LENGTH);
        let mut prev = FieldBuffer::zeroed(l).unwrap();
        prev.set(10, 10, 10, 1.0);
        let next = FieldBuffer::zeroed(l).unwrap();
        let vel = FieldBuffer::filled(l, 9.0).unwrap();
        let pair = WavefieldPair::new(prev, next).unwrap();
        IterationDriver::new(pair, vel, CoefficientTable::default(), strategy, Execution::Serial)
            .unwrap()
    }

    #[test]
    fn zero_steps_is_a_no_op() {
        let mut d = driver(KernelStrategy::Direct);
        let before = d.fields().clone();
        let wf = d.run(0).unwrap();
        assert_eq!(wf.current.slot(), BufferSlot::Prev);
        assert_eq!(d.read(wf.current).unwrap(), before.slot(BufferSlot::Prev));
        assert_eq!(d.read(wf.previous).unwrap(), before.slot(BufferSlot::Next));
    }

    #[test]
    fn odd_step_count_ends_in_next_slot() {
        let mut d = driver(KernelStrategy::PointerOffset);
        let wf = d.run(3).unwrap();
        assert_eq!(wf.current.slot(), BufferSlot::Next);
        assert_eq!(d.steps(), 3);
        let wf = d.run(1).unwrap();
        assert_eq!(wf.current.slot(), BufferSlot::Prev);
    }

    #[test]
    fn stale_handle_rejected_after_run() {
        let mut d = driver(KernelStrategy::Direct);
        let old = d.run(1).unwrap();
        d.run(1).unwrap();
        match d.read(old.current) {
            Err(ArenaError::StaleHandle {
                handle_step: 1,
                current_step: 2,
            }) => {}
            other => panic!("expected StaleHandle, got {other:?}"),
        }
    }

    #[test]
    fn velocity_layout_must_match() {
        let l = layout(HALF_LENGTH);
        let pair = WavefieldPair::new(
            FieldBuffer::zeroed(l).unwrap(),
            FieldBuffer::zeroed(l).unwrap(),
        )
        .unwrap();
        let vel = FieldBuffer::zeroed(layout(HALF_LENGTH + 1)).unwrap();
        match IterationDriver::new(
            pair,
            vel,
            CoefficientTable::default(),
            KernelStrategy::Direct,
            Execution::Serial,
        ) {
            Err(DriverError::Arena(ArenaError::LayoutMismatch { .. })) => {}
            Err(other) => panic!("expected LayoutMismatch, got {other:?}"),
            Ok(_) => panic!("expected LayoutMismatch, got Ok"),
        }
    }

    #[test]
    fn narrow_halo_rejected_before_first_step() {
        let l = layout(2);
        let pair = WavefieldPair::new(
            FieldBuffer::zeroed(l).unwrap(),
            FieldBuffer::zeroed(l).unwrap(),
        )
        .unwrap();
        let vel = FieldBuffer::zeroed(l).unwrap();
        match IterationDriver::new(
            pair,
            vel,
            CoefficientTable::default(),
            KernelStrategy::Direct,
            Execution::Serial,
        ) {
            Err(DriverError::Kernel(KernelError::HaloTooNarrow { halo: 2, .. })) => {}
            Err(other) => panic!("expected HaloTooNarrow, got {other:?}"),
            Ok(_) => panic!("expected HaloTooNarrow, got Ok"),
        }
    }
}
