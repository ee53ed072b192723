//! Double-buffered wavefield pair.
//!
//! [`WavefieldPair`] owns the two time-level buffers of the leapfrog
//! scheme. Each step reads the current field and overwrites the older one
//! in place with the new field, so the roles alternate by step parity:
//!
//! 1. `begin_step()` borrows the current buffer for reading and the older
//!    buffer for writing
//! 2. the kernel writes the new field into the write buffer
//! 3. `publish()` advances the step count, flipping the roles

use crate::buffer::FieldBuffer;
use crate::error::ArenaError;
use crate::handle::{BufferSlot, FieldHandle, Wavefield};

/// Split borrow of a [`WavefieldPair`] for one step.
///
/// `read` holds `u(t)`. `write` holds `u(t-1)` on entry and receives
/// `u(t+1)`. Drop the guard before calling
/// [`WavefieldPair::publish`].
#[must_use]
pub struct StepGuard<'a> {
    /// Field at the current time level.
    pub read: &'a FieldBuffer,
    /// Field one level older, overwritten with the next level.
    pub write: &'a mut FieldBuffer,
    /// Step number being computed (zero-based).
    pub step: u64,
}

/// Two same-layout buffers alternating between "current" and "older".
///
/// # Buffer roles
///
/// ```text
/// steps even:  prev = u(t)   next = u(t-1)  → step writes next
/// steps odd:   next = u(t)   prev = u(t-1)  → step writes prev
/// ```
#[derive(Clone, Debug)]
pub struct WavefieldPair {
    prev: FieldBuffer,
    next: FieldBuffer,
    steps: u64,
}

impl WavefieldPair {
    /// Pair `prev` (the field at `t = 0`) with `next` (the field at `t = -1`).
    ///
    /// Returns `Err(ArenaError::LayoutMismatch)` if the layouts differ.
    pub fn new(prev: FieldBuffer, next: FieldBuffer) -> Result<Self, ArenaError> {
        if prev.layout() != next.layout() {
            return Err(ArenaError::LayoutMismatch {
                expected: *prev.layout(),
                actual: *next.layout(),
            });
        }
        Ok(Self {
            prev,
            next,
            steps: 0,
        })
    }

    /// Layout shared by both buffers.
    pub fn layout(&self) -> &iso3dfd_core::PaddedLayout {
        self.prev.layout()
    }

    /// Number of steps published so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Slot holding the latest field.
    pub fn current_slot(&self) -> BufferSlot {
        BufferSlot::current_after(self.steps)
    }

    /// Handles to the two live time levels, valid until the next publish.
    pub fn wavefield(&self) -> Wavefield {
        let current = self.current_slot();
        Wavefield {
            current: FieldHandle::new(current, self.steps),
            previous: FieldHandle::new(current.other(), self.steps),
        }
    }

    /// Resolve a handle.
    ///
    /// Returns `Err(ArenaError::StaleHandle)` if the pair has published a
    /// step since the handle was issued.
    pub fn read(&self, handle: FieldHandle) -> Result<&FieldBuffer, ArenaError> {
        if handle.step() != self.steps {
            return Err(ArenaError::StaleHandle {
                handle_step: handle.step(),
                current_step: self.steps,
            });
        }
        Ok(self.slot(handle.slot()))
    }

    /// Buffer in a physical slot, regardless of role.
    pub fn slot(&self, slot: BufferSlot) -> &FieldBuffer {
        match slot {
            BufferSlot::Prev => &self.prev,
            BufferSlot::Next => &self.next,
        }
    }

    /// Latest field.
    pub fn current(&self) -> &FieldBuffer {
        self.slot(self.current_slot())
    }

    /// Field one step older than [`current`](Self::current).
    pub fn previous(&self) -> &FieldBuffer {
        self.slot(self.current_slot().other())
    }

    /// Borrow the buffers for one step.
    pub fn begin_step(&mut self) -> StepGuard<'_> {
        let step = self.steps;
        let (read, write) = match self.current_slot() {
            BufferSlot::Prev => (&self.prev, &mut self.next),
            BufferSlot::Next => (&self.next, &mut self.prev),
        };
        StepGuard { read, write, step }
    }

    /// Mark the step written through the last guard as complete.
    pub fn publish(&mut self) {
        self.steps += 1;
    }

    /// Release both buffers as `(prev, next)` by physical slot.
    pub fn into_buffers(self) -> (FieldBuffer, FieldBuffer) {
        (self.prev, self.next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iso3dfd_core::{Dims3, PaddedLayout};
    use proptest::prelude::*;

    fn layout(n: usize) -> PaddedLayout {
        PaddedLayout::new(Dims3::cube(n).unwrap(), 1).unwrap()
    }

    fn pair() -> WavefieldPair {
        let prev = FieldBuffer::filled(layout(2), 1.0).unwrap();
        let next = FieldBuffer::filled(layout(2), 2.0).unwrap();
        WavefieldPair::new(prev, next).unwrap()
    }

    #[test]
    fn rejects_mismatched_layouts() {
        let prev = FieldBuffer::zeroed(layout(2)).unwrap();
        let next = FieldBuffer::zeroed(layout(3)).unwrap();
        match WavefieldPair::new(prev, next) {
            Err(ArenaError::LayoutMismatch { .. }) => {}
            other => panic!("expected LayoutMismatch, got {other:?}"),
        }
    }

    #[test]
    fn first_step_reads_prev_and_writes_next() {
        let mut p = pair();
        let guard = p.begin_step();
        assert_eq!(guard.step, 0);
        assert_eq!(guard.read.as_slice()[0], 1.0);
        assert_eq!(guard.write.as_slice()[0], 2.0);
        guard.write.fill(3.0);
        p.publish();
        assert_eq!(p.current_slot(), BufferSlot::Next);
        assert_eq!(p.current().as_slice()[0], 3.0);
        assert_eq!(p.previous().as_slice()[0], 1.0);
    }

    #[test]
    fn roles_alternate_by_parity() {
        let mut p = pair();
        for step in 0..5u64 {
            let guard = p.begin_step();
            guard.write.fill(step as f32 + 10.0);
            p.publish();
        }
        // Five steps: latest write went to `next`.
        assert_eq!(p.current_slot(), BufferSlot::Next);
        assert_eq!(p.slot(BufferSlot::Next).as_slice()[0], 14.0);
        assert_eq!(p.slot(BufferSlot::Prev).as_slice()[0], 13.0);
    }

    #[test]
    fn zero_steps_leaves_prev_current() {
        let p = pair();
        let wf = p.wavefield();
        assert_eq!(wf.current.slot(), BufferSlot::Prev);
        assert_eq!(p.read(wf.current).unwrap().as_slice()[0], 1.0);
        assert_eq!(p.read(wf.previous).unwrap().as_slice()[0], 2.0);
    }

    #[test]
    fn handle_goes_stale_after_publish() {
        let mut p = pair();
        let wf = p.wavefield();
        let _ = p.begin_step();
        p.publish();
        match p.read(wf.current) {
            Err(ArenaError::StaleHandle {
                handle_step: 0,
                current_step: 1,
            }) => {}
            other => panic!("expected StaleHandle, got {other:?}"),
        }
        assert!(p.read(p.wavefield().current).is_ok());
    }

    proptest! {
        #[test]
        fn latest_write_is_always_current(steps in 0u64..40) {
            let mut p = pair();
            for step in 0..steps {
                let guard = p.begin_step();
                prop_assert_eq!(guard.step, step);
                guard.write.fill(step as f32 + 10.0);
                p.publish();
            }
            let wf = p.wavefield();
            prop_assert_eq!(wf.current.slot(), BufferSlot::current_after(steps));
            prop_assert_eq!(wf.previous.slot(), wf.current.slot().other());
            let expected = if steps == 0 { 1.0 } else { steps as f32 + 9.0 };
            prop_assert_eq!(p.read(wf.current).unwrap().as_slice()[0], expected);
        }
    }
}
