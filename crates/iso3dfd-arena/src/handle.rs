//! Opaque handles naming a time level inside a [`WavefieldPair`](crate::WavefieldPair).

/// Physical buffer slot, named by its role before the first step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BufferSlot {
    /// The buffer passed in as `prev`. Holds the latest field after an
    /// even number of steps.
    Prev,
    /// The buffer passed in as `next`. Holds the latest field after an
    /// odd number of steps.
    Next,
}

impl BufferSlot {
    /// The opposite slot.
    pub fn other(self) -> Self {
        match self {
            Self::Prev => Self::Next,
            Self::Next => Self::Prev,
        }
    }

    /// Slot holding the latest field after `steps` steps.
    pub fn current_after(steps: u64) -> Self {
        if steps % 2 == 0 {
            Self::Prev
        } else {
            Self::Next
        }
    }
}

/// Reference to one time level of a wavefield pair.
///
/// Valid only until the pair publishes another step; resolving it later
/// yields [`ArenaError::StaleHandle`](crate::ArenaError::StaleHandle).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldHandle {
    slot: BufferSlot,
    step: u64,
}

impl FieldHandle {
    pub(crate) fn new(slot: BufferSlot, step: u64) -> Self {
        Self { slot, step }
    }

    /// The physical slot this handle resolves to.
    pub fn slot(&self) -> BufferSlot {
        self.slot
    }

    /// Step count of the pair when the handle was issued.
    pub fn step(&self) -> u64 {
        self.step
    }
}

/// The two live time levels after a run.
///
/// `current` is the field at time step `t`; `previous` is the field at
/// `t - 1` (for `t = 0`, the initial contents of the `next` slot).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wavefield {
    /// Latest field.
    pub current: FieldHandle,
    /// Field one step older.
    pub previous: FieldHandle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parity_selects_slot() {
        assert_eq!(BufferSlot::current_after(0), BufferSlot::Prev);
        assert_eq!(BufferSlot::current_after(1), BufferSlot::Next);
        assert_eq!(BufferSlot::current_after(2), BufferSlot::Prev);
        assert_eq!(BufferSlot::current_after(7), BufferSlot::Next);
    }

    #[test]
    fn other_is_an_involution() {
        for slot in [BufferSlot::Prev, BufferSlot::Next] {
            assert_ne!(slot.other(), slot);
            assert_eq!(slot.other().other(), slot);
        }
    }
}
