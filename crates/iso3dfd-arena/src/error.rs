//! Arena-specific error types.

use std::error::Error;
use std::fmt;

use iso3dfd_core::PaddedLayout;

/// Errors that can occur while allocating or addressing field buffers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The allocator could not provide a buffer of the requested size.
    AllocationFailed {
        /// Number of bytes requested.
        requested_bytes: usize,
    },
    /// A vector handed to [`FieldBuffer::from_vec`](crate::FieldBuffer::from_vec)
    /// does not match the layout length.
    LengthMismatch {
        /// Elements required by the layout.
        expected: usize,
        /// Elements supplied.
        actual: usize,
    },
    /// Buffers that must share a layout do not.
    LayoutMismatch {
        /// The layout every buffer must have.
        expected: PaddedLayout,
        /// The layout that was found.
        actual: PaddedLayout,
    },
    /// A [`FieldHandle`](crate::FieldHandle) issued before the most recent step.
    StaleHandle {
        /// Step count encoded in the handle.
        handle_step: u64,
        /// Current step count of the pair.
        current_step: u64,
    },
    /// A fill box extends past the padded extent or is inverted.
    BoxOutOfBounds {
        /// Inclusive lower corner.
        lo: [usize; 3],
        /// Exclusive upper corner.
        hi: [usize; 3],
        /// Padded extent of the buffer.
        extent: [usize; 3],
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed { requested_bytes } => {
                write!(f, "allocation of {requested_bytes} bytes failed")
            }
            Self::LengthMismatch { expected, actual } => {
                write!(f, "buffer length {actual} does not match layout length {expected}")
            }
            Self::LayoutMismatch { expected, actual } => {
                write!(f, "layout mismatch: expected {expected}, found {actual}")
            }
            Self::StaleHandle {
                handle_step,
                current_step,
            } => write!(
                f,
                "stale handle: issued at step {handle_step}, pair is at step {current_step}"
            ),
            Self::BoxOutOfBounds { lo, hi, extent } => write!(
                f,
                "box {lo:?}..{hi:?} outside padded extent {extent:?}"
            ),
        }
    }
}

impl Error for ArenaError {}
