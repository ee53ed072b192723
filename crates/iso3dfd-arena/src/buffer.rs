//! Dense padded 3-D field storage.

use iso3dfd_core::PaddedLayout;

use crate::error::ArenaError;
use crate::stats::FieldStats;

/// A dense `f32` field covering a [`PaddedLayout`], halo included.
///
/// Allocated once per run and never resized. Element `(i, j, k)` (padded
/// coordinates) lives at `layout.index(i, j, k)`.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldBuffer {
    layout: PaddedLayout,
    data: Vec<f32>,
}

impl FieldBuffer {
    /// Allocate a zero-filled buffer.
    ///
    /// Returns `Err(ArenaError::AllocationFailed)` instead of aborting
    /// when the allocator cannot satisfy the request.
    pub fn zeroed(layout: PaddedLayout) -> Result<Self, ArenaError> {
        Self::filled(layout, 0.0)
    }

    /// Allocate a buffer with every element set to `value`.
    pub fn filled(layout: PaddedLayout, value: f32) -> Result<Self, ArenaError> {
        let mut data = Vec::new();
        data.try_reserve_exact(layout.len())
            .map_err(|_| ArenaError::AllocationFailed {
                requested_bytes: layout.bytes(),
            })?;
        data.resize(layout.len(), value);
        Ok(Self { layout, data })
    }

    /// Wrap existing storage. `data.len()` must equal `layout.len()`.
    pub fn from_vec(layout: PaddedLayout, data: Vec<f32>) -> Result<Self, ArenaError> {
        if data.len() != layout.len() {
            return Err(ArenaError::LengthMismatch {
                expected: layout.len(),
                actual: data.len(),
            });
        }
        Ok(Self { layout, data })
    }

    /// The buffer's layout.
    pub fn layout(&self) -> &PaddedLayout {
        &self.layout
    }

    /// All elements in memory order.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// All elements in memory order, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Release the storage.
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Value at padded coordinate `(i, j, k)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate lies outside the padded extent.
    #[inline]
    pub fn at(&self, i: usize, j: usize, k: usize) -> f32 {
        self.data[self.layout.index(i, j, k)]
    }

    /// Set the value at padded coordinate `(i, j, k)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate lies outside the padded extent.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, k: usize, value: f32) {
        let idx = self.layout.index(i, j, k);
        self.data[idx] = value;
    }

    /// Set every element, halo included.
    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    /// Set every element of the half-open box `lo..hi` (padded coordinates).
    pub fn fill_box(&mut self, lo: [usize; 3], hi: [usize; 3], value: f32) -> Result<(), ArenaError> {
        let extent = self.layout.extent();
        if (0..3).any(|a| lo[a] > hi[a] || hi[a] > extent[a]) {
            return Err(ArenaError::BoxOutOfBounds { lo, hi, extent });
        }
        for k in lo[2]..hi[2] {
            for j in lo[1]..hi[1] {
                let row = self.layout.index(lo[0], j, k);
                self.data[row..row + (hi[0] - lo[0])].fill(value);
            }
        }
        Ok(())
    }

    /// Summary statistics over every element, halo included.
    pub fn stats(&self) -> FieldStats {
        FieldStats::of(&self.data)
    }
}
