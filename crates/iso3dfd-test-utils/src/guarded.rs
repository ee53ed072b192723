//! Bounds-instrumented storage.
//!
//! A [`GuardedField`] allocates `guard` sentinel cells on both sides of a
//! payload of `len` cells. Code under test only ever sees the payload
//! slice; afterwards [`GuardedField::guards_intact`] reports whether any
//! write escaped it.

/// Payload slice surrounded by sentinel guard cells.
#[derive(Clone, Debug)]
pub struct GuardedField {
    data: Vec<f32>,
    guard: usize,
    len: usize,
    sentinel: f32,
}

impl GuardedField {
    /// Default sentinel, chosen to be recognisable and finite.
    pub const SENTINEL: f32 = -7777.0;

    /// Payload of `len` zeros with `guard` sentinels on each side.
    pub fn new(len: usize, guard: usize) -> Self {
        Self::with_sentinel(len, guard, Self::SENTINEL)
    }

    pub fn with_sentinel(len: usize, guard: usize, sentinel: f32) -> Self {
        let mut data = vec![sentinel; len + 2 * guard];
        data[guard..guard + len].fill(0.0);
        Self {
            data,
            guard,
            len,
            sentinel,
        }
    }

    /// Payload seeded from `values`.
    pub fn from_slice(values: &[f32], guard: usize) -> Self {
        let mut g = Self::new(values.len(), guard);
        g.payload_mut().copy_from_slice(values);
        g
    }

    pub fn payload(&self) -> &[f32] {
        &self.data[self.guard..self.guard + self.len]
    }

    pub fn payload_mut(&mut self) -> &mut [f32] {
        &mut self.data[self.guard..self.guard + self.len]
    }

    /// Offsets (relative to the start of the allocation) of guard cells
    /// that no longer hold the sentinel.
    pub fn clobbered(&self) -> Vec<usize> {
        let tail = self.guard + self.len;
        (0..self.guard)
            .chain(tail..tail + self.guard)
            .filter(|&o| self.data[o].to_bits() != self.sentinel.to_bits())
            .collect()
    }

    pub fn guards_intact(&self) -> bool {
        self.clobbered().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_field_has_intact_guards() {
        let g = GuardedField::new(10, 4);
        assert_eq!(g.payload().len(), 10);
        assert!(g.payload().iter().all(|&v| v == 0.0));
        assert!(g.guards_intact());
    }

    #[test]
    fn payload_writes_keep_guards() {
        let mut g = GuardedField::from_slice(&[1.0, 2.0, 3.0], 2);
        g.payload_mut().fill(9.0);
        assert!(g.guards_intact());
    }

    #[test]
    fn escaped_write_is_reported() {
        let mut g = GuardedField::new(3, 2);
        g.data[5] = 0.0;
        assert_eq!(g.clobbered(), vec![5]);
        assert!(!g.guards_intact());
    }
}
