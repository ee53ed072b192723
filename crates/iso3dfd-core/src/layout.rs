//! Grid extents and the padded, strided memory layout shared by all buffers.
//!
//! Coordinates passed to a [`PaddedLayout`] are *padded* coordinates: the
//! first interior point is `(halo, halo, halo)`. Axis 1 (`i`) varies
//! fastest in memory:
//!
//! ```text
//! offset(i, j, k) = i + j * stride2 + k * stride3
//! stride2 = extent1, stride3 = extent1 * extent2
//! ```

use std::fmt;
use std::ops::Range;

use crate::coeff::HALF_LENGTH;
use crate::error::GridError;

/// One of the three grid axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Fastest-varying axis (unit stride), index `i`.
    X,
    /// Middle axis, index `j`.
    Y,
    /// Slowest-varying axis, index `k`.
    Z,
}

impl Axis {
    /// All axes in memory order, fastest first.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Position of this axis in `[n1, n2, n3]`-style arrays.
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
            Self::Z => write!(f, "z"),
        }
    }
}

/// Interior (unpadded) extent of the computational domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dims3 {
    n: [usize; 3],
}

impl Dims3 {
    /// Create interior extents `n1 × n2 × n3`.
    ///
    /// Returns `Err(GridError::ZeroExtent)` if any extent is zero.
    pub fn new(n1: usize, n2: usize, n3: usize) -> Result<Self, GridError> {
        let n = [n1, n2, n3];
        for axis in Axis::ALL {
            if n[axis.index()] == 0 {
                return Err(GridError::ZeroExtent { axis });
            }
        }
        Ok(Self { n })
    }

    /// Create a cube with edge length `n`.
    pub fn cube(n: usize) -> Result<Self, GridError> {
        Self::new(n, n, n)
    }

    /// Interior extent along axis 1.
    pub fn n1(&self) -> usize {
        self.n[0]
    }

    /// Interior extent along axis 2.
    pub fn n2(&self) -> usize {
        self.n[1]
    }

    /// Interior extent along axis 3.
    pub fn n3(&self) -> usize {
        self.n[2]
    }

    /// Interior extent along `axis`.
    pub fn along(&self, axis: Axis) -> usize {
        self.n[axis.index()]
    }

    /// Extents as `[n1, n2, n3]`.
    pub fn as_array(&self) -> [usize; 3] {
        self.n
    }

    /// Number of interior grid points.
    pub fn point_count(&self) -> u64 {
        self.n.iter().map(|&n| n as u64).product()
    }
}

impl TryFrom<[usize; 3]> for Dims3 {
    type Error = GridError;

    fn try_from(n: [usize; 3]) -> Result<Self, Self::Error> {
        Self::new(n[0], n[1], n[2])
    }
}

impl fmt::Display for Dims3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.n[0], self.n[1], self.n[2])
    }
}

/// Padded extents, strides and length of a field buffer.
///
/// All three buffers of a run (`prev`, `next`, `vel`) share one layout.
/// Immutable after construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PaddedLayout {
    dims: Dims3,
    halo: usize,
    extent: [usize; 3],
    strides: [usize; 3],
    len: usize,
}

impl PaddedLayout {
    /// Build a layout padding `dims` by `halo` cells on both sides of
    /// every axis.
    ///
    /// Any halo width is accepted here, including zero; use
    /// [`for_stencil`](Self::for_stencil) to also require room for the
    /// stencil's neighbour reads.
    pub fn new(dims: Dims3, halo: usize) -> Result<Self, GridError> {
        let overflow = || GridError::SizeOverflow {
            dims: dims.as_array(),
            halo,
        };
        let pad = halo.checked_mul(2).ok_or_else(overflow)?;
        let mut extent = [0usize; 3];
        for axis in Axis::ALL {
            extent[axis.index()] = dims.along(axis).checked_add(pad).ok_or_else(overflow)?;
        }
        let stride3 = extent[0].checked_mul(extent[1]).ok_or_else(overflow)?;
        let len = stride3.checked_mul(extent[2]).ok_or_else(overflow)?;
        // Byte size must also be addressable.
        len.checked_mul(std::mem::size_of::<f32>())
            .ok_or_else(overflow)?;

        Ok(Self {
            dims,
            halo,
            extent,
            strides: [1, extent[0], stride3],
            len,
        })
    }

    /// Build a layout whose halo can hold the [`HALF_LENGTH`] stencil.
    ///
    /// Returns `Err(GridError::HaloTooNarrow)` if `halo < HALF_LENGTH`.
    pub fn for_stencil(dims: Dims3, halo: usize) -> Result<Self, GridError> {
        if halo < HALF_LENGTH {
            return Err(GridError::HaloTooNarrow {
                halo,
                required: HALF_LENGTH,
            });
        }
        Self::new(dims, halo)
    }

    /// Interior extents.
    pub fn dims(&self) -> Dims3 {
        self.dims
    }

    /// Halo width on every side of every axis.
    pub fn halo(&self) -> usize {
        self.halo
    }

    /// Padded extents `[n1 + 2H, n2 + 2H, n3 + 2H]`.
    pub fn extent(&self) -> [usize; 3] {
        self.extent
    }

    /// Linear strides `[1, extent1, extent1 * extent2]`.
    pub fn strides(&self) -> [usize; 3] {
        self.strides
    }

    /// Number of elements in one constant-`k` plane.
    pub fn plane_len(&self) -> usize {
        self.strides[2]
    }

    /// Total number of elements, halo included.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`: every axis has at least one interior point.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Size of one buffer in bytes.
    pub fn bytes(&self) -> usize {
        self.len * std::mem::size_of::<f32>()
    }

    /// Linear offset of padded coordinate `(i, j, k)`.
    #[inline]
    pub fn index(&self, i: usize, j: usize, k: usize) -> usize {
        i + j * self.strides[1] + k * self.strides[2]
    }

    /// Padded coordinate of a linear offset.
    pub fn coords(&self, offset: usize) -> (usize, usize, usize) {
        let k = offset / self.strides[2];
        let rem = offset % self.strides[2];
        (rem % self.strides[1], rem / self.strides[1], k)
    }

    /// Padded index range of the interior along `axis`.
    pub fn interior(&self, axis: Axis) -> Range<usize> {
        self.halo..self.halo + self.dims.along(axis)
    }

    /// Whether padded coordinate `(i, j, k)` lies in the interior.
    pub fn is_interior(&self, i: usize, j: usize, k: usize) -> bool {
        self.interior(Axis::X).contains(&i)
            && self.interior(Axis::Y).contains(&j)
            && self.interior(Axis::Z).contains(&k)
    }
}

impl fmt::Display for PaddedLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (+{} halo, {}x{}x{} padded)",
            self.dims, self.halo, self.extent[0], self.extent[1], self.extent[2]
        )
    }
}
