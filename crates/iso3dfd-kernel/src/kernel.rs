//! The [`StencilKernel`] trait and strategy selection.

use std::fmt;

use iso3dfd_core::KernelError;

use crate::blocked::BlockedKernel;
use crate::context::StencilContext;
use crate::direct::DirectKernel;
use crate::dispatch::Execution;
use crate::pointer_offset::PointerOffsetKernel;

/// One leapfrog update of every interior point.
///
/// # Contract
///
/// - Reads `prev`, `vel` and the old contents of `next`; writes only the
///   interior of `next`.
/// - Deterministic: a given kernel produces bit-identical output for
///   identical inputs, serial or parallel.
/// - `&self`: kernels hold configuration only.
///
/// This trait is object-safe; the driver stores a `Box<dyn StencilKernel>`.
pub trait StencilKernel: Send + Sync {
    /// Short name for logs and benchmark tables.
    fn name(&self) -> &str;

    /// Execute one step over the validated context.
    fn apply(&self, ctx: &mut StencilContext<'_>) -> Result<(), KernelError>;
}

/// Tile extents for [`KernelStrategy::Blocked`], in points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlockShape {
    /// Tile width along `i`.
    pub n1: usize,
    /// Tile height along `j`.
    pub n2: usize,
    /// Planes per z-slab.
    pub n3: usize,
}

impl BlockShape {
    /// Returns `Err(KernelError::InvalidBlockShape)` if any extent is zero.
    pub fn validate(&self) -> Result<(), KernelError> {
        if self.n1 == 0 || self.n2 == 0 || self.n3 == 0 {
            return Err(KernelError::InvalidBlockShape {
                shape: [self.n1, self.n2, self.n3],
            });
        }
        Ok(())
    }
}

impl Default for BlockShape {
    fn default() -> Self {
        Self {
            n1: 32,
            n2: 8,
            n3: 64,
        }
    }
}

/// Which traversal computes the stencil.
///
/// All strategies implement the same recurrence. `Direct` and
/// `PointerOffset` are bit-identical; `Blocked` sums the z pair first and
/// matches them up to rounding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KernelStrategy {
    /// Multi-dimensional indexed access.
    Direct,
    /// One linear offset per point, neighbours by precomputed strides.
    PointerOffset,
    /// Cache tiling with a rolling z window.
    Blocked(BlockShape),
}

impl KernelStrategy {
    /// Strategy name, as used in logs and benchmark tables.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::PointerOffset => "pointer_offset",
            Self::Blocked(_) => "blocked",
        }
    }

    /// Instantiate the kernel.
    ///
    /// Returns `Err(KernelError::InvalidBlockShape)` for a blocked
    /// strategy with a zero tile extent.
    pub fn build(self, execution: Execution) -> Result<Box<dyn StencilKernel>, KernelError> {
        Ok(match self {
            Self::Direct => Box::new(DirectKernel::new(execution)),
            Self::PointerOffset => Box::new(PointerOffsetKernel::new(execution)),
            Self::Blocked(shape) => Box::new(BlockedKernel::new(shape, execution)?),
        })
    }
}

impl Default for KernelStrategy {
    fn default() -> Self {
        Self::Blocked(BlockShape::default())
    }
}

impl fmt::Display for KernelStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blocked(b) => write!(f, "blocked({}x{}x{})", b.n1, b.n2, b.n3),
            other => f.write_str(other.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_blocked_32_8_64() {
        assert_eq!(
            KernelStrategy::default(),
            KernelStrategy::Blocked(BlockShape {
                n1: 32,
                n2: 8,
                n3: 64
            })
        );
    }

    #[test]
    fn zero_block_extent_rejected_at_build() {
        let s = KernelStrategy::Blocked(BlockShape { n1: 4, n2: 0, n3: 4 });
        match s.build(Execution::Serial) {
            Err(KernelError::InvalidBlockShape { shape: [4, 0, 4] }) => {}
            Err(other) => panic!("expected InvalidBlockShape, got {other:?}"),
            Ok(_) => panic!("expected InvalidBlockShape, got Ok"),
        }
    }

    #[test]
    fn built_kernels_report_strategy_name() {
        for s in [
            KernelStrategy::Direct,
            KernelStrategy::PointerOffset,
            KernelStrategy::default(),
        ] {
            assert_eq!(s.build(Execution::Serial).unwrap().name(), s.name());
        }
    }

    #[test]
    fn display_includes_block_shape() {
        assert_eq!(KernelStrategy::default().to_string(), "blocked(32x8x64)");
        assert_eq!(KernelStrategy::Direct.to_string(), "direct");
    }
}
