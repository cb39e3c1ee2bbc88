//! Core block types.

use bytemuck::{Pod, Zeroable};
use glam::IVec3;
use serde::{Deserialize, Serialize};

/// Unique identifier for a block type.
///
/// Block ID 0 is reserved for air (empty space).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct BlockId(pub u8);

impl BlockId {
    /// Air block (empty space)
    pub const AIR: Self = Self(0);
    /// Grass block (terrain surface)
    pub const GRASS: Self = Self(1);
    /// Dirt block
    pub const DIRT: Self = Self(2);
    /// Stone block
    pub const STONE: Self = Self(3);
    /// Tree trunk block
    pub const WOOD: Self = Self(4);
    /// Tree foliage block (non-occluding)
    pub const LEAVES: Self = Self(5);
    /// Cloud block (non-occluding, decorative)
    pub const CLOUD: Self = Self(6);
    /// Iron ore block
    pub const IRON_ORE: Self = Self(7);
    /// Ruby ore block
    pub const RUBY_ORE: Self = Self(8);
    /// Emerald ore block
    pub const EMERALD_ORE: Self = Self(9);
    /// Gold ore block
    pub const GOLD_ORE: Self = Self(10);

    /// Returns true if this block is air (empty)
    #[inline]
    #[must_use]
    pub const fn is_air(self) -> bool {
        self.0 == 0
    }

    /// Returns true if this block is solid (not air)
    #[inline]
    #[must_use]
    pub const fn is_solid(self) -> bool {
        self.0 != 0
    }

    /// Returns true if this block fully covers its neighbors' faces.
    ///
    /// Leaves and clouds let light (and sight) through, so a cell adjacent
    /// to them must keep its geometry even when all six neighbors exist.
    #[inline]
    #[must_use]
    pub const fn occludes(self) -> bool {
        self.is_solid() && self.0 != Self::LEAVES.0 && self.0 != Self::CLOUD.0
    }

    /// Returns true if removing this block yields an item drop.
    ///
    /// Decorative blocks (clouds) vanish without a drop.
    #[inline]
    #[must_use]
    pub const fn drops_item(self) -> bool {
        self.is_solid() && self.0 != Self::CLOUD.0
    }
}

/// Read access to world block state.
///
/// Physics, drops, and targeting query solidity through this seam so they
/// stay independent of the chunk storage behind it. Unloaded regions read
/// as air rather than failing.
pub trait BlockSource {
    /// Block at a world cell.
    fn block_at(&self, cell: IVec3) -> BlockId;

    /// True if the cell holds any solid block.
    fn is_solid(&self, cell: IVec3) -> bool {
        self.block_at(cell).is_solid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_id_air() {
        assert!(BlockId::AIR.is_air());
        assert!(!BlockId::AIR.is_solid());
        assert!(!BlockId::AIR.occludes());
        assert!(!BlockId::AIR.drops_item());
    }

    #[test]
    fn block_id_solid() {
        assert!(!BlockId::STONE.is_air());
        assert!(BlockId::STONE.is_solid());
        assert!(BlockId::STONE.occludes());
    }

    #[test]
    fn non_occluding_blocks() {
        assert!(BlockId::LEAVES.is_solid());
        assert!(!BlockId::LEAVES.occludes());
        assert!(BlockId::LEAVES.drops_item());

        assert!(BlockId::CLOUD.is_solid());
        assert!(!BlockId::CLOUD.occludes());
        assert!(!BlockId::CLOUD.drops_item());
    }
}
