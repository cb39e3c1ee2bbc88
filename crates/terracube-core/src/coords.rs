//! Coordinate systems for the voxel world.
//!
//! The world is divided into vertical chunk columns with a fixed 16x16
//! horizontal footprint. A world block coordinate splits into the column's
//! [`ChunkPos`] and a [`LocalPos`] within it; local positions bit-pack into
//! a [`LocalKey`] for use as a sparse block-map key.

use crate::constants::{CHUNK_SIZE, LOCAL_Y_MAX, LOCAL_Y_MIN};
use bytemuck::{Pod, Zeroable};
use glam::IVec3;
use serde::{Deserialize, Serialize};

/// Chunk column position in chunk coordinates.
///
/// A struct key with derived `Hash`/`Eq`; unlike stringified keys there is
/// no way for two distinct coordinate pairs to collide.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
#[repr(C)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    /// Create a new chunk position
    #[inline]
    #[must_use]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Chunk column containing the given world block X/Z.
    ///
    /// Uses floor division, so it is exact for negative coordinates.
    #[inline]
    #[must_use]
    pub const fn containing(world_x: i32, world_z: i32) -> Self {
        Self::new(world_x.div_euclid(CHUNK_SIZE), world_z.div_euclid(CHUNK_SIZE))
    }

    /// World block coordinate of this column's origin corner.
    #[inline]
    #[must_use]
    pub const fn origin(self) -> (i32, i32) {
        (self.x * CHUNK_SIZE, self.z * CHUNK_SIZE)
    }

    /// Euclidean distance to another column, in chunk units.
    #[inline]
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dz = (self.z - other.z) as f32;
        dx.hypot(dz)
    }
}

impl std::fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Position within a chunk column.
///
/// `x`/`z` range over `0..16`; `y` is a world Y within the storable band.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
#[repr(C)]
pub struct LocalPos {
    pub x: u8,
    pub z: u8,
    pub y: i16,
}

impl LocalPos {
    /// Create a new local position
    #[inline]
    #[must_use]
    pub const fn new(x: u8, y: i16, z: u8) -> Self {
        debug_assert!((x as i32) < CHUNK_SIZE);
        debug_assert!((z as i32) < CHUNK_SIZE);
        debug_assert!(y as i32 >= LOCAL_Y_MIN && y as i32 <= LOCAL_Y_MAX);
        Self { x, z, y }
    }

    /// Pack into a sparse block-map key.
    #[inline]
    #[must_use]
    pub const fn key(self) -> LocalKey {
        let y_biased = (self.y as i32 - LOCAL_Y_MIN) as u32;
        LocalKey((y_biased << 8) | ((self.z as u32) << 4) | self.x as u32)
    }
}

/// Bit-packed [`LocalPos`]: 4 bits X, 4 bits Z, 10 bits biased Y.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct LocalKey(u32);

impl LocalKey {
    /// Unpack back into a local position.
    #[inline]
    #[must_use]
    pub const fn pos(self) -> LocalPos {
        let x = (self.0 & 0xF) as u8;
        let z = ((self.0 >> 4) & 0xF) as u8;
        let y = ((self.0 >> 8) as i32 + LOCAL_Y_MIN) as i16;
        LocalPos { x, z, y }
    }
}

/// Split a world block coordinate into its chunk column and local position.
#[inline]
#[must_use]
pub fn split_world(block: IVec3) -> (ChunkPos, LocalPos) {
    let chunk = ChunkPos::containing(block.x, block.z);
    let local = LocalPos::new(
        block.x.rem_euclid(CHUNK_SIZE) as u8,
        block.y as i16,
        block.z.rem_euclid(CHUNK_SIZE) as u8,
    );
    (chunk, local)
}

/// Reassemble a world block coordinate from chunk column and local position.
#[inline]
#[must_use]
pub fn join_world(chunk: ChunkPos, local: LocalPos) -> IVec3 {
    let (ox, oz) = chunk.origin();
    IVec3::new(ox + i32::from(local.x), i32::from(local.y), oz + i32::from(local.z))
}
