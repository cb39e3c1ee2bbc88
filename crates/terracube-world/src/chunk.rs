//! Chunk data structure for voxel world storage.

use hashbrown::HashMap;
use terracube_core::coords::{ChunkPos, LocalKey, LocalPos};
use terracube_core::types::BlockId;

use crate::mesh::{self, ChunkMesh};

/// A single 16x16 column of the voxel world.
///
/// Blocks are stored sparsely: a key is present in the map iff its block is
/// nonzero, so absent entries read as air. The mesh is derived from the
/// block map and must be rebuilt after any mutation.
pub struct Chunk {
    /// Position in chunk coordinates.
    pub pos: ChunkPos,
    /// Sparse block storage keyed by packed local position.
    blocks: HashMap<LocalKey, BlockId>,
    /// Per-material instance batches derived from the block map.
    mesh: ChunkMesh,
}

impl Chunk {
    /// Create a new empty chunk at the given position.
    #[must_use]
    pub fn new(pos: ChunkPos) -> Self {
        Self {
            pos,
            blocks: HashMap::new(),
            mesh: ChunkMesh::default(),
        }
    }

    /// Block at a local position; air if absent.
    #[inline]
    #[must_use]
    pub fn block(&self, pos: LocalPos) -> BlockId {
        self.blocks.get(&pos.key()).copied().unwrap_or(BlockId::AIR)
    }

    /// Set the block at a local position.
    ///
    /// Writing air removes the entry, preserving the "absent means air"
    /// invariant. Does not rebuild the mesh; callers batch mutations and
    /// call [`Chunk::rebuild_mesh`] once.
    pub fn set_block(&mut self, pos: LocalPos, block: BlockId) {
        if block.is_air() {
            self.blocks.remove(&pos.key());
        } else {
            self.blocks.insert(pos.key(), block);
        }
    }

    /// Iterate over all occupied cells.
    pub fn blocks(&self) -> impl Iterator<Item = (LocalPos, BlockId)> + '_ {
        self.blocks.iter().map(|(key, block)| (key.pos(), *block))
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Check if this chunk is empty (all air).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Rebuild the mesh from the current block map, replacing the previous
    /// batches entirely.
    pub fn rebuild_mesh(&mut self) {
        self.mesh = mesh::build_mesh(self);
    }

    /// The current mesh.
    #[must_use]
    pub fn mesh(&self) -> &ChunkMesh {
        &self.mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_cell_reads_air() {
        let chunk = Chunk::new(ChunkPos::new(0, 0));
        assert_eq!(chunk.block(LocalPos::new(3, 7, 3)), BlockId::AIR);
        assert!(chunk.is_empty());
    }

    #[test]
    fn set_and_get() {
        let mut chunk = Chunk::new(ChunkPos::new(0, 0));
        let pos = LocalPos::new(1, -5, 2);
        chunk.set_block(pos, BlockId::STONE);
        assert_eq!(chunk.block(pos), BlockId::STONE);
        assert_eq!(chunk.block_count(), 1);
    }

    #[test]
    fn writing_air_removes_entry() {
        let mut chunk = Chunk::new(ChunkPos::new(0, 0));
        let pos = LocalPos::new(4, 12, 4);
        chunk.set_block(pos, BlockId::DIRT);
        chunk.set_block(pos, BlockId::AIR);
        assert_eq!(chunk.block(pos), BlockId::AIR);
        assert!(chunk.is_empty());
    }
}
