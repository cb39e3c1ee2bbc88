//! Occlusion-culled mesh building.
//!
//! The mesh is a set of per-material instance batches: one unit cube per
//! surviving cell, translation only. A cell is dropped iff all six axis
//! neighbors exist and occlude it. Neighbor lookups stay within the chunk;
//! cells outside it read as air, so a face at a chunk boundary is always
//! emitted even when the adjacent chunk covers it. Known approximation,
//! kept for simplicity.

use glam::Vec3;
use hashbrown::HashMap;
use terracube_core::constants::{CHUNK_SIZE, LOCAL_Y_MAX, LOCAL_Y_MIN};
use terracube_core::coords::LocalPos;
use terracube_core::types::BlockId;

use crate::chunk::Chunk;

/// Instance transforms for one block material.
#[derive(Clone, Debug, Default)]
pub struct InstanceBatch {
    /// Material rendered by this batch.
    pub block: BlockId,
    /// Cell-center translations, one per instance.
    pub offsets: Vec<Vec3>,
}

/// Renderable output of a chunk: one batch per material present.
#[derive(Clone, Debug, Default)]
pub struct ChunkMesh {
    batches: Vec<InstanceBatch>,
}

impl ChunkMesh {
    /// All batches, ordered by block id.
    #[must_use]
    pub fn batches(&self) -> &[InstanceBatch] {
        &self.batches
    }

    /// Batch for a specific material, if any instances survived culling.
    #[must_use]
    pub fn batch(&self, block: BlockId) -> Option<&InstanceBatch> {
        self.batches.iter().find(|b| b.block == block)
    }

    /// Total instance count across all batches.
    #[must_use]
    pub fn instance_count(&self) -> usize {
        self.batches.iter().map(|b| b.offsets.len()).sum()
    }
}

/// Build the instance batches for a chunk's current block map.
#[must_use]
pub fn build_mesh(chunk: &Chunk) -> ChunkMesh {
    let mut by_block: HashMap<BlockId, Vec<Vec3>> = HashMap::new();

    for (pos, block) in chunk.blocks() {
        if block.occludes() && is_occluded(chunk, pos) {
            continue;
        }
        by_block
            .entry(block)
            .or_default()
            .push(Vec3::new(
                f32::from(pos.x) + 0.5,
                f32::from(pos.y) + 0.5,
                f32::from(pos.z) + 0.5,
            ));
    }

    let mut batches: Vec<InstanceBatch> = by_block
        .into_iter()
        .map(|(block, offsets)| InstanceBatch { block, offsets })
        .collect();
    batches.sort_by_key(|b| b.block.0);

    ChunkMesh { batches }
}

/// True if all six axis neighbors exist and fully cover this cell.
fn is_occluded(chunk: &Chunk, pos: LocalPos) -> bool {
    const NEIGHBORS: [(i32, i32, i32); 6] = [
        (1, 0, 0),
        (-1, 0, 0),
        (0, 1, 0),
        (0, -1, 0),
        (0, 0, 1),
        (0, 0, -1),
    ];

    NEIGHBORS.iter().all(|&(dx, dy, dz)| {
        neighbor_block(chunk, pos, dx, dy, dz).occludes()
    })
}

/// Same-chunk neighbor lookup; anything outside the chunk reads as air.
fn neighbor_block(chunk: &Chunk, pos: LocalPos, dx: i32, dy: i32, dz: i32) -> BlockId {
    let x = i32::from(pos.x) + dx;
    let y = i32::from(pos.y) + dy;
    let z = i32::from(pos.z) + dz;
    if x < 0 || x >= CHUNK_SIZE || z < 0 || z >= CHUNK_SIZE || y < LOCAL_Y_MIN || y > LOCAL_Y_MAX {
        return BlockId::AIR;
    }
    chunk.block(LocalPos::new(x as u8, y as i16, z as u8))
}

#[cfg(test)]
mod tests {
    use super::*;
    use terracube_core::coords::ChunkPos;

    fn chunk_with_block(pos: LocalPos, block: BlockId) -> Chunk {
        let mut chunk = Chunk::new(ChunkPos::new(0, 0));
        chunk.set_block(pos, block);
        chunk
    }

    fn surround(chunk: &mut Chunk, center: LocalPos, block: BlockId) {
        for (dx, dy, dz) in [
            (1, 0, 0),
            (-1, 0, 0),
            (0, 1, 0),
            (0, -1, 0),
            (0, 0, 1),
            (0, 0, -1),
        ] {
            let pos = LocalPos::new(
                (i32::from(center.x) + dx) as u8,
                (i32::from(center.y) + dy) as i16,
                (i32::from(center.z) + dz) as u8,
            );
            chunk.set_block(pos, block);
        }
    }

    #[test]
    fn lone_cell_is_emitted() {
        let chunk = chunk_with_block(LocalPos::new(8, 5, 8), BlockId::STONE);
        let mesh = build_mesh(&chunk);
        assert_eq!(mesh.instance_count(), 1);
        let batch = mesh.batch(BlockId::STONE).unwrap();
        assert_eq!(batch.offsets[0], Vec3::new(8.5, 5.5, 8.5));
    }

    #[test]
    fn buried_cell_is_culled() {
        let center = LocalPos::new(8, 5, 8);
        let mut chunk = chunk_with_block(center, BlockId::DIRT);
        surround(&mut chunk, center, BlockId::STONE);

        let mesh = build_mesh(&chunk);
        // Center culled; the six neighbors each have an exposed face.
        assert!(mesh.batch(BlockId::DIRT).is_none());
        assert_eq!(mesh.instance_count(), 6);
    }

    #[test]
    fn leaf_neighbor_prevents_culling() {
        let center = LocalPos::new(8, 5, 8);
        let mut chunk = chunk_with_block(center, BlockId::DIRT);
        surround(&mut chunk, center, BlockId::STONE);
        // Swap one occluder for leaves.
        chunk.set_block(LocalPos::new(9, 5, 8), BlockId::LEAVES);

        let mesh = build_mesh(&chunk);
        assert!(mesh.batch(BlockId::DIRT).is_some());
    }

    #[test]
    fn leaves_are_never_culled() {
        let center = LocalPos::new(8, 5, 8);
        let mut chunk = chunk_with_block(center, BlockId::LEAVES);
        surround(&mut chunk, center, BlockId::STONE);

        let mesh = build_mesh(&chunk);
        assert_eq!(mesh.batch(BlockId::LEAVES).unwrap().offsets.len(), 1);
    }

    #[test]
    fn chunk_edge_cells_are_emitted() {
        // Neighbor lookups do not cross chunk boundaries, so an edge cell
        // always keeps its geometry.
        let mut chunk = Chunk::new(ChunkPos::new(0, 0));
        chunk.set_block(LocalPos::new(0, 5, 8), BlockId::STONE);
        // Five in-chunk neighbors occlude; the -x neighbor is outside.
        for (x, y, z) in [(1, 5, 8), (0, 6, 8), (0, 4, 8), (0, 5, 9), (0, 5, 7)] {
            chunk.set_block(LocalPos::new(x, y, z), BlockId::STONE);
        }
        let mesh = build_mesh(&chunk);
        assert!(mesh
            .batch(BlockId::STONE)
            .unwrap()
            .offsets
            .contains(&Vec3::new(0.5, 5.5, 8.5)));
    }

    #[test]
    fn rebuild_replaces_batches() {
        let mut chunk = chunk_with_block(LocalPos::new(8, 5, 8), BlockId::STONE);
        chunk.rebuild_mesh();
        assert_eq!(chunk.mesh().instance_count(), 1);

        chunk.set_block(LocalPos::new(8, 5, 8), BlockId::AIR);
        chunk.rebuild_mesh();
        assert_eq!(chunk.mesh().instance_count(), 0);
    }
}
