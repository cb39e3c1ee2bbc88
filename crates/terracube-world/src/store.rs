//! Chunk store with player-centered streaming.
//!
//! Owns every loaded chunk and routes world-coordinate block access to the
//! owning chunk. Streaming keeps a square of radius `render_distance`
//! loaded around the player and evicts chunks beyond `render_distance + 1`;
//! the one-chunk hysteresis band prevents load/unload thrashing at the
//! boundary.

use glam::IVec3;
use hashbrown::HashMap;
use noise::{Fbm, NoiseFn, Perlin};
use tracing::debug;

use terracube_core::constants::{LOCAL_Y_MAX, LOCAL_Y_MIN};
use terracube_core::coords::{split_world, ChunkPos};
use terracube_core::types::{BlockId, BlockSource};

use crate::chunk::Chunk;
use crate::edits::EditLog;
use crate::generation::{TerrainConfig, TerrainGenerator};

/// Configuration for chunk streaming behavior.
#[derive(Debug, Clone)]
pub struct StreamingConfig {
    /// Radius, in chunks, that must be loaded around the player.
    pub render_distance: i32,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self { render_distance: 3 }
    }
}

/// All loaded chunks, indexed by position.
pub struct ChunkStore<N = Fbm<Perlin>> {
    chunks: HashMap<ChunkPos, Chunk>,
    generator: TerrainGenerator<N>,
    config: StreamingConfig,
}

impl ChunkStore<Fbm<Perlin>> {
    /// Create a store with fractal Perlin terrain.
    #[must_use]
    pub fn new(seed: u32, terrain: TerrainConfig, config: StreamingConfig) -> Self {
        Self::with_generator(TerrainGenerator::new(seed, terrain), config)
    }
}

impl<N: NoiseFn<f64, 2>> ChunkStore<N> {
    /// Create a store around an explicit generator.
    #[must_use]
    pub fn with_generator(generator: TerrainGenerator<N>, config: StreamingConfig) -> Self {
        Self {
            chunks: HashMap::new(),
            generator,
            config,
        }
    }

    /// The terrain generator backing this store.
    #[must_use]
    pub fn generator(&self) -> &TerrainGenerator<N> {
        &self.generator
    }

    /// Stream chunks around the player's world XZ position.
    ///
    /// The load pass fills the full `render_distance` square; the eviction
    /// pass then removes anything with Euclidean chunk distance greater
    /// than `render_distance + 1`, which includes the square's own corners
    /// (at radius 3 they sit at distance sqrt(18) > 4, so they are created
    /// and immediately dropped). After this returns, exactly the loaded
    /// chunks within the Euclidean band remain. Evicted chunks drop their
    /// block map and mesh; their edits stay in the edit log.
    pub fn update(&mut self, player_x: f32, player_z: f32, edits: &EditLog) {
        let center = ChunkPos::containing(player_x.floor() as i32, player_z.floor() as i32);
        let radius = self.config.render_distance;

        for x in (center.x - radius)..=(center.x + radius) {
            for z in (center.z - radius)..=(center.z + radius) {
                let pos = ChunkPos::new(x, z);
                if !self.chunks.contains_key(&pos) {
                    self.load_chunk(pos, edits);
                }
            }
        }

        let max_distance = (radius + 1) as f32;
        let stale: Vec<ChunkPos> = self
            .chunks
            .keys()
            .filter(|pos| pos.distance(center) > max_distance)
            .copied()
            .collect();
        for pos in stale {
            self.chunks.remove(&pos);
            debug!(%pos, "unloaded chunk");
        }
    }

    fn load_chunk(&mut self, pos: ChunkPos, edits: &EditLog) {
        let mut chunk = self.generator.generate(pos);
        edits.apply(&mut chunk);
        chunk.rebuild_mesh();
        debug!(%pos, blocks = chunk.block_count(), "loaded chunk");
        self.chunks.insert(pos, chunk);
    }

    /// Regenerate every loaded chunk and replay `edits` on top.
    ///
    /// Needed after the edit log is replaced wholesale, e.g. when loading
    /// a save; `update` alone never touches chunks that are already in.
    pub fn reload(&mut self, edits: &EditLog) {
        for pos in self.loaded_positions() {
            self.chunks.remove(&pos);
            self.load_chunk(pos, edits);
        }
    }

    /// Block at a world cell; air when the owning chunk is not loaded or
    /// the cell lies outside the storable band.
    #[must_use]
    pub fn block_at(&self, cell: IVec3) -> BlockId {
        if cell.y < LOCAL_Y_MIN || cell.y > LOCAL_Y_MAX {
            return BlockId::AIR;
        }
        let (chunk_pos, local) = split_world(cell);
        self.chunks
            .get(&chunk_pos)
            .map_or(BlockId::AIR, |chunk| chunk.block(local))
    }

    /// Set the block at a world cell.
    ///
    /// The edit is recorded first so the mutation survives even if the
    /// chunk unloads before it is next seen. If the chunk is loaded, the
    /// block map is updated and the mesh rebuilt. Returns the previous
    /// block when this call removed a drop-yielding block, so the caller
    /// can spawn the pickup.
    pub fn set_block(
        &mut self,
        cell: IVec3,
        block: BlockId,
        edits: &mut EditLog,
    ) -> Option<BlockId> {
        if cell.y < LOCAL_Y_MIN || cell.y > LOCAL_Y_MAX {
            return None;
        }
        let (chunk_pos, local) = split_world(cell);
        edits.record(chunk_pos, local, block);

        let chunk = self.chunks.get_mut(&chunk_pos)?;
        let prev = chunk.block(local);
        chunk.set_block(local, block);
        chunk.rebuild_mesh();

        (block.is_air() && prev.drops_item()).then_some(prev)
    }

    /// Get a loaded chunk.
    #[must_use]
    pub fn chunk(&self, pos: ChunkPos) -> Option<&Chunk> {
        self.chunks.get(&pos)
    }

    /// Check if a chunk is currently loaded.
    #[must_use]
    pub fn contains(&self, pos: ChunkPos) -> bool {
        self.chunks.contains_key(&pos)
    }

    /// Positions of all loaded chunks.
    #[must_use]
    pub fn loaded_positions(&self) -> Vec<ChunkPos> {
        self.chunks.keys().copied().collect()
    }

    /// Number of loaded chunks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// True if no chunks are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

impl<N: NoiseFn<f64, 2>> BlockSource for ChunkStore<N> {
    fn block_at(&self, cell: IVec3) -> BlockId {
        Self::block_at(self, cell)
    }
}
