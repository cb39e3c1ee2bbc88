//! Procedural terrain generation.
//!
//! Height comes from a 2D coherent-noise field; each column is filled with
//! a layered material rule (stone, dirt band, grass cap, fixed gold seam,
//! random iron in deep stone), then a sparse tree pass decorates the
//! surface away from chunk edges.

use noise::{Fbm, NoiseFn, Perlin};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use terracube_core::constants::CHUNK_SIZE;
use terracube_core::coords::{ChunkPos, LocalPos};
use terracube_core::types::BlockId;

use crate::chunk::Chunk;

/// Terrain generator configuration.
#[derive(Debug, Clone)]
pub struct TerrainConfig {
    /// Lowest generated Y.
    pub min_y: i32,
    /// Horizontal noise sampling scale.
    pub noise_scale: f64,
    /// Height amplitude applied to the `[0, 2]`-shifted noise value.
    pub height_amplitude: f64,
    /// Constant height offset.
    pub height_base: f64,
    /// Thickness of the dirt band below the grass cap.
    pub dirt_depth: i32,
    /// Absolute Y of the gold seam.
    pub gold_layer_y: i32,
    /// Iron can replace stone strictly below this Y.
    pub iron_below_y: i32,
    /// Chance for a deep stone cell to become iron.
    pub iron_chance: f64,
    /// Per-column chance to plant a tree.
    pub tree_chance: f64,
    /// Columns closer than this to a chunk edge never get trees, so a
    /// canopy cannot spill into a neighboring chunk.
    pub tree_margin: i32,
    /// Trees only grow where the surface is above this height.
    pub tree_min_surface: i32,
    /// Inclusive trunk height range.
    pub trunk_height: (i32, i32),
    /// Seed for decoration randomness (ore and trees). `None` draws from
    /// entropy, making decoration non-reproducible across runs; terrain
    /// height is always deterministic for a given noise source.
    pub decoration_seed: Option<u64>,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            min_y: -11,
            noise_scale: 0.02,
            height_amplitude: 8.0,
            height_base: 4.0,
            dirt_depth: 2,
            gold_layer_y: -5,
            iron_below_y: -7,
            iron_chance: 0.5,
            tree_chance: 0.01,
            tree_margin: 3,
            tree_min_surface: 4,
            trunk_height: (4, 6),
            decoration_seed: None,
        }
    }
}

/// Procedural terrain generator.
///
/// Generic over the height noise source; production uses fractal Perlin
/// noise, tests inject a constant field for a flat world.
pub struct TerrainGenerator<N = Fbm<Perlin>> {
    config: TerrainConfig,
    height_noise: N,
}

impl TerrainGenerator<Fbm<Perlin>> {
    /// Create a generator with fractal Perlin height noise.
    #[must_use]
    pub fn new(seed: u32, config: TerrainConfig) -> Self {
        Self {
            config,
            height_noise: Fbm::new(seed),
        }
    }
}

impl<N: NoiseFn<f64, 2>> TerrainGenerator<N> {
    /// Create a generator with an explicit noise source.
    #[must_use]
    pub fn with_noise(height_noise: N, config: TerrainConfig) -> Self {
        Self {
            config,
            height_noise,
        }
    }

    /// Get the terrain configuration.
    #[must_use]
    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Surface height at world XZ coordinates.
    ///
    /// Noise returns `[-1, 1]`; shifted and scaled into an integer band
    /// (`[4, 20]` with the default configuration).
    #[must_use]
    pub fn height_at(&self, world_x: i32, world_z: i32) -> i32 {
        let nx = f64::from(world_x) * self.config.noise_scale;
        let nz = f64::from(world_z) * self.config.noise_scale;
        let noise = self.height_noise.get([nx, nz]);

        ((noise + 1.0) * self.config.height_amplitude + self.config.height_base).floor() as i32
    }

    /// Generate a chunk's block map at the given position.
    ///
    /// The returned chunk has no mesh yet; the caller replays edits and
    /// builds the mesh afterwards.
    #[must_use]
    pub fn generate(&self, pos: ChunkPos) -> Chunk {
        let mut chunk = Chunk::new(pos);
        let mut rng = self.decoration_rng(pos);
        let (ox, oz) = pos.origin();

        for x in 0..CHUNK_SIZE {
            for z in 0..CHUNK_SIZE {
                let h = self.height_at(ox + x, oz + z);

                for y in self.config.min_y..=h {
                    let block = self.column_block(y, h, &mut rng);
                    chunk.set_block(LocalPos::new(x as u8, y as i16, z as u8), block);
                }

                if self.tree_allowed(x, z, h) && rng.gen_bool(self.config.tree_chance) {
                    self.plant_tree(&mut chunk, &mut rng, x, h + 1, z);
                }
            }
        }

        chunk
    }

    /// Layered material rule for one cell, top-down precedence.
    fn column_block(&self, y: i32, surface: i32, rng: &mut StdRng) -> BlockId {
        let mut block = BlockId::STONE;
        if y >= surface - self.config.dirt_depth {
            block = BlockId::DIRT;
        }
        if y == surface {
            block = BlockId::GRASS;
        }
        if y == self.config.gold_layer_y {
            block = BlockId::GOLD_ORE;
        }
        // Iron only replaces plain stone, never the layers above it.
        if block == BlockId::STONE
            && y < self.config.iron_below_y
            && rng.gen_bool(self.config.iron_chance)
        {
            block = BlockId::IRON_ORE;
        }
        block
    }

    fn tree_allowed(&self, x: i32, z: i32, surface: i32) -> bool {
        let margin = self.config.tree_margin;
        x >= margin
            && x < CHUNK_SIZE - margin
            && z >= margin
            && z < CHUNK_SIZE - margin
            && surface > self.config.tree_min_surface
    }

    /// Plant a trunk topped by a shrinking foliage cluster.
    ///
    /// Corner cells of each foliage layer are randomly omitted for an
    /// organic silhouette; the trunk column is never overwritten below the
    /// top cell.
    fn plant_tree(&self, chunk: &mut Chunk, rng: &mut StdRng, x: i32, base_y: i32, z: i32) {
        let (min_h, max_h) = self.config.trunk_height;
        let height = rng.gen_range(min_h..=max_h);
        let top = base_y + height;

        for y in base_y..top {
            chunk.set_block(LocalPos::new(x as u8, y as i16, z as u8), BlockId::WOOD);
        }

        for y in (top - 3)..=top {
            let radius = if y >= top - 1 { 1 } else { 2 };
            for fx in (x - radius)..=(x + radius) {
                for fz in (z - radius)..=(z + radius) {
                    if fx == x && fz == z && y < top {
                        continue;
                    }
                    let corner = (fx - x).abs() == radius && (fz - z).abs() == radius;
                    if corner && (y > top - 2 || rng.gen_bool(0.3)) {
                        continue;
                    }
                    chunk.set_block(LocalPos::new(fx as u8, y as i16, fz as u8), BlockId::LEAVES);
                }
            }
        }
    }

    /// Decoration RNG: derived from the configured seed and chunk position
    /// when reproducibility was requested, fresh entropy otherwise.
    fn decoration_rng(&self, pos: ChunkPos) -> StdRng {
        self.config.decoration_seed.map_or_else(StdRng::from_entropy, |seed| {
            let mixed = seed
                ^ (pos.x as u32 as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
                ^ (pos.z as u32 as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F);
            StdRng::seed_from_u64(mixed)
        })
    }
}
