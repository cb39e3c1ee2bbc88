//! Physically simulated item pickups.
//!
//! Breaking a block ejects a drop with a small random sideways kick and an
//! upward launch. Drops fall under gravity, settle on top of solid blocks,
//! and are collected once the player comes within pickup range, but only
//! after a short minimum age, so a freshly broken block is not vacuumed up
//! before it ever appears.

use glam::{IVec3, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use terracube_core::types::{BlockId, BlockSource};
use tracing::trace;

/// Destination for collected drops.
///
/// Returns true only if the whole amount was absorbed; a drop whose item
/// was rejected stays in the world and is retried on later ticks.
pub trait ItemSink {
    /// Offer `count` units of `block`.
    fn try_add(&mut self, block: BlockId, count: u32) -> bool;
}

/// Drop simulation tuning.
#[derive(Debug, Clone)]
pub struct DropConfig {
    /// Downward acceleration, blocks per second squared.
    pub gravity: f32,
    /// Upward launch velocity on spawn.
    pub launch_velocity: f32,
    /// Maximum sideways speed on spawn, per horizontal axis.
    pub eject_speed: f32,
    /// Horizontal velocity multiplier applied while resting on ground.
    pub friction: f32,
    /// Half-height of the drop's cube, used for ground contact and rest
    /// height.
    pub half_height: f32,
    /// Distance within which the player collects a drop.
    pub pickup_range: f32,
    /// Minimum age in seconds before a drop can be picked up.
    pub pickup_delay: f32,
}

impl Default for DropConfig {
    fn default() -> Self {
        Self {
            gravity: 32.0,
            launch_velocity: 5.0,
            eject_speed: 1.0,
            friction: 0.9,
            half_height: 0.15,
            pickup_range: 2.0,
            pickup_delay: 0.5,
        }
    }
}

/// One item pickup in the world.
#[derive(Debug, Clone)]
pub struct Drop {
    /// Center position.
    pub position: Vec3,
    pub velocity: Vec3,
    /// Material this drop yields.
    pub block: BlockId,
    /// Seconds since spawn.
    pub age: f32,
}

/// Owns and simulates all live drops.
pub struct DropManager {
    drops: Vec<Drop>,
    config: DropConfig,
    rng: StdRng,
}

impl DropManager {
    /// Create a manager with entropy-seeded ejection randomness.
    #[must_use]
    pub fn new(config: DropConfig) -> Self {
        Self {
            drops: Vec::new(),
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a manager with seeded ejection randomness.
    #[must_use]
    pub fn with_seed(config: DropConfig, seed: u64) -> Self {
        Self {
            drops: Vec::new(),
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Spawn a drop at the center of the given cell.
    pub fn spawn(&mut self, cell: IVec3, block: BlockId) {
        let kick = self.config.eject_speed;
        let velocity = Vec3::new(
            self.rng.gen_range(-kick..=kick),
            self.config.launch_velocity,
            self.rng.gen_range(-kick..=kick),
        );
        self.drops.push(Drop {
            position: cell.as_vec3() + Vec3::splat(0.5),
            velocity,
            block,
            age: 0.0,
        });
    }

    /// Advance all drops one frame and collect the ones in player reach.
    pub fn tick(
        &mut self,
        dt: f32,
        world: &impl BlockSource,
        player_position: Vec3,
        inventory: &mut impl ItemSink,
    ) {
        let config = &self.config;

        self.drops.retain_mut(|drop| {
            drop.age += dt;
            drop.velocity.y -= config.gravity * dt;
            drop.position += drop.velocity * dt;

            // Ground contact just below the drop's underside.
            let below = Vec3::new(
                drop.position.x,
                drop.position.y - config.half_height,
                drop.position.z,
            );
            if world.is_solid(below.floor().as_ivec3()) {
                drop.velocity.y = 0.0;
                drop.velocity.x *= config.friction;
                drop.velocity.z *= config.friction;
                drop.position.y = (drop.position.y - 0.5).ceil() + config.half_height;
            }

            let in_range = drop.position.distance(player_position) < config.pickup_range;
            if in_range && drop.age >= config.pickup_delay {
                if inventory.try_add(drop.block, 1) {
                    trace!(block = drop.block.0, "drop picked up");
                    return false;
                }
                // Inventory full: the drop stays and is retried later.
            }
            true
        });
    }

    /// All live drops.
    #[must_use]
    pub fn drops(&self) -> &[Drop] {
        &self.drops
    }

    /// Number of live drops.
    #[must_use]
    pub fn len(&self) -> usize {
        self.drops.len()
    }

    /// True if no drops are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drops.is_empty()
    }
}
