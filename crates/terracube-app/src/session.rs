//! The per-frame game loop.
//!
//! A [`GameSession`] owns the chunk store, edit log, player, drops, and
//! inventory, and advances them together once per frame. Break and place
//! actions resolve against the target computed at the end of the previous
//! frame, which is the one the frontend highlighted on screen.

use std::path::Path;

use glam::Vec3;
use noise::{Fbm, NoiseFn, Perlin};
use tracing::debug;

use terracube_core::types::BlockId;
use terracube_core::Result;
use terracube_entity::{DropConfig, DropManager, Inventory};
use terracube_physics::player::{MoveInput, PhysicsConfig, Player, PlayerPhysics};
use terracube_physics::raycast::{pick_target, place_allowed, Target};
use terracube_world::edits::EditLog;
use terracube_world::generation::TerrainConfig;
use terracube_world::store::{ChunkStore, StreamingConfig};

use crate::camera::Camera;
use crate::input::InputSnapshot;

/// Eye height as a fraction of the player's full height.
const EYE_HEIGHT_FACTOR: f32 = 0.9;

/// Session-wide tuning.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Seed for terrain noise.
    pub world_seed: u32,
    /// Initial feet position.
    pub spawn: Vec3,
    /// Upper bound on a single frame's dt, in seconds. Long stalls (tab
    /// switches, debugger pauses) step the simulation by at most this much.
    pub max_frame_dt: f32,
    /// Reach of the break/place target ray.
    pub target_range: f32,
    /// Seed for drop ejection randomness; entropy when `None`.
    pub drop_seed: Option<u64>,
    pub terrain: TerrainConfig,
    pub streaming: StreamingConfig,
    pub physics: PhysicsConfig,
    pub drops: DropConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            world_seed: 42,
            spawn: Vec3::new(0.0, 30.0, 0.0),
            max_frame_dt: 0.1,
            target_range: 5.0,
            drop_seed: None,
            terrain: TerrainConfig::default(),
            streaming: StreamingConfig::default(),
            physics: PhysicsConfig::default(),
            drops: DropConfig::default(),
        }
    }
}

/// All live game state, stepped once per frame.
pub struct GameSession<N = Fbm<Perlin>> {
    store: ChunkStore<N>,
    edits: EditLog,
    drops: DropManager,
    inventory: Inventory,
    player: Player,
    physics: PlayerPhysics,
    camera: Camera,
    target: Option<Target>,
    sprinting: bool,
    config: SessionConfig,
}

impl GameSession<Fbm<Perlin>> {
    /// Create a session over fractal Perlin terrain.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        let store = ChunkStore::new(
            config.world_seed,
            config.terrain.clone(),
            config.streaming.clone(),
        );
        Self::with_store(config, store)
    }
}

impl<N: NoiseFn<f64, 2>> GameSession<N> {
    /// Create a session around an explicit chunk store. The `world_seed`,
    /// `terrain`, and `streaming` fields of `config` are ignored here;
    /// they only feed [`GameSession::new`].
    #[must_use]
    pub fn with_store(config: SessionConfig, mut store: ChunkStore<N>) -> Self {
        let edits = EditLog::new();
        store.update(config.spawn.x, config.spawn.z, &edits);

        let drops = match config.drop_seed {
            Some(seed) => DropManager::with_seed(config.drops.clone(), seed),
            None => DropManager::new(config.drops.clone()),
        };

        let eye = config.spawn + Vec3::Y * (config.physics.height * EYE_HEIGHT_FACTOR);
        Self {
            store,
            edits,
            drops,
            inventory: Inventory::new(),
            player: Player::new(config.spawn),
            physics: PlayerPhysics::new(config.physics.clone()),
            camera: Camera::new(eye),
            target: None,
            sprinting: false,
            config,
        }
    }

    /// Advance the session by one frame.
    pub fn frame(&mut self, input: &InputSnapshot, dt: f32) {
        let dt = dt.min(self.config.max_frame_dt);

        self.camera.set_orientation(input.yaw, input.pitch);

        if let Some(slot) = input.select_slot {
            self.inventory.select(slot);
        }

        // Sprint latches on keypress and clears once movement stops.
        if input.sprint_pressed {
            self.sprinting = true;
        }
        if !input.moving() {
            self.sprinting = false;
        }

        let movement = MoveInput {
            forward: input.forward,
            back: input.back,
            left: input.left,
            right: input.right,
            jump: input.jump,
            sprint: self.sprinting,
        };
        self.physics
            .step(&mut self.player, &self.store, &movement, self.camera.forward(), dt);
        self.camera.position = self.player.position
            + Vec3::Y * (self.physics.config().height * EYE_HEIGHT_FACTOR);

        if input.break_clicked {
            self.break_block();
        }
        if input.place_clicked {
            self.place_block();
        }

        self.drops
            .tick(dt, &self.store, self.player.position, &mut self.inventory);

        self.store
            .update(self.player.position.x, self.player.position.z, &self.edits);

        self.target = pick_target(
            &self.store,
            self.camera.position,
            self.camera.forward(),
            self.config.target_range,
        );
    }

    /// Remove the highlighted block, spawning a drop if it yields one.
    fn break_block(&mut self) {
        let Some(target) = self.target else { return };
        if let Some(removed) =
            self.store
                .set_block(target.highlight, BlockId::AIR, &mut self.edits)
        {
            self.drops.spawn(target.highlight, removed);
        }
    }

    /// Place the selected inventory block at the target cell.
    ///
    /// Placement is refused when the cell would overlap the player or when
    /// no block is selected; the inventory is only charged on success.
    fn place_block(&mut self) {
        let Some(target) = self.target else { return };
        let Some(stack) = self.inventory.selected_item() else {
            return;
        };

        let player_box = self.physics.player_aabb(self.player.position);
        if !place_allowed(target.place, &player_box) {
            debug!(cell = ?target.place, "placement rejected: overlaps player");
            return;
        }

        if self.inventory.consume_selected().is_some() {
            self.store.set_block(target.place, stack.block, &mut self.edits);
        }
    }

    /// Persist the edit log to disk.
    pub fn save_edits(&self, path: impl AsRef<Path>) -> Result<()> {
        self.edits.save(path)
    }

    /// Replace the edit log with one loaded from disk and reload every
    /// chunk so the edits take effect.
    pub fn load_edits(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.edits = EditLog::load(path)?;
        self.store.reload(&self.edits);
        Ok(())
    }

    #[must_use]
    pub fn store(&self) -> &ChunkStore<N> {
        &self.store
    }

    #[must_use]
    pub fn edits(&self) -> &EditLog {
        &self.edits
    }

    #[must_use]
    pub fn drops(&self) -> &DropManager {
        &self.drops
    }

    #[must_use]
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    #[must_use]
    pub fn player(&self) -> &Player {
        &self.player
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Break/place target from the last frame, if any block is in reach.
    #[must_use]
    pub fn target(&self) -> Option<Target> {
        self.target
    }

    #[must_use]
    pub fn is_sprinting(&self) -> bool {
        self.sprinting
    }
}
