//! Player kinematics and per-axis voxel collision.
//!
//! Movement integrates continuously with discrete per-axis resolution: a
//! candidate position is tried on X, then Z, then Y, and any axis whose
//! swept box overlaps a solid cell is rejected with that axis's velocity
//! zeroed. Resolving one axis at a time lets the player slide along walls;
//! it is not exact at corners, which is accepted.

use glam::{IVec3, Vec3};
use terracube_core::math::Aabb;
use terracube_core::types::BlockSource;
use tracing::info;

/// Held movement state for one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveInput {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub sprint: bool,
}

/// Player movement tuning.
#[derive(Debug, Clone)]
pub struct PhysicsConfig {
    /// Downward acceleration, blocks per second squared.
    pub gravity: f32,
    /// Vertical velocity applied on jump.
    pub jump_impulse: f32,
    /// Walking speed, blocks per second.
    pub walk_speed: f32,
    /// Speed multiplier while sprinting.
    pub sprint_multiplier: f32,
    /// Exponential horizontal damping rate.
    pub damping: f32,
    /// Half-width of the player box.
    pub radius: f32,
    /// Height of the player box, feet to crown.
    pub height: f32,
    /// Falling below this Y triggers the respawn guard.
    pub kill_y: f32,
    /// Respawn position after falling out of the world.
    pub respawn: Vec3,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 32.0,
            jump_impulse: 10.0,
            walk_speed: 5.0,
            sprint_multiplier: 1.8,
            damping: 10.0,
            radius: 0.3,
            height: 1.7,
            kill_y: -30.0,
            respawn: Vec3::new(0.0, 40.0, 0.0),
        }
    }
}

/// Player kinematic state. Position is at the feet.
#[derive(Debug, Clone)]
pub struct Player {
    pub position: Vec3,
    pub velocity: Vec3,
    pub grounded: bool,
}

impl Player {
    /// Create a player at rest at the given feet position.
    #[must_use]
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            grounded: false,
        }
    }
}

/// Physics stepper for the player.
pub struct PlayerPhysics {
    config: PhysicsConfig,
}

impl PlayerPhysics {
    /// Create a stepper with the given tuning.
    #[must_use]
    pub fn new(config: PhysicsConfig) -> Self {
        Self { config }
    }

    /// The movement tuning.
    #[must_use]
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Player bounding box with feet at `position`.
    #[must_use]
    pub fn player_aabb(&self, position: Vec3) -> Aabb {
        let r = self.config.radius;
        Aabb::new(
            Vec3::new(position.x - r, position.y, position.z - r),
            Vec3::new(position.x + r, position.y + self.config.height, position.z + r),
        )
    }

    /// Advance the player one frame.
    ///
    /// `camera_forward` is the camera's view direction; only its horizontal
    /// projection drives movement.
    pub fn step(
        &self,
        player: &mut Player,
        world: &impl BlockSource,
        input: &MoveInput,
        camera_forward: Vec3,
        dt: f32,
    ) {
        let cfg = &self.config;

        player.velocity.y -= cfg.gravity * dt;

        let forward = Vec3::new(camera_forward.x, 0.0, camera_forward.z).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();

        let mut dir = Vec3::ZERO;
        if input.forward {
            dir += forward;
        }
        if input.back {
            dir -= forward;
        }
        if input.right {
            dir += right;
        }
        if input.left {
            dir -= right;
        }
        let dir = dir.normalize_or_zero();

        // Frame-rate-independent smoothing: damp toward zero, then
        // accelerate toward the intent. Never assign velocity directly.
        let accel = cfg.damping * dt;
        player.velocity.x -= player.velocity.x * accel;
        player.velocity.z -= player.velocity.z * accel;

        let speed = if input.sprint {
            cfg.walk_speed * cfg.sprint_multiplier
        } else {
            cfg.walk_speed
        };
        player.velocity.x += dir.x * speed * accel;
        player.velocity.z += dir.z * speed * accel;

        if input.jump && player.grounded {
            player.velocity.y = cfg.jump_impulse;
            player.grounded = false;
        }

        let delta = player.velocity * dt;

        let next_x = player.position + Vec3::new(delta.x, 0.0, 0.0);
        if self.collides(world, next_x) {
            player.velocity.x = 0.0;
        } else {
            player.position = next_x;
        }

        let next_z = player.position + Vec3::new(0.0, 0.0, delta.z);
        if self.collides(world, next_z) {
            player.velocity.z = 0.0;
        } else {
            player.position = next_z;
        }

        let next_y = player.position + Vec3::new(0.0, delta.y, 0.0);
        if self.collides(world, next_y) {
            if player.velocity.y < 0.0 {
                player.grounded = true;
            }
            player.velocity.y = 0.0;
        } else {
            player.position = next_y;
            player.grounded = false;
        }

        // Recovery for falling out of loaded terrain, not an error.
        if player.position.y < cfg.kill_y {
            info!(y = player.position.y, "player fell out of the world, respawning");
            player.position = cfg.respawn;
            player.velocity = Vec3::ZERO;
        }
    }

    /// True if the player box at `position` overlaps any solid cell.
    #[must_use]
    pub fn collides(&self, world: &impl BlockSource, position: Vec3) -> bool {
        let cfg = &self.config;
        let min_x = (position.x - cfg.radius).floor() as i32;
        let max_x = (position.x + cfg.radius).floor() as i32;
        let min_y = position.y.floor() as i32;
        let max_y = (position.y + cfg.height).floor() as i32;
        let min_z = (position.z - cfg.radius).floor() as i32;
        let max_z = (position.z + cfg.radius).floor() as i32;

        for x in min_x..=max_x {
            for y in min_y..=max_y {
                for z in min_z..=max_z {
                    if world.is_solid(IVec3::new(x, y, z)) {
                        return true;
                    }
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terracube_core::types::BlockId;

    /// Infinite flat floor: solid at and below `top`.
    struct Floor {
        top: i32,
    }

    impl BlockSource for Floor {
        fn block_at(&self, cell: IVec3) -> BlockId {
            if cell.y <= self.top {
                BlockId::STONE
            } else {
                BlockId::AIR
            }
        }
    }

    /// Solid everywhere except a one-cell-wide column of air.
    struct Pocket {
        air_x: i32,
        air_z: i32,
        air_y_min: i32,
        air_y_max: i32,
    }

    impl BlockSource for Pocket {
        fn block_at(&self, cell: IVec3) -> BlockId {
            let inside = cell.x == self.air_x
                && cell.z == self.air_z
                && cell.y >= self.air_y_min
                && cell.y <= self.air_y_max;
            if inside {
                BlockId::AIR
            } else {
                BlockId::STONE
            }
        }
    }

    fn physics() -> PlayerPhysics {
        PlayerPhysics::new(PhysicsConfig::default())
    }

    #[test]
    fn falls_and_lands_on_floor() {
        let world = Floor { top: 12 };
        let physics = physics();
        let mut player = Player::new(Vec3::new(0.5, 20.0, 0.5));

        for _ in 0..240 {
            physics.step(&mut player, &world, &MoveInput::default(), Vec3::NEG_Z, 1.0 / 60.0);
        }

        assert!(player.grounded);
        assert_eq!(player.velocity.y, 0.0);
        // Feet come to rest just above the floor top at y = 13.
        assert!(player.position.y >= 13.0 && player.position.y < 13.5);
    }

    #[test]
    fn enclosed_player_cannot_escape() {
        // Air pocket exactly two cells tall; every surrounding cell is
        // solid.
        let world = Pocket {
            air_x: 0,
            air_z: 0,
            air_y_min: 10,
            air_y_max: 11,
        };
        let physics = physics();
        let center = Vec3::new(0.5, 10.1, 0.5);
        assert!(!physics.collides(&world, center));

        // Every direction tried collides.
        for dir in [
            Vec3::X,
            Vec3::NEG_X,
            Vec3::Z,
            Vec3::NEG_Z,
            Vec3::Y,
            Vec3::NEG_Y,
        ] {
            assert!(
                physics.collides(&world, center + dir),
                "no collision toward {dir}"
            );
        }

        // Stepping with any held input leaves the player inside the pocket.
        for input in [
            MoveInput { forward: true, ..MoveInput::default() },
            MoveInput { back: true, ..MoveInput::default() },
            MoveInput { left: true, ..MoveInput::default() },
            MoveInput { right: true, ..MoveInput::default() },
            MoveInput { jump: true, ..MoveInput::default() },
        ] {
            let mut player = Player::new(center);
            player.grounded = true;
            for _ in 0..120 {
                physics.step(&mut player, &world, &input, Vec3::NEG_Z, 1.0 / 60.0);
            }
            assert!(
                !physics.collides(&world, player.position),
                "clipped into a wall with input {input:?}"
            );
            assert!(player.position.x > 0.29 && player.position.x < 0.71);
            assert!(player.position.z > 0.29 && player.position.z < 0.71);
            assert!(player.position.y >= 10.0 && player.position.y < 10.4);
        }
    }

    #[test]
    fn jump_from_ground() {
        let world = Floor { top: 12 };
        let physics = physics();
        let mut player = Player::new(Vec3::new(0.5, 13.01, 0.5));
        player.grounded = true;

        let input = MoveInput { jump: true, ..MoveInput::default() };
        physics.step(&mut player, &world, &input, Vec3::NEG_Z, 1.0 / 60.0);

        assert!(!player.grounded);
        assert!(player.velocity.y > 0.0);
        assert!(player.position.y > 13.01);
    }

    #[test]
    fn walls_allow_sliding() {
        // Wall along +x; pushing diagonally into it still moves on z.
        struct Wall;
        impl BlockSource for Wall {
            fn block_at(&self, cell: IVec3) -> BlockId {
                if cell.x >= 1 {
                    BlockId::STONE
                } else {
                    BlockId::AIR
                }
            }
        }

        let physics = physics();
        let mut player = Player::new(Vec3::new(0.5, 10.0, 0.5));
        // Camera faces +x so "forward" presses into the wall and "right"
        // runs along it.
        let input = MoveInput { forward: true, right: true, ..MoveInput::default() };
        for _ in 0..30 {
            physics.step(&mut player, &Wall, &input, Vec3::X, 1.0 / 60.0);
        }

        assert!(player.position.x < 0.7, "pushed through the wall");
        assert!(player.position.z > 0.6, "failed to slide along the wall");
    }

    #[test]
    fn respawns_after_falling_out() {
        struct Void;
        impl BlockSource for Void {
            fn block_at(&self, _cell: IVec3) -> BlockId {
                BlockId::AIR
            }
        }

        let physics = physics();
        let mut player = Player::new(Vec3::new(5.0, -29.9, 5.0));
        player.velocity.y = -20.0;

        physics.step(&mut player, &Void, &MoveInput::default(), Vec3::NEG_Z, 0.1);

        assert_eq!(player.position, PhysicsConfig::default().respawn);
        assert_eq!(player.velocity, Vec3::ZERO);
    }
}
