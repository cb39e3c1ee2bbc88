//! Voxel collision, player physics, and targeting for the terracube sandbox.

pub mod player;
pub mod raycast;

pub use player::{MoveInput, PhysicsConfig, Player, PlayerPhysics};
pub use raycast::{pick_target, place_allowed, raycast, RaycastHit, Target};
