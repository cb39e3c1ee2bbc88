//! Game session layer for the terracube sandbox.
//!
//! Composes the world, physics, and entity crates into a per-frame loop:
//! input in, one simulation step out. The session owns all game state and
//! is headless; a frontend only needs to feed it [`InputSnapshot`]s and
//! read back whatever it wants to draw.

pub mod camera;
pub mod input;
pub mod session;

pub use camera::Camera;
pub use input::InputSnapshot;
pub use session::{GameSession, SessionConfig};
