//! Core types, math, and traits for the terracube sandbox.
//!
//! This crate provides the foundational types used throughout the engine:
//! - Block types and material metadata
//! - Coordinate systems (world, chunk, local)
//! - AABB and ray math
//! - Common error types

pub mod coords;
pub mod error;
pub mod math;
pub mod types;

pub use coords::{ChunkPos, LocalKey, LocalPos};
pub use error::{Error, Result};
pub use math::{Aabb, Ray};
pub use types::{BlockId, BlockSource};

/// Engine-wide constants
pub mod constants {
    /// Horizontal size of a chunk column in blocks per axis.
    pub const CHUNK_SIZE: i32 = 16;
    /// Lowest local Y a chunk can store.
    pub const LOCAL_Y_MIN: i32 = -512;
    /// Highest local Y a chunk can store.
    pub const LOCAL_Y_MAX: i32 = 511;
}
