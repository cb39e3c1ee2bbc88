//! World generation, chunk storage, and streaming for the terracube sandbox.

pub mod chunk;
pub mod edits;
pub mod generation;
pub mod mesh;
pub mod store;

pub use chunk::Chunk;
pub use edits::{BlockEdit, EditLog};
pub use generation::{TerrainConfig, TerrainGenerator};
pub use mesh::{ChunkMesh, InstanceBatch};
pub use store::{ChunkStore, StreamingConfig};
