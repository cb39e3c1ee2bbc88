//! Error types for the engine.
//!
//! The simulation core itself never fails: unknown chunks read as air,
//! invalid placements are silent no-ops, and a fall out of the world is
//! recovered by respawn. These errors exist for the optional persistence
//! surface (saving and loading the edit log).

use thiserror::Error;

/// Engine-wide error type.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error, including corrupt or truncated saved data
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
