//! Durable record of player-caused block changes.
//!
//! Edits live for the whole process, independent of chunk load state: a
//! chunk that streams out and back in replays its edits on top of freshly
//! generated terrain. At most one edit is retained per local position.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use terracube_core::coords::{ChunkPos, LocalPos};
use terracube_core::types::BlockId;
use terracube_core::{Error, Result};

use crate::chunk::Chunk;

/// One persisted block change within a chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockEdit {
    /// Local position of the changed cell.
    pub pos: LocalPos,
    /// New block, possibly air for a removal.
    pub block: BlockId,
}

/// Per-chunk lists of deduplicated block edits.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct EditLog {
    edits: HashMap<ChunkPos, Vec<BlockEdit>>,
}

impl EditLog {
    /// Create an empty edit log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an edit, replacing any earlier edit at the same position.
    ///
    /// The replaced entry is removed and the new one appended, so each
    /// position appears at most once and replay has a single outcome per
    /// position regardless of order.
    pub fn record(&mut self, chunk: ChunkPos, pos: LocalPos, block: BlockId) {
        let list = self.edits.entry(chunk).or_default();
        list.retain(|edit| edit.pos != pos);
        list.push(BlockEdit { pos, block });
    }

    /// Edits recorded for a chunk, in insertion order.
    #[must_use]
    pub fn edits_for(&self, chunk: ChunkPos) -> &[BlockEdit] {
        self.edits.get(&chunk).map_or(&[], Vec::as_slice)
    }

    /// Replay all edits for a chunk over its generated terrain.
    pub fn apply(&self, chunk: &mut Chunk) {
        for edit in self.edits_for(chunk.pos) {
            chunk.set_block(edit.pos, edit.block);
        }
    }

    /// Number of chunks with recorded edits.
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.edits.len()
    }

    /// True if nothing has been edited.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Write the log to disk as a bincode snapshot.
    ///
    /// The file is rewritten wholesale; the log is small enough that an
    /// append format is not worth the complexity.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        bincode::serialize_into(BufWriter::new(file), self)
            .map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Read a log previously written with [`EditLog::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        bincode::deserialize_from(BufReader::new(file))
            .map_err(|e| Error::Serialization(e.to_string()))
    }
}
