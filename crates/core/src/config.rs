use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ChunkmillError;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

/// Immutable, validated chunking parameters.
///
/// `chunk_size` is the target maximum token count per chunk; `overlap_pct`
/// is the fraction of a chunk's tokens repeated at the start of the next
/// chunk. Constructed once, fixed per engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChunkConfig {
    chunk_size: usize,
    overlap_pct: f64,
}

impl ChunkConfig {
    pub const DEFAULT_CHUNK_SIZE: usize = 512;
    pub const DEFAULT_OVERLAP_PCT: f64 = 0.15;

    /// Validate and construct. Rejects `chunk_size == 0` and any
    /// `overlap_pct` outside `[0.0, 1.0)`.
    pub fn new(chunk_size: usize, overlap_pct: f64) -> Result<Self, ChunkmillError> {
        if chunk_size == 0 {
            return Err(ChunkmillError::InvalidConfig(
                "chunk_size must be a positive integer".to_string(),
            ));
        }
        if !overlap_pct.is_finite() || !(0.0..1.0).contains(&overlap_pct) {
            return Err(ChunkmillError::InvalidConfig(format!(
                "overlap_pct must be in [0.0, 1.0), got {overlap_pct}"
            )));
        }
        Ok(Self {
            chunk_size,
            overlap_pct,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn overlap_pct(&self) -> f64 {
        self.overlap_pct
    }

    /// Snapshot of the exact parameters, embedded in every chunk's metadata.
    pub fn snapshot(&self) -> IndexMap<String, serde_json::Value> {
        let mut map = IndexMap::new();
        map.insert("chunk_size".to_string(), self.chunk_size.into());
        map.insert(
            "overlap_pct".to_string(),
            serde_json::json!(self.overlap_pct),
        );
        map
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: Self::DEFAULT_CHUNK_SIZE,
            overlap_pct: Self::DEFAULT_OVERLAP_PCT,
        }
    }
}
