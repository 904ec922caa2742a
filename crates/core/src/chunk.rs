use std::path::PathBuf;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::entity::EntityReference;

/// One output unit of the chunking engine.
///
/// Created exactly once during `process`, never mutated afterwards. `text`
/// is always an exact slice of the source document text (including any
/// overlap repeated from the previous chunk), so coverage and overlap
/// invariants hold byte-for-byte.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Deterministic identifier: `chunk_{position_index:03}`.
    pub id: String,
    pub text: String,
    /// Back-reference to the source document.
    pub document_id: String,
    /// 0-based emission order within the document.
    pub position_index: usize,
    /// Byte offset in the document text where this chunk's text begins
    /// (start of the overlap region when overlap applies).
    pub char_start: usize,
    /// Byte offset one past the end of this chunk's text.
    pub char_end: usize,
    /// Approximate subword token count of `text`.
    pub token_count: usize,
    /// Whitespace-delimited word count of `text`.
    pub word_count: usize,
    /// Entity references whose span lies fully within `char_start..char_end`.
    pub entities: Vec<EntityReference>,
    /// Nearest enclosing section title, when the document declares structure.
    pub section_context: Option<String>,
    /// Optional quality score in [0.0, 1.0].
    pub quality_score: Option<f64>,
    /// Optional readability metrics keyed by metric name.
    pub readability_scores: Option<IndexMap<String, f64>>,
    pub metadata: ChunkMetadata,
}

/// Per-chunk provenance and reproducibility metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub source_file: PathBuf,
    pub source_hash: String,
    pub document_type: String,
    pub word_count: usize,
    pub token_count: usize,
    pub created_at: DateTime<Utc>,
    pub processing_version: String,
    /// Exact chunking parameters used, for reproducibility.
    pub config_snapshot: IndexMap<String, serde_json::Value>,
    /// Flattened list of entity types present in this chunk.
    pub entity_tags: Vec<String>,
    pub quality: Option<QualityReport>,
}

/// Nested quality assessment attached to chunk metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    /// Overall score in [0.0, 1.0].
    pub score: f64,
    /// Individual metrics keyed by name.
    pub metrics: IndexMap<String, f64>,
}
