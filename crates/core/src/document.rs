use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::EntityReference;

/// A normalized document handed to the chunking engine.
///
/// Produced by the extraction/normalization stage; the engine borrows it
/// read-only for the duration of one `process` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Stable document identifier (content-hash derived by the pipeline).
    pub id: String,
    /// Full normalized document text as a single string.
    pub text: String,
    /// Already-known entity annotations (may be empty; the engine detects
    /// entities itself when none are supplied).
    pub entities: Vec<EntityReference>,
    pub metadata: DocumentMetadata,
    pub structure: DocumentStructure,
}

/// Provenance and processing metadata for a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub source_file: PathBuf,
    /// Hex-encoded SHA-256 of the source bytes.
    pub source_hash: String,
    /// Source format: "txt", "md", "csv", "pdf".
    pub document_type: String,
    pub processed_at: DateTime<Utc>,
    pub processing_version: String,
}

/// Structural outline of a document: an ordered list of sections.
///
/// When `sections` is non-empty, chunk boundaries never cross a section
/// boundary and each chunk carries the owning section title.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentStructure {
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    /// Byte offset where the section's body begins, when known. Sections
    /// without an offset are located by title match.
    pub start_offset: Option<usize>,
}

impl DocumentStructure {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
