//! File-to-chunks orchestration: extract bytes, build a normalized
//! [`Document`], run the chunking engine, and package the result for the
//! output formatters.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::info;

use chunkmill_core::{
    Chunk, ChunkConfig, ChunkmillError, Document, DocumentMetadata, DocumentStructure,
    EntityRelationship, Section,
};

use crate::chunker::{ChunkingEngine, EntityPreserver};
use crate::extract::{self, ExtractionError, FileType};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),
    #[error("chunking error: {0}")]
    Chunking(#[from] ChunkmillError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything the formatters need for one processed document.
#[derive(Debug, Clone, Serialize)]
pub struct ChunkedDocument {
    pub document_id: String,
    pub source_file: PathBuf,
    pub document_type: String,
    pub chunk_count: usize,
    /// Document-level relationship triples between detected entities.
    pub relationships: Vec<EntityRelationship>,
    pub chunks: Vec<Chunk>,
}

/// Extract → normalize → chunk, for one file at a time.
pub struct Pipeline {
    engine: ChunkingEngine,
    preserver: EntityPreserver,
}

impl Pipeline {
    pub fn new(config: ChunkConfig) -> Self {
        Self::with_engine(ChunkingEngine::new(config))
    }

    pub fn with_engine(engine: ChunkingEngine) -> Self {
        Self {
            engine,
            preserver: EntityPreserver::new(),
        }
    }

    /// Process one file from disk.
    pub fn process_file(&self, path: &Path) -> Result<ChunkedDocument, PipelineError> {
        let bytes = fs::read(path)?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("input");
        self.process_bytes(&bytes, filename, path)
    }

    /// Process in-memory file bytes. `source_path` is recorded in metadata
    /// only; nothing is read from or written to disk.
    pub fn process_bytes(
        &self,
        bytes: &[u8],
        filename: &str,
        source_path: &Path,
    ) -> Result<ChunkedDocument, PipelineError> {
        let extracted = extract::extract_text(bytes, filename)?;
        let text = extracted.full_text();

        let digest = Sha256::digest(bytes);
        let hash = format!("{digest:x}");
        let id = format!("doc_{}", &hash[..12]);

        let entities = self.preserver.detect_entities(&text);
        let relationships = self.preserver.detect_entity_relationships(&text, &entities);
        let structure = derive_structure(&text, extracted.file_type);

        let document = Document {
            id,
            text,
            entities,
            metadata: DocumentMetadata {
                source_file: source_path.to_path_buf(),
                source_hash: hash,
                document_type: extracted.file_type.as_str().to_string(),
                processed_at: Utc::now(),
                processing_version: env!("CARGO_PKG_VERSION").to_string(),
            },
            structure,
        };

        let chunks = self.engine.process(&document)?;
        info!(
            document_id = %document.id,
            file = %source_path.display(),
            chunk_count = chunks.len(),
            relationship_count = relationships.len(),
            "document processed"
        );

        Ok(ChunkedDocument {
            document_id: document.id,
            source_file: document.metadata.source_file,
            document_type: document.metadata.document_type,
            chunk_count: chunks.len(),
            relationships,
            chunks,
        })
    }
}

/// Recover section structure from the normalized text. Only markdown
/// carries usable headings; other formats chunk unsectioned.
fn derive_structure(text: &str, file_type: FileType) -> DocumentStructure {
    if file_type != FileType::Md {
        return DocumentStructure::default();
    }

    let mut sections = Vec::new();
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        let trimmed = line.trim_start();
        let level = trimmed.chars().take_while(|c| *c == '#').count();
        if (1..=6).contains(&level) {
            let title = trimmed[level..].trim().trim_end_matches('#').trim();
            if !title.is_empty() {
                sections.push(Section {
                    title: title.to_string(),
                    start_offset: Some(offset),
                });
            }
        }
        offset += line.len();
    }
    DocumentStructure { sections }
}
