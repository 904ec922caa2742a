//! Chunk serializers. All on-disk encoding, escaping and file naming
//! lives here; the chunking core never touches the filesystem.

mod csv;
mod json;
mod markdown;
mod txt;

use std::io::Write;
use std::str::FromStr;

use thiserror::Error;

use crate::pipeline::ChunkedDocument;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Jsonl,
    Csv,
    Markdown,
    Txt,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
            OutputFormat::Csv => "csv",
            OutputFormat::Markdown => "md",
            OutputFormat::Txt => "txt",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            "csv" => Ok(OutputFormat::Csv),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            "txt" | "text" => Ok(OutputFormat::Txt),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

/// Serialize a chunked document to `w` in the requested format.
pub fn write_chunks(
    format: OutputFormat,
    doc: &ChunkedDocument,
    w: &mut dyn Write,
) -> Result<(), OutputError> {
    match format {
        OutputFormat::Json => json::write_pretty(doc, w),
        OutputFormat::Jsonl => json::write_lines(doc, w),
        OutputFormat::Csv => csv::write(doc, w),
        OutputFormat::Markdown => markdown::write(doc, w),
        OutputFormat::Txt => txt::write(doc, w),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::PathBuf;

    use chrono::Utc;
    use chunkmill_core::{ChunkConfig, Document, DocumentMetadata, DocumentStructure};

    use crate::chunker::{ChunkingEngine, EntityPreserver};
    use crate::pipeline::ChunkedDocument;

    /// Chunk a small fixture text through the real engine.
    pub(crate) fn chunked_fixture(text: &str) -> ChunkedDocument {
        let preserver = EntityPreserver::new();
        let entities = preserver.detect_entities(text);
        let relationships = preserver.detect_entity_relationships(text, &entities);
        let doc = Document {
            id: "doc_fixture".to_string(),
            text: text.to_string(),
            entities,
            metadata: DocumentMetadata {
                source_file: PathBuf::from("fixture.txt"),
                source_hash: "cafe".to_string(),
                document_type: "txt".to_string(),
                processed_at: Utc::now(),
                processing_version: "0.1.0".to_string(),
            },
            structure: DocumentStructure::default(),
        };
        let engine = ChunkingEngine::new(ChunkConfig::new(16, 0.0).unwrap());
        let chunks = engine.process(&doc).unwrap();
        ChunkedDocument {
            document_id: doc.id,
            source_file: doc.metadata.source_file,
            document_type: doc.metadata.document_type,
            chunk_count: chunks.len(),
            relationships,
            chunks,
        }
    }
}
