use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChunkmillError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("sentence segmenter unavailable: {0}")]
    SegmenterUnavailable(String),

    #[error("chunking failed for document {document_id}: {source}")]
    ChunkingFailed {
        document_id: String,
        #[source]
        source: Box<ChunkmillError>,
    },

    #[error("serialization error: {0}")]
    Serialize(String),

    #[error("{0}")]
    Other(String),
}

impl ChunkmillError {
    /// Wrap an error as a chunking failure for the given document.
    pub fn chunking_failed(document_id: impl Into<String>, source: ChunkmillError) -> Self {
        ChunkmillError::ChunkingFailed {
            document_id: document_id.into(),
            source: Box::new(source),
        }
    }
}
