//! chunkmill-ingest — document extraction and content chunking.
//!
//! Pipeline flow: source file → [`extract`] → normalized
//! [`Document`](chunkmill_core::Document) → [`chunker`] →
//! ordered [`Chunk`](chunkmill_core::Chunk) sequence → [`output`].

pub mod chunker;
pub mod extract;
pub mod output;
pub mod pipeline;

pub use chunker::{ChunkingEngine, EntityPreserver, SentenceSegmenter};
pub use pipeline::{ChunkedDocument, Pipeline};
