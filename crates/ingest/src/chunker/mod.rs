//! The chunking core.
//!
//! Takes normalized document text plus entity annotations and produces an
//! ordered sequence of overlapping, size-bounded, entity-safe,
//! sentence-aware chunks with deterministic metadata.

mod engine;
mod entities;
mod quality;
mod segmenter;

pub use engine::ChunkingEngine;
pub use entities::{EntityError, EntityPreserver};
pub use quality::{HeuristicScorer, NoopScorer, QualityScorer};
pub use segmenter::SentenceSegmenter;
