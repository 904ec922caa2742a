//! Chunk assembly: sentence-greedy accumulation with entity-safe
//! boundaries, whole-sentence overlap, and section confinement.

use std::ops::Range;

use chrono::Utc;
use tracing::{debug, warn};
use unicode_segmentation::UnicodeSegmentation;

use chunkmill_core::{
    Chunk, ChunkConfig, ChunkMetadata, ChunkmillError, Document, EntityReference,
};

use super::entities::EntityPreserver;
use super::quality::{HeuristicScorer, QualityScorer};
use super::segmenter::{SentenceSegmenter, SentenceSpan};

/// Approximate subword token count (unicode word boundaries, so
/// "RISK-001" counts as two tokens).
pub(crate) fn token_count(text: &str) -> usize {
    text.unicode_words().count()
}

/// Whitespace-delimited word count.
pub(crate) fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Produces the ordered chunk sequence for one document.
///
/// Holds no per-call mutable state: one engine instance may be shared
/// across threads for document-level parallelism. Entity safety is
/// best-effort — malformed entity input degrades that document to
/// entity-unaware chunking with a warning instead of failing the call.
pub struct ChunkingEngine {
    config: ChunkConfig,
    segmenter: SentenceSegmenter,
    preserver: EntityPreserver,
    scorer: Box<dyn QualityScorer>,
}

impl ChunkingEngine {
    /// Engine with the production quality scorer.
    pub fn new(config: ChunkConfig) -> Self {
        Self::with_scorer(config, Box::new(HeuristicScorer))
    }

    /// Engine with an explicit quality-scoring capability (use
    /// [`NoopScorer`](super::quality::NoopScorer) to disable scoring).
    pub fn with_scorer(config: ChunkConfig, scorer: Box<dyn QualityScorer>) -> Self {
        Self {
            config,
            segmenter: SentenceSegmenter::new(),
            preserver: EntityPreserver::new(),
            scorer,
        }
    }

    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }

    /// Chunk one document. Deterministic: identical document and config
    /// yield identical chunk text, positions and entities (timestamps in
    /// metadata excepted). Empty text yields an empty sequence.
    pub fn process(&self, doc: &Document) -> Result<Vec<Chunk>, ChunkmillError> {
        if doc.text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let entities = self.resolve_entities(doc);
        let sections = resolve_sections(doc);

        let mut chunks = Vec::new();
        for (title, range) in sections {
            self.chunk_section(doc, &entities, title.as_deref(), range, &mut chunks)?;
        }

        debug!(
            document_id = %doc.id,
            chunk_count = chunks.len(),
            entity_count = entities.len(),
            "document chunked"
        );
        Ok(chunks)
    }

    /// Entity constraints for this document: supplied annotations when
    /// present, fresh detection otherwise. Malformed spans downgrade the
    /// document to entity-unaware chunking.
    fn resolve_entities(&self, doc: &Document) -> Vec<EntityReference> {
        let entities = if doc.entities.is_empty() {
            self.preserver.detect_entities(&doc.text)
        } else {
            doc.entities.clone()
        };

        match self.preserver.find_entity_gaps(&entities, &doc.text) {
            Ok(_gaps) => entities,
            Err(e) => {
                warn!(
                    document_id = %doc.id,
                    error = %e,
                    "entity detection failed; chunking proceeds entity-unaware"
                );
                Vec::new()
            }
        }
    }

    fn chunk_section(
        &self,
        doc: &Document,
        entities: &[EntityReference],
        section: Option<&str>,
        range: Range<usize>,
        chunks: &mut Vec<Chunk>,
    ) -> Result<(), ChunkmillError> {
        let spans = self
            .segmenter
            .segment_spans(&doc.text[range.clone()])
            .map_err(|e| ChunkmillError::chunking_failed(&doc.id, e))?;
        if spans.is_empty() {
            return Ok(());
        }

        // Shift spans to absolute document offsets.
        let sentences: Vec<SentenceSpan> = spans
            .into_iter()
            .map(|s| SentenceSpan {
                start: s.start + range.start,
                end: s.end + range.start,
            })
            .collect();
        let tokens: Vec<usize> = sentences
            .iter()
            .map(|s| token_count(&doc.text[s.start..s.end]))
            .collect();

        let chunk_size = self.config.chunk_size();
        let mut idx = 0; // first new sentence of the current chunk
        let mut text_start_idx = 0; // first sentence including overlap

        while idx < sentences.len() {
            // Greedy accumulation: the first new sentence always goes in,
            // even when it alone exceeds chunk_size (oversized chunks are
            // emitted whole, never truncated).
            let mut total: usize = tokens[text_start_idx..idx].iter().sum();
            let mut j = idx;
            while j < sentences.len() && (j == idx || total + tokens[j] <= chunk_size) {
                total += tokens[j];
                j += 1;
            }

            // Never finalize a boundary that bisects an entity span:
            // extend with whole sentences until the boundary is clear.
            while j < sentences.len()
                && entities.iter().any(|e| e.split_by(sentences[j - 1].end))
            {
                total += tokens[j];
                j += 1;
            }

            let char_start = sentences[text_start_idx].start;
            let char_end = sentences[j - 1].end;
            chunks.push(self.build_chunk(doc, entities, section, chunks.len(), char_start, char_end));

            if j >= sentences.len() {
                break;
            }

            // Overlap: repeat trailing whole sentences of this chunk whose
            // token sum reaches round(overlap_pct * chunk tokens), never
            // the entire chunk.
            let overlap_target = (self.config.overlap_pct() * total as f64).round() as usize;
            let available = j - text_start_idx;
            let mut k = 0;
            let mut acc = 0;
            while overlap_target > 0 && k + 1 < available && acc < overlap_target {
                acc += tokens[j - 1 - k];
                k += 1;
            }

            text_start_idx = j - k;
            idx = j;
        }
        Ok(())
    }

    fn build_chunk(
        &self,
        doc: &Document,
        entities: &[EntityReference],
        section: Option<&str>,
        position_index: usize,
        char_start: usize,
        char_end: usize,
    ) -> Chunk {
        let text = doc.text[char_start..char_end].to_string();
        let token_count = token_count(&text);
        let word_count = word_count(&text);

        let chunk_entities: Vec<EntityReference> = entities
            .iter()
            .filter(|e| e.contained_in(char_start, char_end))
            .cloned()
            .collect();
        let mut entity_tags: Vec<String> = Vec::new();
        for e in &chunk_entities {
            if !entity_tags.contains(&e.entity_type) {
                entity_tags.push(e.entity_type.clone());
            }
        }

        let quality = self.scorer.score(&text);

        Chunk {
            id: format!("chunk_{position_index:03}"),
            document_id: doc.id.clone(),
            position_index,
            char_start,
            char_end,
            token_count,
            word_count,
            entities: chunk_entities,
            section_context: section.map(str::to_string),
            quality_score: quality.as_ref().map(|q| q.score),
            readability_scores: quality.as_ref().map(|q| q.metrics.clone()),
            metadata: ChunkMetadata {
                source_file: doc.metadata.source_file.clone(),
                source_hash: doc.metadata.source_hash.clone(),
                document_type: doc.metadata.document_type.clone(),
                word_count,
                token_count,
                created_at: Utc::now(),
                processing_version: doc.metadata.processing_version.clone(),
                config_snapshot: self.config.snapshot(),
                entity_tags,
                quality,
            },
            text,
        }
    }
}

/// Resolve declared sections into ordered, non-overlapping text ranges.
/// Sections with no usable offset are located by title match; text before
/// the first section gets no section context. Without declared structure
/// the whole document is one unlabeled range.
fn resolve_sections(doc: &Document) -> Vec<(Option<String>, Range<usize>)> {
    let len = doc.text.len();
    if doc.structure.is_empty() {
        return vec![(None, 0..len)];
    }

    let mut starts: Vec<(String, usize)> = Vec::new();
    let mut cursor = 0;
    for s in &doc.structure.sections {
        let start = match s.start_offset {
            Some(o) if o <= len && doc.text.is_char_boundary(o) => o,
            _ => match doc.text[cursor..].find(&s.title) {
                Some(rel) => cursor + rel,
                None => continue,
            },
        };
        cursor = start;
        starts.push((s.title.clone(), start));
    }
    starts.sort_by_key(|(_, s)| *s);

    let mut ranges: Vec<(Option<String>, Range<usize>)> = Vec::new();
    if let Some((_, first)) = starts.first() {
        if *first > 0 {
            ranges.push((None, 0..*first));
        }
    }
    for (i, (title, start)) in starts.iter().enumerate() {
        let end = starts.get(i + 1).map(|(_, s)| *s).unwrap_or(len);
        if end > *start {
            ranges.push((Some(title.clone()), *start..end));
        }
    }
    if ranges.is_empty() {
        ranges.push((None, 0..len));
    }
    ranges
}
