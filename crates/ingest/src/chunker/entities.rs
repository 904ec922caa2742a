//! Typed-ID entity detection, boundary-safe gap finding, and
//! relationship extraction between co-located entities.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use chunkmill_core::{EntityReference, EntityRelationship};

/// Typed identifiers: an uppercase prefix, a hyphen, and digits
/// ("RISK-001", "CTRL-042", "POLICY-003").
static ENTITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Z][A-Z0-9]{1,9})-(\d{1,6})\b").expect("entity pattern"));

/// A dangling prefix with no digits ("RISK-" at a line end) — reported as
/// partial so downstream consumers can flag truncation.
static PARTIAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Z][A-Z0-9]{1,9})-(?:\s|$)").expect("partial pattern"));

/// Relationship surface phrases, longest first, with canonical labels.
/// Passive surface forms keep a passive canonical label: the subject is
/// the entity preceding the phrase in both voices, so "RISK-001 is
/// mitigated by CTRL-042" yields ("RISK-001", "mitigated_by", "CTRL-042").
const RELATION_PHRASES: &[(&str, &str)] = &[
    ("is mitigated by", "mitigated_by"),
    ("are mitigated by", "mitigated_by"),
    ("mitigated by", "mitigated_by"),
    ("mitigates", "mitigates"),
    ("is mapped to", "maps_to"),
    ("mapped to", "maps_to"),
    ("maps to", "maps_to"),
    ("maps_to", "maps_to"),
    ("implemented by", "implemented_by"),
    ("implements", "implements"),
    ("addresses", "addresses"),
    ("governed by", "governed_by"),
    ("governs", "governs"),
    ("refers to", "references"),
    ("references", "references"),
];

/// Max distance in bytes between a relationship phrase and each of the two
/// entities it connects.
const RELATION_WINDOW: usize = 60;

/// Bytes of context captured around a detected entity.
const SNIPPET_RADIUS: usize = 30;

static RELATION_RE: Lazy<Regex> = Lazy::new(|| {
    let alternation = RELATION_PHRASES
        .iter()
        .map(|(surface, _)| regex::escape(surface))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).expect("relation pattern")
});

/// Malformed entity input. Non-fatal: the chunking engine downgrades this
/// to a warning and proceeds entity-unaware for the affected document.
#[derive(Debug, Error)]
pub enum EntityError {
    #[error("inverted span for {entity_id}: {start_pos} > {end_pos}")]
    InvertedSpan {
        entity_id: String,
        start_pos: usize,
        end_pos: usize,
    },
    #[error("span for {entity_id} out of bounds: {end_pos} > text length {len}")]
    SpanOutOfBounds {
        entity_id: String,
        end_pos: usize,
        len: usize,
    },
    #[error("span for {entity_id} not on a char boundary: {start_pos}..{end_pos}")]
    MisalignedSpan {
        entity_id: String,
        start_pos: usize,
        end_pos: usize,
    },
}

/// Detects entity references and computes chunk-boundary constraints.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityPreserver;

impl EntityPreserver {
    pub fn new() -> Self {
        Self
    }

    /// Scan text for typed identifier references, in order of appearance.
    pub fn detect_entities(&self, text: &str) -> Vec<EntityReference> {
        let mut entities = Vec::new();

        for caps in ENTITY_RE.captures_iter(text) {
            let whole = caps.get(0).expect("match group 0");
            entities.push(EntityReference {
                entity_type: caps[1].to_string(),
                entity_id: whole.as_str().to_string(),
                start_pos: whole.start(),
                end_pos: whole.end(),
                is_partial: false,
                context_snippet: snippet(text, whole.start(), whole.end()),
            });
        }
        for caps in PARTIAL_RE.captures_iter(text) {
            let prefix = caps.get(1).expect("match group 1");
            entities.push(EntityReference {
                entity_type: prefix.as_str().to_string(),
                entity_id: format!("{}-", prefix.as_str()),
                start_pos: prefix.start(),
                end_pos: prefix.end() + 1,
                is_partial: true,
                context_snippet: snippet(text, prefix.start(), prefix.end() + 1),
            });
        }
        entities.sort_by_key(|e| (e.start_pos, e.end_pos));
        entities
    }

    /// Byte offsets where a chunk boundary may be placed without bisecting
    /// any entity span: for every pair of entities adjacent in sorted
    /// order, at least one offset strictly between them when a safe
    /// interval exists. Overlapping spans produce no gap for that pair.
    pub fn find_entity_gaps(
        &self,
        entity_refs: &[EntityReference],
        text: &str,
    ) -> Result<Vec<usize>, EntityError> {
        validate_spans(entity_refs, text)?;
        if entity_refs.len() < 2 {
            return Ok(Vec::new());
        }

        let mut sorted: Vec<&EntityReference> = entity_refs.iter().collect();
        sorted.sort_by_key(|e| (e.start_pos, e.end_pos));

        let mut gaps = Vec::new();
        for pair in sorted.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            if next.start_pos <= prev.end_pos {
                // Overlapping or touching spans: no safe interval.
                continue;
            }
            let candidate = ((prev.end_pos + 1)..next.start_pos).find(|&offset| {
                text.is_char_boundary(offset)
                    && entity_refs
                        .iter()
                        .all(|e| offset < e.start_pos || offset > e.end_pos)
            });
            if let Some(offset) = candidate {
                gaps.push(offset);
            }
        }
        gaps.dedup();
        Ok(gaps)
    }

    /// Find relationship triples where a keyword phrase bridges two
    /// entities from `entity_refs`. Entities mentioned in text but absent
    /// from `entity_refs` are ignored; duplicates are collapsed, first
    /// occurrence order preserved.
    pub fn detect_entity_relationships(
        &self,
        text: &str,
        entity_refs: &[EntityReference],
    ) -> Vec<EntityRelationship> {
        if entity_refs.is_empty() {
            return Vec::new();
        }
        let mut sorted: Vec<&EntityReference> = entity_refs.iter().collect();
        sorted.sort_by_key(|e| (e.start_pos, e.end_pos));

        let mut seen = std::collections::HashSet::new();
        let mut relationships = Vec::new();

        for m in RELATION_RE.find_iter(text) {
            let relation = canonical_relation(m.as_str());

            let subject = sorted
                .iter()
                .rev()
                .find(|e| e.end_pos <= m.start() && m.start() - e.end_pos <= RELATION_WINDOW);
            let object = sorted
                .iter()
                .find(|e| e.start_pos >= m.end() && e.start_pos - m.end() <= RELATION_WINDOW);

            if let (Some(subject), Some(object)) = (subject, object) {
                if subject.entity_id == object.entity_id {
                    continue;
                }
                let triple = EntityRelationship {
                    subject_id: subject.entity_id.clone(),
                    relation: relation.to_string(),
                    object_id: object.entity_id.clone(),
                };
                if seen.insert(triple.clone()) {
                    relationships.push(triple);
                }
            }
        }
        relationships
    }
}

fn canonical_relation(surface: &str) -> &'static str {
    let lowered = surface.to_lowercase();
    RELATION_PHRASES
        .iter()
        .find(|(s, _)| *s == lowered)
        .map(|(_, canonical)| *canonical)
        .unwrap_or("related_to")
}

fn validate_spans(entity_refs: &[EntityReference], text: &str) -> Result<(), EntityError> {
    for e in entity_refs {
        if e.start_pos > e.end_pos {
            return Err(EntityError::InvertedSpan {
                entity_id: e.entity_id.clone(),
                start_pos: e.start_pos,
                end_pos: e.end_pos,
            });
        }
        if e.end_pos > text.len() {
            return Err(EntityError::SpanOutOfBounds {
                entity_id: e.entity_id.clone(),
                end_pos: e.end_pos,
                len: text.len(),
            });
        }
        if !text.is_char_boundary(e.start_pos) || !text.is_char_boundary(e.end_pos) {
            return Err(EntityError::MisalignedSpan {
                entity_id: e.entity_id.clone(),
                start_pos: e.start_pos,
                end_pos: e.end_pos,
            });
        }
    }
    Ok(())
}

fn snippet(text: &str, start: usize, end: usize) -> String {
    let mut from = start.saturating_sub(SNIPPET_RADIUS);
    while from > 0 && !text.is_char_boundary(from) {
        from -= 1;
    }
    let mut to = (end + SNIPPET_RADIUS).min(text.len());
    while to < text.len() && !text.is_char_boundary(to) {
        to += 1;
    }
    text[from..to].trim().to_string()
}
