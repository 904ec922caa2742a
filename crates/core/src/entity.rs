use serde::{Deserialize, Serialize};

/// A typed identifier reference detected in document text, e.g. `RISK-001`.
///
/// Offsets are byte positions into the same text the chunking engine
/// segments; `start_pos..end_pos` is half-open and always lies on char
/// boundaries when produced by the detector. Spans supplied by callers are
/// validated before use and may overlap each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityReference {
    /// Category label derived from the identifier prefix ("RISK", "CTRL", ...).
    pub entity_type: String,
    /// The canonical identifier string, e.g. "RISK-001".
    pub entity_id: String,
    /// Byte offset of the first character of the identifier.
    pub start_pos: usize,
    /// Byte offset one past the last character of the identifier.
    pub end_pos: usize,
    /// True when the identifier looks truncated or malformed.
    pub is_partial: bool,
    /// Short surrounding text for diagnostics.
    pub context_snippet: String,
}

impl EntityReference {
    /// Whether this entity's span lies entirely within `start..end`.
    pub fn contained_in(&self, start: usize, end: usize) -> bool {
        self.start_pos >= start && self.end_pos <= end
    }

    /// Whether a chunk boundary at `offset` would bisect this entity.
    pub fn split_by(&self, offset: usize) -> bool {
        offset > self.start_pos && offset < self.end_pos
    }
}

/// A directed relationship between two entities, e.g.
/// `("RISK-001", "mitigated_by", "CTRL-042")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRelationship {
    pub subject_id: String,
    /// Canonical relation label ("mitigated_by", "maps_to", ...).
    pub relation: String,
    pub object_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(start: usize, end: usize) -> EntityReference {
        EntityReference {
            entity_type: "RISK".to_string(),
            entity_id: "RISK-001".to_string(),
            start_pos: start,
            end_pos: end,
            is_partial: false,
            context_snippet: String::new(),
        }
    }

    #[test]
    fn containment_is_inclusive_of_exact_span() {
        let e = entity(10, 18);
        assert!(e.contained_in(10, 18));
        assert!(e.contained_in(0, 100));
        assert!(!e.contained_in(11, 18));
        assert!(!e.contained_in(10, 17));
    }

    #[test]
    fn split_detection_excludes_endpoints() {
        let e = entity(10, 18);
        assert!(!e.split_by(10));
        assert!(!e.split_by(18));
        assert!(e.split_by(11));
        assert!(e.split_by(17));
        assert!(!e.split_by(5));
    }
}
