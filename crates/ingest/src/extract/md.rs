use super::{decode_utf8, Page};

/// Markdown extraction keeps the raw text; heading structure is recovered
/// later by the pipeline so section offsets refer to the normalized text.
pub(super) fn extract(bytes: &[u8]) -> Vec<Page> {
    vec![Page {
        number: 1,
        text: decode_utf8(bytes).trim().to_string(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_headings_in_text() {
        let pages = extract(b"# Title\n\nBody one.\n\n## Section\n\nBody two.");
        assert!(pages[0].text.contains("# Title"));
        assert!(pages[0].text.contains("Body two."));
    }

    #[test]
    fn empty_input_yields_empty_page() {
        let pages = extract(b"");
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].text, "");
    }
}
