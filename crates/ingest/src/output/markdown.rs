use std::io::Write;

use super::OutputError;
use crate::pipeline::ChunkedDocument;

/// Human-readable review format: one heading per chunk with its metadata.
pub(super) fn write(doc: &ChunkedDocument, w: &mut dyn Write) -> Result<(), OutputError> {
    writeln!(w, "# Chunks for {}", doc.document_id)?;
    writeln!(w)?;
    writeln!(
        w,
        "Source: `{}` ({} chunks)",
        doc.source_file.display(),
        doc.chunk_count
    )?;

    for c in &doc.chunks {
        writeln!(w)?;
        writeln!(w, "## {}", c.id)?;
        writeln!(w)?;
        if let Some(section) = &c.section_context {
            writeln!(w, "- section: {section}")?;
        }
        writeln!(w, "- tokens: {} / words: {}", c.token_count, c.word_count)?;
        if !c.metadata.entity_tags.is_empty() {
            writeln!(w, "- entities: {}", c.metadata.entity_tags.join(", "))?;
        }
        writeln!(w)?;
        writeln!(w, "{}", c.text)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::chunked_fixture;

    #[test]
    fn renders_headings_per_chunk() {
        let doc = chunked_fixture("Markdown body sentence. Another body sentence.");
        let mut buf = Vec::new();
        write(&doc, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("# Chunks for doc_fixture"));
        assert_eq!(
            text.matches("## chunk_").count(),
            doc.chunk_count,
            "one heading per chunk"
        );
    }
}
