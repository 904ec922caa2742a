use std::io::Write;

use super::OutputError;
use crate::pipeline::ChunkedDocument;

/// Plain chunk text separated by rule lines, for quick eyeballing.
pub(super) fn write(doc: &ChunkedDocument, w: &mut dyn Write) -> Result<(), OutputError> {
    for (i, c) in doc.chunks.iter().enumerate() {
        if i > 0 {
            writeln!(w, "\n---\n")?;
        }
        writeln!(w, "{}", c.text)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::chunked_fixture;

    #[test]
    fn separates_chunks_with_rules() {
        let doc = chunked_fixture("Plain text sentence one. Plain text sentence two.");
        let mut buf = Vec::new();
        write(&doc, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.matches("---").count(), doc.chunk_count.saturating_sub(1));
        assert!(text.contains("Plain text sentence one."));
    }
}
