use std::io::Write;

use super::OutputError;
use crate::pipeline::ChunkedDocument;

/// Whole document as one pretty-printed JSON object.
pub(super) fn write_pretty(doc: &ChunkedDocument, w: &mut dyn Write) -> Result<(), OutputError> {
    serde_json::to_writer_pretty(&mut *w, doc)?;
    writeln!(w)?;
    Ok(())
}

/// One JSON object per chunk, newline-delimited.
pub(super) fn write_lines(doc: &ChunkedDocument, w: &mut dyn Write) -> Result<(), OutputError> {
    for chunk in &doc.chunks {
        serde_json::to_writer(&mut *w, chunk)?;
        writeln!(w)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::chunked_fixture;

    #[test]
    fn pretty_json_round_trips() {
        let doc = chunked_fixture("One sentence here. Another sentence there.");
        let mut buf = Vec::new();
        write_pretty(&doc, &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["document_id"], "doc_fixture");
        assert_eq!(value["chunks"].as_array().unwrap().len(), doc.chunk_count);
    }

    #[test]
    fn jsonl_emits_one_line_per_chunk() {
        let doc = chunked_fixture("One sentence here. Another sentence there.");
        let mut buf = Vec::new();
        write_lines(&doc, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), doc.chunk_count);
        for line in text.lines() {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value["id"].as_str().unwrap().starts_with("chunk_"));
        }
    }
}
