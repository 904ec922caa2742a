use std::io::Write;

use super::OutputError;
use crate::pipeline::ChunkedDocument;

const HEADER: &str = "id,position_index,section_context,token_count,word_count,entity_tags,text";

/// One row per chunk, RFC 4180 escaping.
pub(super) fn write(doc: &ChunkedDocument, w: &mut dyn Write) -> Result<(), OutputError> {
    writeln!(w, "{HEADER}")?;
    for c in &doc.chunks {
        writeln!(
            w,
            "{},{},{},{},{},{},{}",
            escape(&c.id),
            c.position_index,
            escape(c.section_context.as_deref().unwrap_or("")),
            c.token_count,
            c.word_count,
            escape(&c.metadata.entity_tags.join(";")),
            escape(&c.text),
        )?;
    }
    Ok(())
}

fn escape(field: &str) -> String {
    if field.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::chunked_fixture;

    #[test]
    fn header_and_row_count() {
        let doc = chunked_fixture("Row one sentence. Row two sentence.");
        let mut buf = Vec::new();
        write(&doc, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().next().unwrap(), HEADER);
        assert_eq!(text.lines().count(), doc.chunk_count + 1);
    }

    #[test]
    fn escaping_rules() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("has,comma"), "\"has,comma\"");
        assert_eq!(escape("has \"quote\""), "\"has \"\"quote\"\"\"");
        assert_eq!(escape("multi\nline"), "\"multi\nline\"");
    }

    #[test]
    fn commas_in_chunk_text_stay_quoted() {
        let doc = chunked_fixture("First clause, second clause, third clause end.");
        let mut buf = Vec::new();
        write(&doc, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert!(row.contains("\"First clause, second clause"));
    }
}
