use super::{decode_utf8, ExtractionError, Page};

/// Flatten CSV rows into one line of text per record, fields separated by
/// a single space. Quoting and escaping are handled by the csv reader;
/// `flexible` tolerates ragged row lengths in real-world exports.
pub(super) fn extract(bytes: &[u8]) -> Result<Vec<Page>, ExtractionError> {
    let raw = decode_utf8(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(raw.as_bytes());

    let mut lines = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| ExtractionError::Csv(e.to_string()))?;
        let line = record
            .iter()
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !line.is_empty() {
            lines.push(line);
        }
    }

    Ok(vec![Page {
        number: 1,
        text: lines.join("\n"),
    }])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_become_lines() {
        let pages = extract(b"id,name\nRISK-001,Data breach\nRISK-002,Outage").unwrap();
        let text = &pages[0].text;
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("RISK-001 Data breach"));
    }

    #[test]
    fn quoted_fields_are_unescaped() {
        let pages = extract(b"a,b\n\"x, y\",\"he said \"\"hi\"\"\"").unwrap();
        assert!(pages[0].text.contains("x, y he said \"hi\""));
    }

    #[test]
    fn stray_quote_in_unquoted_field_is_kept() {
        let pages = extract(b"name,note\nalice,5\" tall\n").unwrap();
        assert!(pages[0].text.contains("alice 5\" tall"));
    }

    #[test]
    fn ragged_rows_are_tolerated() {
        let pages = extract(b"a,b,c\nonly,two").unwrap();
        assert_eq!(pages[0].text.lines().count(), 2);
        assert!(pages[0].text.contains("only two"));
    }

    #[test]
    fn empty_csv_yields_empty_text() {
        let pages = extract(b"").unwrap();
        assert_eq!(pages[0].text, "");
    }
}
