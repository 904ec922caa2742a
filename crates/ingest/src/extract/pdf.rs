use super::{ExtractionError, Page};

/// Extract PDF text via pdf-extract. Page breaks come through as form
/// feeds; blank pages are dropped. OCR of scanned PDFs is out of scope, so
/// a PDF with no text layer yields an error rather than empty output.
pub(super) fn extract(bytes: &[u8]) -> Result<Vec<Page>, ExtractionError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    let pages: Vec<Page> = text
        .split('\u{c}')
        .enumerate()
        .filter_map(|(i, page_text)| {
            let trimmed = page_text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(Page {
                    number: i + 1,
                    text: trimmed.to_string(),
                })
            }
        })
        .collect();

    if pages.is_empty() {
        return Err(ExtractionError::Pdf(
            "no extractable text (scanned or empty PDF)".to_string(),
        ));
    }
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_an_error() {
        assert!(matches!(
            extract(b"not a pdf at all"),
            Err(ExtractionError::Pdf(_))
        ));
    }
}
