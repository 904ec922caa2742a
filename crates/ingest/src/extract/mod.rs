//! Format-specific extractors producing raw text pages from file bytes.

mod csv;
mod md;
mod pdf;
mod txt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("PDF extraction failed: {0}")]
    Pdf(String),
    #[error("CSV extraction failed: {0}")]
    Csv(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Recognized input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Txt,
    Md,
    Csv,
    Pdf,
}

impl FileType {
    /// Map a filename extension to a file type.
    pub fn from_filename(filename: &str) -> Result<Self, ExtractionError> {
        let ext = filename.rsplit('.').next().unwrap_or("").to_lowercase();
        match ext.as_str() {
            "txt" | "text" => Ok(FileType::Txt),
            "md" | "markdown" => Ok(FileType::Md),
            "csv" => Ok(FileType::Csv),
            "pdf" => Ok(FileType::Pdf),
            other => Err(ExtractionError::UnsupportedType(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Txt => "txt",
            FileType::Md => "md",
            FileType::Csv => "csv",
            FileType::Pdf => "pdf",
        }
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A page of extracted text. Only PDFs produce more than one.
#[derive(Debug, Clone)]
pub struct Page {
    /// 1-based page number.
    pub number: usize,
    pub text: String,
}

/// Raw extraction result, before normalization into a `Document`.
#[derive(Debug, Clone)]
pub struct ExtractedFile {
    pub filename: String,
    pub file_type: FileType,
    pub pages: Vec<Page>,
}

impl ExtractedFile {
    /// All page text joined with blank lines.
    pub fn full_text(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Extract text from file bytes, dispatching on the filename extension.
pub fn extract_text(bytes: &[u8], filename: &str) -> Result<ExtractedFile, ExtractionError> {
    let file_type = FileType::from_filename(filename)?;
    let pages = match file_type {
        FileType::Txt => txt::extract(bytes),
        FileType::Md => md::extract(bytes),
        FileType::Csv => csv::extract(bytes)?,
        FileType::Pdf => pdf::extract(bytes)?,
    };

    Ok(ExtractedFile {
        filename: filename.to_string(),
        file_type,
        pages,
    })
}

/// Decode bytes as UTF-8, replacing invalid sequences.
pub(crate) fn decode_utf8(bytes: &[u8]) -> String {
    String::from_utf8(bytes.to_vec()).unwrap_or_else(|_| String::from_utf8_lossy(bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_on_extension() {
        assert_eq!(FileType::from_filename("a.txt").unwrap(), FileType::Txt);
        assert_eq!(FileType::from_filename("a.markdown").unwrap(), FileType::Md);
        assert_eq!(FileType::from_filename("A.CSV").unwrap(), FileType::Csv);
        assert_eq!(FileType::from_filename("report.pdf").unwrap(), FileType::Pdf);
    }

    #[test]
    fn rejects_unknown_extensions() {
        let err = FileType::from_filename("deck.pptx").unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedType(ref e) if e == "pptx"));
        assert!(FileType::from_filename("book.docx").is_err());
        assert!(FileType::from_filename("sheet.xlsx").is_err());
        assert!(FileType::from_filename("noext").is_err());
    }

    #[test]
    fn full_text_joins_pages() {
        let doc = ExtractedFile {
            filename: "x.pdf".to_string(),
            file_type: FileType::Pdf,
            pages: vec![
                Page {
                    number: 1,
                    text: "First.".to_string(),
                },
                Page {
                    number: 2,
                    text: "Second.".to_string(),
                },
            ],
        };
        assert_eq!(doc.full_text(), "First.\n\nSecond.");
    }
}
