//! Sentence boundary detection.
//!
//! The boundary model (compiled regexes plus an abbreviation table) is
//! loaded lazily, process-wide, at most once; after the first successful
//! load it is read-only and shared by every segmenter instance and thread.
//! Failure policy: if the model cannot be built, every call fails fast
//! with `SegmenterUnavailable` — there is no silent heuristic fallback.

use std::collections::HashSet;

use once_cell::sync::OnceCell;
use regex::Regex;

use chunkmill_core::ChunkmillError;

static MODEL: OnceCell<SentenceModel> = OnceCell::new();

/// Tokens (lowercased, final dot stripped) that do not end a sentence.
const ABBREVIATIONS: &[&str] = &[
    "u.s", "u.k", "e.g", "i.e", "etc", "vs", "approx", "dr", "mr", "mrs", "ms", "prof", "jr",
    "sr", "st", "no", "fig", "inc", "ltd", "co", "dept", "est", "al",
];

/// Characters that may trail a terminal before the sentence truly ends.
const CLOSERS: &[char] = &['"', '\'', ')', ']', '\u{201d}', '\u{2019}'];

/// Characters that may open the following sentence.
const OPENERS: &[char] = &['"', '\'', '(', '[', '\u{201c}', '\u{2018}'];

/// A sentence's location in the source text, byte-offset half-open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SentenceSpan {
    pub start: usize,
    pub end: usize,
}

struct SentenceModel {
    terminal_re: Regex,
    paragraph_re: Regex,
    abbreviations: HashSet<&'static str>,
}

impl SentenceModel {
    fn load() -> Result<Self, ChunkmillError> {
        let terminal_re = Regex::new(r"[.!?]")
            .map_err(|e| ChunkmillError::SegmenterUnavailable(e.to_string()))?;
        let paragraph_re = Regex::new(r"\n[ \t]*\n")
            .map_err(|e| ChunkmillError::SegmenterUnavailable(e.to_string()))?;
        Ok(Self {
            terminal_re,
            paragraph_re,
            abbreviations: ABBREVIATIONS.iter().copied().collect(),
        })
    }

    /// If the terminal punctuation at byte `idx` ends a sentence, return
    /// the cut offset (one past the terminal and any closing quotes).
    fn sentence_cut(&self, text: &str, idx: usize) -> Option<usize> {
        let terminal = text[idx..].chars().next()?;

        if terminal == '.' {
            let prev = text[..idx].chars().next_back();
            let next = text[idx + 1..].chars().next();
            // Decimal numbers: "95.2%".
            if prev.is_some_and(|c| c.is_ascii_digit()) && next.is_some_and(|c| c.is_ascii_digit())
            {
                return None;
            }
            // Abbreviations and single-letter initials: "U.S.", "J. Smith".
            let token = trailing_token(&text[..idx]);
            if !token.is_empty() {
                if self.abbreviations.contains(token.to_lowercase().as_str()) {
                    return None;
                }
                if token.chars().count() == 1 && token.chars().all(|c| c.is_alphabetic()) {
                    return None;
                }
            }
        }

        // Closing quotes/brackets belong to the ending sentence.
        let mut cut = idx + terminal.len_utf8();
        for c in text[cut..].chars() {
            if CLOSERS.contains(&c) {
                cut += c.len_utf8();
            } else {
                break;
            }
        }

        if cut >= text.len() {
            return Some(cut);
        }
        if !text[cut..].chars().next().is_some_and(|c| c.is_whitespace()) {
            // Mid-token punctuation: "U.S.A", "example.com".
            return None;
        }
        match text[cut..].chars().find(|c| !c.is_whitespace()) {
            None => Some(cut),
            Some(c) if c.is_uppercase() || c.is_numeric() || OPENERS.contains(&c) => Some(cut),
            Some(_) => None,
        }
    }
}

/// The word-ish token immediately preceding `idx` (letters, digits and
/// interior dots, as in "U.S").
fn trailing_token(before: &str) -> &str {
    let start = before
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_alphanumeric() || *c == '.')
        .last()
        .map(|(i, _)| i);
    match start {
        Some(i) => &before[i..],
        None => "",
    }
}

/// Splits text into ordered sentences.
///
/// Stateless; all instances share the one process-wide boundary model.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceSegmenter;

impl SentenceSegmenter {
    pub fn new() -> Self {
        Self
    }

    fn model(&self) -> Result<&'static SentenceModel, ChunkmillError> {
        MODEL.get_or_try_init(SentenceModel::load)
    }

    /// Segment `text` into sentences, preserving original wording. Empty
    /// or whitespace-only input yields an empty vec. A single word with no
    /// terminal punctuation is one sentence.
    pub fn segment(&self, text: &str) -> Result<Vec<String>, ChunkmillError> {
        Ok(self
            .segment_spans(text)?
            .into_iter()
            .map(|s| text[s.start..s.end].to_string())
            .collect())
    }

    /// Like [`segment`](Self::segment) but returns byte spans into `text`,
    /// so callers can slice the original instead of copying.
    pub(crate) fn segment_spans(&self, text: &str) -> Result<Vec<SentenceSpan>, ChunkmillError> {
        let model = self.model()?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut cuts: Vec<usize> = Vec::new();
        for m in model.paragraph_re.find_iter(text) {
            cuts.push(m.start());
        }
        for m in model.terminal_re.find_iter(text) {
            if let Some(cut) = model.sentence_cut(text, m.start()) {
                cuts.push(cut);
            }
        }
        cuts.push(text.len());
        cuts.sort_unstable();
        cuts.dedup();

        let mut spans = Vec::new();
        let mut prev = 0;
        for cut in cuts {
            let seg = &text[prev..cut];
            let lead = seg.len() - seg.trim_start().len();
            let body = seg.trim();
            if !body.is_empty() {
                spans.push(SentenceSpan {
                    start: prev + lead,
                    end: prev + lead + body.len(),
                });
            }
            prev = cut;
        }
        Ok(spans)
    }
}
