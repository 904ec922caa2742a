use super::{decode_utf8, Page};

pub(super) fn extract(bytes: &[u8]) -> Vec<Page> {
    vec![Page {
        number: 1,
        text: decode_utf8(bytes).trim().to_string(),
    }]
}
