//! Strip presentation artifacts from a raw model reply.
//!
//! Models like to wrap JSON in a fenced code block (```` ```json ... ``` ````)
//! even when told not to. [`normalize`] removes the fence markers and
//! surrounding whitespace and nothing else.

const FENCE: &str = "```";

/// Remove surrounding whitespace and code-fence markers.
///
/// A leading marker may carry a language tag (`json`, `JSON`, `jsonc`),
/// which goes with it. Either marker may be missing. Stripping repeats
/// until nothing changes, so the result is always a fixpoint and
/// `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(raw: &str) -> String {
    let mut text = raw.trim();
    loop {
        let stripped = strip_closing(strip_opening(text)).trim();
        if stripped.len() == text.len() {
            return stripped.to_string();
        }
        text = stripped;
    }
}

fn strip_opening(text: &str) -> &str {
    match text.strip_prefix(FENCE) {
        Some(rest) => rest.trim_start_matches(is_tag_char),
        None => text,
    }
}

fn strip_closing(text: &str) -> &str {
    let text = text.trim_end();
    text.strip_suffix(FENCE).unwrap_or(text)
}

fn is_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '.' | '-')
}
