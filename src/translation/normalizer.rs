/*!
 * Response normalization.
 *
 * Text-generation providers sometimes wrap the returned document in a
 * fenced block. Only a fence at the very start and one at the very end of
 * the trimmed response are removed, each side independently and at most
 * once. Fences inside the document are content and stay untouched.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Fence delimiter
pub const FENCE: &str = "```";

/// Opening fence line, including any language tag and its line break
static OPENING_FENCE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^```[^\n]*\n").expect("Invalid opening fence regex")
});

/// Closing fence preceded by a line break, with optional trailing whitespace
static CLOSING_FENCE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n```\s*$").expect("Invalid closing fence regex")
});

/// Trim the raw response and strip boundary fences
pub fn normalize_response(raw: &str) -> String {
    let mut text = raw.trim();

    if text.starts_with(FENCE) {
        if let Some(found) = OPENING_FENCE_REGEX.find(text) {
            text = &text[found.end()..];
        }
    }

    if text.ends_with(FENCE) {
        if let Some(found) = CLOSING_FENCE_REGEX.find(text) {
            text = &text[..found.start()];
        }
    }

    text.to_string()
}

/// Reattach the source document's surrounding whitespace if normalization dropped it
///
/// Each side is handled on its own: the source's leading whitespace is
/// prepended when the normalized text starts with a non-whitespace character,
/// and the source's trailing whitespace is appended likewise at the end.
pub fn restore_boundary_whitespace(source: &str, normalized: String) -> String {
    if normalized.is_empty() {
        return normalized;
    }

    let leading = &source[..source.len() - source.trim_start().len()];
    let trailing = &source[source.trim_end().len()..];

    let mut restored = String::with_capacity(leading.len() + normalized.len() + trailing.len());
    if !normalized.starts_with(char::is_whitespace) {
        restored.push_str(leading);
    }
    restored.push_str(&normalized);
    if !normalized.ends_with(char::is_whitespace) {
        restored.push_str(trailing);
    }
    restored
}
