/*!
 * Translation marker scanning.
 *
 * A marker is a literal placeholder placed right after a source-language
 * passage. Matching is plain substring search, so characters such as `<`,
 * `-` or `.` in a marker never carry pattern meaning.
 */

use log::debug;

/// Placeholder replaced by the translation of the text before it
pub const TRANSLATION_MARKER: &str = "<Insert-Japanese-translation>";

/// Language the marker asks for
pub const TARGET_LANGUAGE: &str = "Japanese";

/// Longest passage preview kept per occurrence, in characters
const PREVIEW_CHARS: usize = 40;

/// A single marker occurrence
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerOccurrence {
    /// Byte offset of the marker in the document
    pub offset: usize,
    /// Tail of the line leading up to the marker
    pub preceding: String,
}

/// Result of scanning a document for markers
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerScan {
    /// Occurrences in document order
    pub occurrences: Vec<MarkerOccurrence>,
}

impl MarkerScan {
    /// Scan for the default translation marker
    pub fn scan(text: &str) -> Self {
        Self::scan_for(text, TRANSLATION_MARKER)
    }

    /// Scan for non-overlapping occurrences of `marker`
    pub fn scan_for(text: &str, marker: &str) -> Self {
        if marker.is_empty() {
            return Self { occurrences: Vec::new() };
        }

        let occurrences = text
            .match_indices(marker)
            .map(|(offset, _)| MarkerOccurrence {
                offset,
                preceding: preview_before(text, offset),
            })
            .collect();

        Self { occurrences }
    }

    /// Number of occurrences found
    pub fn count(&self) -> usize {
        self.occurrences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    /// Emit one debug line per occurrence
    pub fn log_occurrences(&self) {
        for (index, occurrence) in self.occurrences.iter().enumerate() {
            debug!(
                "Marker {} at byte {} follows: {:?}",
                index + 1,
                occurrence.offset,
                occurrence.preceding
            );
        }
    }
}

/// Count non-overlapping literal occurrences of `marker` in `text`
pub fn count_markers(text: &str, marker: &str) -> usize {
    if marker.is_empty() {
        return 0;
    }
    text.matches(marker).count()
}

fn preview_before(text: &str, offset: usize) -> String {
    let line = match text[..offset].rfind('\n') {
        Some(newline) => &text[newline + 1..offset],
        None => &text[..offset],
    };

    let total = line.chars().count();
    line.chars().skip(total.saturating_sub(PREVIEW_CHARS)).collect()
}
