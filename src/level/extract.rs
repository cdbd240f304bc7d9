/*!
 * Extraction of the generated level from a raw chat transcript.
 *
 * A transcript may contain several turns framed by a dialect's markers;
 * only the final assistant/model turn carries the level. This module also
 * hosts the separator heuristic that runs on the extracted text.
 */

use log::debug;

use super::dialect::{DialectMarkers, ModelDialect};

/// Column/row separator used by vertical-bar encodings
pub const VERTICAL_BAR: char = '|';

/// Row separator of horizontal text
pub const NEWLINE: char = '\n';

/// Extractor for the generated-content segment of a transcript
pub struct TranscriptExtractor;

impl TranscriptExtractor {
    /// Extract the last generated turn of `raw` using the markers of `dialect`
    ///
    /// A transcript without the dialect's turn-start marker is returned
    /// trimmed, unchanged otherwise.
    pub fn extract(raw: &str, dialect: ModelDialect) -> String {
        let content = Self::extract_with_markers(raw, dialect.markers());
        debug!("Extracted level content ({}):\n{}", dialect, content);
        content
    }

    /// Extraction driven purely by a marker table entry
    pub fn extract_with_markers(raw: &str, markers: &DialectMarkers) -> String {
        let Some(start) = raw.rfind(markers.turn_start) else {
            return raw.trim().to_string();
        };

        let segment = &raw[start + markers.turn_start.len()..];
        let Some(end) = segment.find(markers.turn_end) else {
            // Cut-off turn: reasoning is only stripped from a closed turn
            return segment.trim().to_string();
        };

        let turn = segment[..end].trim();
        match markers.reasoning {
            Some((open, close)) if turn.contains(open) => Self::strip_reasoning(turn, close),
            _ => turn.to_string(),
        }
    }

    /// Keep only what follows the last closing reasoning marker
    ///
    /// An unterminated reasoning block leaves the turn untouched.
    fn strip_reasoning(turn: &str, close: &str) -> String {
        match turn.rfind(close) {
            Some(pos) => turn[pos + close.len()..].trim().to_string(),
            None => turn.to_string(),
        }
    }
}

/// Pick the effective separator for `text`
///
/// Only text containing exactly one of the two delimiter characters forces
/// a separator; anything else keeps `default`.
pub fn detect_separator(text: &str, default: char) -> char {
    let has_bar = text.contains(VERTICAL_BAR);
    let has_newline = text.contains(NEWLINE);

    match (has_bar, has_newline) {
        (true, false) => VERTICAL_BAR,
        (false, true) => NEWLINE,
        _ => default,
    }
}
