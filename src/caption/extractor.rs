use log::Level;
use serde_json::{Map, Value};

use super::text::clean_text;
use super::{
    Cue, DURATION_FIELD, EVENTS_FIELD, SEGMENT_TEXT_ALT_FIELD, SEGMENT_TEXT_FIELD,
    SEGMENTS_FIELD, START_FIELD,
};
use crate::diagnostics::DiagnosticSink;

// @module: Raw JSON3 event to cue normalization

/// Outcome of an extraction run
///
/// Individual defective events are never reported; only these totals are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Cues sorted by start time
    pub cues: Vec<Cue>,

    /// Events that were not objects
    pub skipped_non_object: usize,

    /// Events without a usable `tStartMs`
    pub skipped_missing_start: usize,

    /// Events whose text was empty after cleaning
    pub skipped_empty_text: usize,
}

impl Extraction {
    pub fn skipped_total(&self) -> usize {
        self.skipped_non_object + self.skipped_missing_start + self.skipped_empty_text
    }
}

/// Turns the raw `events` array into cleaned, time-ordered cues
#[derive(Debug, Clone, Copy)]
pub struct EventExtractor {
    default_duration_ms: u64,
}

impl EventExtractor {
    pub fn new(default_duration_ms: u64) -> Self {
        Self { default_duration_ms }
    }

    /// Extract every usable event from `document`.
    ///
    /// A document without an `events` array yields an empty extraction.
    pub fn extract<S: DiagnosticSink + ?Sized>(&self, document: &Value, sink: &S) -> Extraction {
        let mut extraction = Extraction::default();

        let events = match document.get(EVENTS_FIELD).and_then(Value::as_array) {
            Some(events) => events,
            None => return extraction,
        };

        for event in events {
            let Some(event) = event.as_object() else {
                extraction.skipped_non_object += 1;
                continue;
            };

            let Some(start_ms) = event.get(START_FIELD).and_then(read_millis) else {
                extraction.skipped_missing_start += 1;
                continue;
            };

            let end_ms = match event.get(DURATION_FIELD).and_then(read_millis) {
                Some(duration_ms) => start_ms.saturating_add(duration_ms),
                None => start_ms.saturating_add(i64::try_from(self.default_duration_ms).unwrap_or(i64::MAX)),
            };

            let text = clean_text(&segment_text(event));
            if text.is_empty() {
                extraction.skipped_empty_text += 1;
                continue;
            }

            // Negative offsets are clamped only after the end is derived
            extraction.cues.push(Cue::new(clamp_ms(start_ms), clamp_ms(end_ms), text));
        }

        // Stable sort keeps document order for equal start times
        extraction.cues.sort_by_key(|cue| cue.start_ms);

        sink.info(&format!(
            "Extracted {} valid caption events with text",
            extraction.cues.len()
        ));
        if extraction.skipped_total() > 0 && sink.enabled(Level::Debug) {
            sink.debug(&format!(
                "Skipped {} events ({} not objects, {} without start time, {} without text)",
                extraction.skipped_total(),
                extraction.skipped_non_object,
                extraction.skipped_missing_start,
                extraction.skipped_empty_text
            ));
        }

        extraction
    }
}

impl Default for EventExtractor {
    fn default() -> Self {
        Self::new(2000)
    }
}

/// Read a millisecond field. Fractional values are truncated; anything
/// non-numeric counts as absent.
fn read_millis(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        _ => None,
    }
}

fn clamp_ms(ms: i64) -> u64 {
    ms.max(0) as u64
}

/// Concatenate the text fragments of every segment, in order, without separators
fn segment_text(event: &Map<String, Value>) -> String {
    let Some(segments) = event.get(SEGMENTS_FIELD).and_then(Value::as_array) else {
        return String::new();
    };

    let mut text = String::new();
    for segment in segments.iter().filter_map(Value::as_object) {
        // `utf8` wins unless it is missing, empty, zero or false
        let fragment = segment
            .get(SEGMENT_TEXT_FIELD)
            .and_then(fragment_text)
            .or_else(|| segment.get(SEGMENT_TEXT_ALT_FIELD).and_then(fragment_text));

        if let Some(fragment) = fragment {
            text.push_str(&fragment);
        }
    }

    text
}

/// Scalar fragment as display text. Empty strings, zero and `false` count
/// as absent so the alternate field gets a chance.
fn fragment_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}
