/*!
 * The caption conversion pipeline.
 *
 * Four stages run strictly in order, each consuming the previous stage's output:
 * - `validator`: cheap structural check of the parsed document
 * - `extractor`: raw events to time-ordered, cleaned cues
 * - `merger`: folds re-emitted captions into a single cue
 * - `vtt`: renders the final cues as WebVTT text
 *
 * `text` holds the cleaning function the extractor applies to every event.
 */

pub mod extractor;
pub mod merger;
pub mod text;
pub mod validator;
pub mod vtt;

use std::fmt;

// Re-export main types
pub use extractor::{EventExtractor, Extraction};
pub use merger::CueMerger;
pub use text::clean_text;
pub use validator::StructureValidator;
pub use vtt::{VttRenderer, format_timestamp};

/// JSON3 field names
pub(crate) const EVENTS_FIELD: &str = "events";
pub(crate) const START_FIELD: &str = "tStartMs";
pub(crate) const DURATION_FIELD: &str = "dDurationMs";
pub(crate) const SEGMENTS_FIELD: &str = "segs";
pub(crate) const SEGMENT_TEXT_FIELD: &str = "utf8";
pub(crate) const SEGMENT_TEXT_ALT_FIELD: &str = "text";

// @struct: Single timed caption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    // @field: Start time in ms
    pub start_ms: u64,

    // @field: End time in ms
    pub end_ms: u64,

    // @field: Cleaned display text
    pub text: String,
}

impl Cue {
    pub fn new(start_ms: u64, end_ms: u64, text: impl Into<String>) -> Self {
        Cue {
            start_ms,
            end_ms,
            text: text.into(),
        }
    }

    /// Key used to decide whether two cues carry the same caption
    pub(crate) fn comparison_key(&self) -> String {
        self.text.trim().to_lowercase()
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} --> {} {}",
            format_timestamp(self.start_ms as i64),
            format_timestamp(self.end_ms as i64),
            self.text
        )
    }
}
