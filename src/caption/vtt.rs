use std::fmt::Write;

use super::Cue;

// @module: WebVTT rendering

/// Header line every WebVTT file starts with
pub const VTT_HEADER: &str = "WEBVTT";

/// Format a millisecond offset as a WebVTT timestamp (HH:MM:SS.mmm).
///
/// Negative input is clamped to zero. Hours are not wrapped at 24 and grow
/// past two digits when needed.
pub fn format_timestamp(ms: i64) -> String {
    let ms = ms.max(0);
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
}

/// Renders cues as a WebVTT document
#[derive(Debug, Clone, Copy, Default)]
pub struct VttRenderer;

impl VttRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render `cues` numbered 1..=N in sequence order.
    ///
    /// A blank line precedes every block, so the document ends with a single
    /// newline right after the last caption text.
    pub fn render(&self, cues: &[Cue]) -> String {
        // Rough per-cue size: index, timing line and a short caption
        let mut out = String::with_capacity(VTT_HEADER.len() + 1 + cues.len() * 64);
        out.push_str(VTT_HEADER);
        out.push('\n');

        for (i, cue) in cues.iter().enumerate() {
            // Writing into a String cannot fail
            let _ = write!(
                out,
                "\n{}\n{} --> {}\n{}\n",
                i + 1,
                format_timestamp(cue.start_ms as i64),
                format_timestamp(cue.end_ms as i64),
                cue.text
            );
        }

        out
    }
}
