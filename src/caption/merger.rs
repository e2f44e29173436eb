use super::Cue;
use crate::diagnostics::DiagnosticSink;

// @module: Folding of re-emitted captions

/// Collapses consecutive cues that repeat the same caption.
///
/// A cue is folded into the running accumulator when it starts no later
/// than `tolerance_ms` after the accumulator ends and its text matches
/// case-insensitively once trimmed. Folding only extends the end time; the
/// text is never concatenated. Because the comparison is against the
/// accumulator rather than the previous input cue, a whole chain of
/// repeats collapses into one cue.
#[derive(Debug, Clone, Copy)]
pub struct CueMerger {
    tolerance_ms: u64,
}

impl CueMerger {
    pub fn new(tolerance_ms: u64) -> Self {
        Self { tolerance_ms }
    }

    pub fn tolerance_ms(&self) -> u64 {
        self.tolerance_ms
    }

    /// Merge `cues` in a single left-to-right pass
    pub fn merge<S: DiagnosticSink + ?Sized>(&self, cues: Vec<Cue>, sink: &S) -> Vec<Cue> {
        let input_len = cues.len();
        let mut iter = cues.into_iter();

        let Some(mut current) = iter.next() else {
            return Vec::new();
        };
        let mut current_key = current.comparison_key();
        let mut merged = Vec::with_capacity(input_len);

        for cue in iter {
            let key = cue.comparison_key();
            let within_tolerance = cue.start_ms <= current.end_ms.saturating_add(self.tolerance_ms);

            if within_tolerance && key == current_key {
                current.end_ms = current.end_ms.max(cue.end_ms);
            } else {
                merged.push(std::mem::replace(&mut current, cue));
                current_key = key;
            }
        }
        merged.push(current);

        if merged.len() != input_len {
            sink.info(&format!(
                "Merged {} overlapping events",
                input_len - merged.len()
            ));
        }

        merged
    }
}

impl Default for CueMerger {
    fn default() -> Self {
        Self::new(500)
    }
}
