use serde_json::Value;

use super::{EVENTS_FIELD, START_FIELD};
use crate::diagnostics::DiagnosticSink;
use crate::errors::StructureError;

// @module: Structural validation of JSON3 documents

/// Checks that a parsed document has the minimal shape of a JSON3 caption file.
///
/// Only the first `sample_size` events are inspected. Events beyond the
/// sample are validated implicitly by the extractor, which skips anything
/// it cannot use.
#[derive(Debug, Clone, Copy)]
pub struct StructureValidator {
    sample_size: usize,
}

impl StructureValidator {
    pub fn new(sample_size: usize) -> Self {
        Self { sample_size }
    }

    /// Inspect the document, returning the number of events on success
    pub fn check(&self, document: &Value) -> Result<usize, StructureError> {
        let root = document.as_object().ok_or(StructureError::NotAnObject)?;
        let events = root.get(EVENTS_FIELD).ok_or(StructureError::MissingEvents)?;
        let events = events.as_array().ok_or(StructureError::EventsNotArray)?;

        let recognizable = events
            .iter()
            .take(self.sample_size)
            .filter(|event| event.as_object().is_some_and(|e| e.contains_key(START_FIELD)))
            .count();

        if recognizable == 0 {
            return Err(StructureError::NoRecognizableEvents {
                sampled: events.len().min(self.sample_size),
            });
        }

        Ok(events.len())
    }

    /// Inspect the document and report the outcome to `sink`
    pub fn check_reporting<S: DiagnosticSink + ?Sized>(
        &self,
        document: &Value,
        sink: &S,
    ) -> Result<usize, StructureError> {
        match self.check(document) {
            Ok(count) => {
                sink.info(&format!("JSON3 document validated: {} events found", count));
                Ok(count)
            }
            Err(e) => {
                sink.error(&format!("Invalid JSON3 structure: {}", e));
                Err(e)
            }
        }
    }

    /// Boolean form used by callers that only need a go/no-go answer
    pub fn validate<S: DiagnosticSink + ?Sized>(&self, document: &Value, sink: &S) -> bool {
        self.check_reporting(document, sink).is_ok()
    }
}

impl Default for StructureValidator {
    fn default() -> Self {
        Self::new(5)
    }
}
