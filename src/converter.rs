use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::app_config::ConversionConfig;
use crate::caption::{CueMerger, EventExtractor, StructureValidator, VttRenderer};
use crate::diagnostics::{DiagnosticSink, LogSink};
use crate::errors::{ConversionError, FileError};
use crate::file_utils::FileManager;

// @module: Conversion orchestration

/// Extension of the caption files picked up in batch mode
pub const JSON3_EXTENSION: &str = "json3";

/// Counters gathered over one conversion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionStats {
    /// Length of the document's `events` array
    pub events_in_document: usize,

    /// Cues that survived extraction
    pub cues_extracted: usize,

    /// Events dropped by the extractor, by reason
    pub skipped_non_object: usize,
    pub skipped_missing_start: usize,
    pub skipped_empty_text: usize,

    /// Cues folded away by the merger
    pub cues_merged: usize,

    /// Cues in the rendered output
    pub cues_written: usize,
}

/// Result of a successful conversion
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Rendered WebVTT document
    pub vtt: String,

    pub stats: ConversionStats,
}

/// Outcome of converting a directory
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Output files written
    pub converted: Vec<PathBuf>,

    /// Inputs that failed, with the reason
    pub failed: Vec<(PathBuf, ConversionError)>,
}

impl BatchReport {
    /// A batch that converted nothing is not a success, even without failures
    pub fn is_success(&self) -> bool {
        self.failed.is_empty() && !self.converted.is_empty()
    }
}

/// Runs validator, extractor, merger and renderer over one document at a time.
///
/// Each call is independent; a converter holds no state between runs besides
/// its configuration and diagnostic sink.
pub struct Converter<S: DiagnosticSink = LogSink> {
    config: ConversionConfig,
    sink: S,
}

impl Converter<LogSink> {
    /// Converter with default settings reporting to the log facade at info level
    pub fn with_defaults() -> Self {
        Self::new(ConversionConfig::default(), LogSink::default())
    }
}

impl<S: DiagnosticSink> Converter<S> {
    pub fn new(config: ConversionConfig, sink: S) -> Self {
        Self { config, sink }
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Convert an already parsed document
    pub fn convert_value(&self, document: &Value) -> Result<Conversion, ConversionError> {
        let validator = StructureValidator::new(self.config.validation_sample_size);
        let events_in_document = validator.check_reporting(document, &self.sink)?;

        let extraction = EventExtractor::new(self.config.default_duration_ms)
            .extract(document, &self.sink);
        if extraction.cues.is_empty() {
            self.sink.error("No valid caption events found in the JSON3 document");
            return Err(ConversionError::EmptyResult);
        }

        let mut stats = ConversionStats {
            events_in_document,
            cues_extracted: extraction.cues.len(),
            skipped_non_object: extraction.skipped_non_object,
            skipped_missing_start: extraction.skipped_missing_start,
            skipped_empty_text: extraction.skipped_empty_text,
            ..Default::default()
        };

        let cues = CueMerger::new(self.config.merge_tolerance_ms).merge(extraction.cues, &self.sink);
        stats.cues_merged = stats.cues_extracted - cues.len();
        stats.cues_written = cues.len();

        let vtt = VttRenderer::new().render(&cues);

        Ok(Conversion { vtt, stats })
    }

    /// Parse and convert JSON3 source text
    pub fn convert_str(&self, source: &str) -> Result<Conversion, ConversionError> {
        let document: Value = serde_json::from_str(source).map_err(|e| {
            self.sink.error(&format!("JSON parse error: {}", e));
            ConversionError::Parse(e)
        })?;

        self.convert_value(&document)
    }

    /// Convert `input` and write the result to `output`.
    ///
    /// The output is written only when the whole conversion succeeds.
    pub fn convert_file<P1: AsRef<Path>, P2: AsRef<Path>>(
        &self,
        input: P1,
        output: P2,
    ) -> Result<ConversionStats, ConversionError> {
        let input = input.as_ref();
        let output = output.as_ref();

        let source = FileManager::read_to_string(input).map_err(|e| self.report_file_error(e))?;

        self.sink.info(&format!(
            "Starting conversion: {} -> {}",
            input.display(),
            output.display()
        ));

        let conversion = self.convert_str(&source)?;

        FileManager::write_atomic(output, &conversion.vtt).map_err(|e| self.report_file_error(e))?;

        self.sink.info(&format!(
            "Conversion complete: {} captions saved",
            conversion.stats.cues_written
        ));

        Ok(conversion.stats)
    }

    /// Convert every JSON3 file under `dir`, writing each output next to its input.
    ///
    /// A failing file is recorded and the batch carries on.
    pub fn convert_dir<P: AsRef<Path>>(&self, dir: P) -> Result<BatchReport, ConversionError> {
        let dir = dir.as_ref();
        let inputs = FileManager::find_files(dir, JSON3_EXTENSION).map_err(|e| self.report_file_error(e))?;

        self.sink.info(&format!(
            "Found {} JSON3 files in {}",
            inputs.len(),
            dir.display()
        ));

        let mut report = BatchReport::default();
        for input in inputs {
            let output = FileManager::default_output_path(&input, &self.config.output_extension);
            match self.convert_file(&input, &output) {
                Ok(_) => report.converted.push(output),
                Err(e) => report.failed.push((input, e)),
            }
        }

        self.sink.info(&format!(
            "Finished batch: {} converted, {} failed",
            report.converted.len(),
            report.failed.len()
        ));

        Ok(report)
    }

    fn report_file_error(&self, error: FileError) -> ConversionError {
        self.sink.error(&error.to_string());
        ConversionError::File(error)
    }
}
