/*!
 * # json3vtt - JSON3 caption to WebVTT converter
 *
 * A Rust library for converting the JSON3 timed-caption documents served by
 * video platforms into WebVTT subtitle files.
 *
 * ## Features
 *
 * - Cheap structural validation of the caption document
 * - Per-event text extraction with tag stripping and entity decoding
 * - Folding of re-emitted captions that repeat the same text
 * - WebVTT rendering with unwrapped hour timestamps
 * - Atomic output writes and recursive batch conversion
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `caption`: The conversion pipeline:
 *   - `caption::validator`: Structural validation of the input document
 *   - `caption::extractor`: Raw event to cue normalization
 *   - `caption::text`: Caption text cleaning
 *   - `caption::merger`: Folding of duplicate consecutive cues
 *   - `caption::vtt`: WebVTT rendering and timestamp formatting
 * - `converter`: Orchestration of the pipeline over strings and files
 * - `diagnostics`: Leveled diagnostic sinks used by the pipeline
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod caption;
pub mod converter;
pub mod diagnostics;
pub mod errors;
pub mod file_utils;

// Re-export main types for easier usage
pub use app_config::{Config, ConversionConfig, LogLevel};
pub use caption::{Cue, Extraction};
pub use converter::{BatchReport, Conversion, ConversionStats, Converter};
pub use diagnostics::{DiagnosticSink, LogSink, MemorySink};
pub use errors::{AppError, ConversionError, FileError, StructureError};
