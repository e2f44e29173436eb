/*!
 * Error types for the json3vtt application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Reasons a caption document fails structural validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    /// The document root is not a key/value object
    #[error("the document root is not an object")]
    NotAnObject,

    /// The root object has no `events` field
    #[error("missing 'events' field")]
    MissingEvents,

    /// The `events` field holds something other than an array
    #[error("the 'events' field must be an array")]
    EventsNotArray,

    /// None of the sampled events carries a start time
    #[error("no event with 'tStartMs' among the first {sampled} events")]
    NoRecognizableEvents {
        /// Number of events that were inspected
        sampled: usize,
    },
}

/// Errors raised while reading or writing caption files
#[derive(Error, Debug)]
pub enum FileError {
    /// The input path does not point at an existing file
    #[error("Input file not found: {0}")]
    NotFound(PathBuf),

    /// The input could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output could not be written
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An output directory could not be created
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that abort a conversion
#[derive(Error, Debug)]
pub enum ConversionError {
    /// The source text is not valid JSON
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document does not have the caption shape
    #[error("Invalid JSON3 structure: {0}")]
    Structure(#[from] StructureError),

    /// No event survived extraction
    #[error("No valid caption events found in the document")]
    EmptyResult,

    /// Reading the input or writing the output failed
    #[error("I/O error: {0}")]
    File(#[from] FileError),
}

impl ConversionError {
    /// Whether the failure came from the file system rather than the conversion logic
    pub fn is_io(&self) -> bool {
        matches!(self, Self::File(_))
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a conversion
    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),
}
