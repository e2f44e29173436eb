/*!
 * Integration tests for the JSON3 to WebVTT conversion workflow
 */

use std::fs;
use anyhow::Result;
use log::{Level, LevelFilter};
use serde_json::json;

use json3vtt::app_config::ConversionConfig;
use json3vtt::converter::{ConversionStats, Converter};
use json3vtt::diagnostics::MemorySink;
use json3vtt::errors::{ConversionError, FileError, StructureError};
use crate::common;

fn converter() -> Converter<MemorySink> {
    Converter::new(ConversionConfig::default(), MemorySink::default())
}

/// A single event renders as one numbered cue
#[test]
fn test_convert_str_withSingleEvent_shouldRenderCue() -> Result<()> {
    let source = r#"{"events":[{"tStartMs":1000,"dDurationMs":2000,"segs":[{"utf8":"Hello"}]}]}"#;

    let conversion = converter().convert_str(source)?;

    assert!(conversion.vtt.starts_with("WEBVTT\n\n"));
    assert!(conversion.vtt.contains("1\n00:00:01.000 --> 00:00:03.000\nHello\n"));
    Ok(())
}

/// The document ends with one newline after the last caption text
#[test]
fn test_convert_str_withSingleEvent_shouldEndAfterLastText() -> Result<()> {
    let source = r#"{"events":[{"tStartMs":1000,"dDurationMs":2000,"segs":[{"utf8":"Hello"}]}]}"#;

    let vtt = converter().convert_str(source)?.vtt;

    assert_eq!(vtt, "WEBVTT\n\n1\n00:00:01.000 --> 00:00:03.000\nHello\n");
    assert!(!vtt.ends_with("Hello\n\n"));
    Ok(())
}

/// Two close repeats of the same caption become one cue
#[test]
fn test_convert_value_withRepeatedCaption_shouldMergeIntoOneCue() -> Result<()> {
    let doc = common::document(vec![
        common::event(0, Some(1000), "Hi"),
        common::event(1200, Some(1000), "Hi"),
    ]);

    let conversion = converter().convert_value(&doc)?;

    assert_eq!(conversion.vtt, "WEBVTT\n\n1\n00:00:00.000 --> 00:00:02.200\nHi\n");
    assert_eq!(conversion.stats.cues_merged, 1);
    assert_eq!(conversion.stats.cues_written, 1);
    Ok(())
}

/// A realistic document goes through every stage
#[test]
fn test_convert_str_withSampleDocument_shouldProduceExpectedOutput() -> Result<()> {
    let conversion = converter().convert_str(&common::sample_json3())?;

    assert_eq!(
        conversion.vtt,
        "WEBVTT\n\n\
         1\n00:00:01.000 --> 00:00:05.000\nHello world\n\n\
         2\n00:00:06.000 --> 00:00:08.500\nTom & Jerry\n"
    );
    assert_eq!(
        conversion.stats,
        ConversionStats {
            events_in_document: 5,
            cues_extracted: 3,
            skipped_non_object: 0,
            skipped_missing_start: 0,
            skipped_empty_text: 2,
            cues_merged: 1,
            cues_written: 2,
        }
    );
    Ok(())
}

/// An event without a start time is dropped; alone it leaves nothing to write
#[test]
fn test_convert_value_withOnlyEventMissingStart_shouldFailWithEmptyResult() {
    let doc = json!({ "events": [{ "tStartMs": null, "segs": [{ "utf8": "orphan" }] }] });

    let conv = converter();
    let result = conv.convert_value(&doc);

    assert!(matches!(result, Err(ConversionError::EmptyResult)));
    assert!(conv.sink().contains("No valid caption events"));
}

/// A missing start time only removes that event
#[test]
fn test_convert_value_withOneEventMissingStart_shouldExcludeIt() -> Result<()> {
    let doc = common::document(vec![
        json!({ "dDurationMs": 500, "segs": [{ "utf8": "orphan" }] }),
        common::event(0, Some(500), "kept"),
    ]);

    let conversion = converter().convert_value(&doc)?;

    assert!(!conversion.vtt.contains("orphan"));
    assert_eq!(conversion.stats.skipped_missing_start, 1);
    Ok(())
}

/// Events given as a string fail validation before extraction
#[test]
fn test_convert_str_withStringEvents_shouldFailValidation() {
    let conv = converter();
    let result = conv.convert_str(r#"{"events":"not a list"}"#);

    assert!(matches!(
        result,
        Err(ConversionError::Structure(StructureError::EventsNotArray))
    ));
    // Extraction never ran
    assert!(!conv.sink().contains("Extracted"));
}

/// Malformed JSON is a parse failure, distinct from structural failures
#[test]
fn test_convert_str_withMalformedJson_shouldFailWithParseError() {
    let conv = converter();
    let result = conv.convert_str("{\"events\": [");

    assert!(matches!(result, Err(ConversionError::Parse(_))));
    assert_eq!(conv.sink().messages_at(Level::Error).len(), 1);
}

/// A top-level array parses but is not a caption document
#[test]
fn test_convert_str_withArrayRoot_shouldFailAsNotAnObject() {
    let result = converter().convert_str("[1, 2, 3]");
    assert!(matches!(
        result,
        Err(ConversionError::Structure(StructureError::NotAnObject))
    ));
}

/// The configured tolerance reaches the merger
#[test]
fn test_convert_value_withCustomTolerance_shouldKeepRepeatsApart() -> Result<()> {
    let config = ConversionConfig { merge_tolerance_ms: 100, ..ConversionConfig::default() };
    let conv = Converter::new(config, MemorySink::default());
    let doc = common::document(vec![
        common::event(0, Some(1000), "Hi"),
        common::event(1200, Some(1000), "Hi"),
    ]);

    assert_eq!(conv.convert_value(&doc)?.stats.cues_written, 2);
    Ok(())
}

/// Sinks keep their own level
#[test]
fn test_convert_value_withErrorOnlySink_shouldRecordNoInfo() -> Result<()> {
    let conv = Converter::new(ConversionConfig::default(), MemorySink::new(LevelFilter::Error));
    conv.convert_str(&common::sample_json3())?;
    assert!(conv.sink().records().is_empty());
    Ok(())
}

/// A file conversion writes the rendered output
#[test]
fn test_convert_file_withValidInput_shouldWriteVtt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "talk.json3", &common::sample_json3())?;
    let output = temp_dir.path().join("out").join("talk.vtt");

    let stats = converter().convert_file(&input, &output)?;

    assert_eq!(stats.cues_written, 2);
    let written = fs::read_to_string(&output)?;
    assert!(written.starts_with("WEBVTT\n\n1\n00:00:01.000 --> 00:00:05.000\nHello world\n"));
    Ok(())
}

/// A failed conversion leaves no output file
#[test]
fn test_convert_file_withInvalidInput_shouldNotWriteOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "bad.json3", r#"{"events": []}"#)?;
    let output = temp_dir.path().join("bad.vtt");

    let result = converter().convert_file(&input, &output);

    assert!(matches!(result, Err(ConversionError::Structure(_))));
    assert!(!output.exists());
    Ok(())
}

/// A missing input is an I/O failure
#[test]
fn test_convert_file_withMissingInput_shouldFailWithNotFound() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let result = converter().convert_file(temp_dir.path().join("nope.json3"), temp_dir.path().join("nope.vtt"));

    match result {
        Err(ConversionError::File(FileError::NotFound(path))) => assert!(path.ends_with("nope.json3")),
        other => panic!("expected NotFound, got {:?}", other.map(|_| ())),
    }
    Ok(())
}

/// Batch mode converts every JSON3 file and records failures without stopping
#[test]
fn test_convert_dir_withMixedFiles_shouldConvertValidOnes() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_test_file(root, "one.json3", &common::sample_json3())?;
    common::create_test_file(root, "nested/two.json3", &common::sample_json3())?;
    common::create_test_file(root, "broken.json3", "not json")?;
    common::create_test_file(root, "ignored.txt", "text")?;

    let report = converter().convert_dir(root)?;

    assert_eq!(report.converted, vec![root.join("nested/two.vtt"), root.join("one.vtt")]);
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].0.ends_with("broken.json3"));
    assert!(matches!(report.failed[0].1, ConversionError::Parse(_)));
    assert!(!report.is_success());
    assert!(root.join("one.vtt").is_file());
    assert!(!root.join("broken.vtt").exists());
    Ok(())
}

/// The default converter reports through the log facade
#[test]
fn test_with_defaults_shouldConvertWithLogSink() -> Result<()> {
    common::init_test_logging();
    let conv = Converter::with_defaults();

    assert_eq!(conv.config(), &ConversionConfig::default());
    assert_eq!(conv.sink().level(), LevelFilter::Info);
    assert_eq!(conv.convert_str(&common::sample_json3())?.stats.cues_written, 2);
    Ok(())
}

/// A directory without JSON3 files converts nothing and is not a success
#[test]
fn test_convert_dir_withNoJson3Files_shouldNotBeSuccess() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "notes.txt", "text")?;

    let report = converter().convert_dir(temp_dir.path())?;

    assert!(report.converted.is_empty());
    assert!(report.failed.is_empty());
    assert!(!report.is_success());
    Ok(())
}
