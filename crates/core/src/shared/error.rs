use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SurveyError {
    #[error("malformed video filename '{name}': {reason} (expected TRIP_DIVE_YYYYMMDD_HHMMSS.ext)")]
    MalformedFilename { name: String, reason: String },
    #[error("invalid timestamp '{value}' in {context}: {source}")]
    InvalidTimestamp {
        value: String,
        context: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("column {column} is out of range in {path} (row has {width} columns)")]
    MissingColumn {
        path: PathBuf,
        column: usize,
        width: usize,
    },
    #[error("line {line} of {path} has {width} columns, column {column} is required")]
    ShortRow {
        path: PathBuf,
        line: usize,
        column: usize,
        width: usize,
    },
    #[error("field '{field}' not found in {path}")]
    MissingField { path: PathBuf, field: String },
    #[error("fields '{first}' and '{second}' both map to caption label '{label}'")]
    DuplicateLabel {
        label: String,
        first: String,
        second: String,
    },
    #[error("dive '{dive_id}' not found in {index}")]
    MissingDiveKey {
        dive_id: String,
        index: &'static str,
    },
    #[error("could not determine duration of {path}: {reason}")]
    ProbeFailure { path: PathBuf, reason: String },
    #[error("failed to cut {output} from {source_path}: {reason}")]
    TranscodeFailure {
        source_path: PathBuf,
        output: PathBuf,
        reason: String,
    },
    #[error("failed to read {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SurveyError {
    /// Whether the error reflects a configuration or input mismatch that
    /// would recur for every item, and so should abort the whole batch.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            SurveyError::MalformedFilename { .. }
                | SurveyError::InvalidTimestamp { .. }
                | SurveyError::MissingColumn { .. }
                | SurveyError::ShortRow { .. }
                | SurveyError::MissingField { .. }
                | SurveyError::DuplicateLabel { .. }
                | SurveyError::Csv { .. }
        )
    }
}
