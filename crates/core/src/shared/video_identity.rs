use std::path::Path;

use chrono::NaiveDateTime;

use crate::shared::constants::{FILENAME_STAMP_FORMAT, FILENAME_STAMP_OUTPUT_FORMAT};
use crate::shared::error::SurveyError;

/// Trip, dive and absolute start time of a video, taken from its filename.
///
/// Filenames follow `TRIP_DIVE_YYYYMMDD_HHMMSS.ext`. Source videos and the
/// clips cut from them share the convention, so clips can be re-parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoIdentity {
    pub trip_id: String,
    pub dive_id: String,
    pub start: NaiveDateTime,
    pub extension: String,
}

impl VideoIdentity {
    pub fn parse(file_name: &str) -> Result<Self, SurveyError> {
        let malformed = |reason: String| SurveyError::MalformedFilename {
            name: file_name.to_string(),
            reason,
        };

        let parts: Vec<&str> = file_name.splitn(4, '_').collect();
        let [trip_id, dive_id, date, time_and_ext] = parts.as_slice() else {
            return Err(malformed(format!(
                "found {} underscore-separated fields, expected 4",
                parts.len()
            )));
        };
        if trip_id.is_empty() || dive_id.is_empty() {
            return Err(malformed("trip and dive fields must not be empty".to_string()));
        }

        let (time, extension) = time_and_ext
            .split_once('.')
            .unwrap_or((*time_and_ext, ""));

        let start = NaiveDateTime::parse_from_str(&format!("{date} {time}"), FILENAME_STAMP_FORMAT)
            .map_err(|e| malformed(format!("invalid date/time '{date}_{time}': {e}")))?;

        Ok(Self {
            trip_id: trip_id.to_string(),
            dive_id: dive_id.to_string(),
            start,
            extension: extension.to_string(),
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, SurveyError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| SurveyError::MalformedFilename {
                name: path.display().to_string(),
                reason: "no UTF-8 file name".to_string(),
            })?;
        Self::parse(file_name)
    }

    /// The `YYYYMMDD_HHMMSS` segment of the filename.
    pub fn start_stamp(&self) -> String {
        self.start.format(FILENAME_STAMP_OUTPUT_FORMAT).to_string()
    }

    /// Filename for a clip of this video starting at the absolute time `at`.
    pub fn clip_name(&self, at: NaiveDateTime) -> String {
        let stamp = at.format(FILENAME_STAMP_OUTPUT_FORMAT);
        if self.extension.is_empty() {
            format!("{}_{}_{stamp}", self.trip_id, self.dive_id)
        } else {
            format!("{}_{}_{stamp}.{}", self.trip_id, self.dive_id, self.extension)
        }
    }
}
