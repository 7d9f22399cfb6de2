use std::path::{Path, PathBuf};

use chrono::TimeDelta;

use crate::shared::error::SurveyError;

/// Cuts a section out of a media file without re-encoding.
///
/// A `length` reaching past the end of the source is truncated at the end
/// of the source rather than treated as an error.
pub trait ClipExtractor: Send {
    fn extract_clip(
        &self,
        source: &Path,
        offset: TimeDelta,
        length: TimeDelta,
        output: &Path,
    ) -> Result<PathBuf, SurveyError>;
}
