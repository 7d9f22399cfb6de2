use std::path::Path;

use crate::shared::error::SurveyError;

/// Reports the playable length of a media file.
pub trait MediaProbe: Send {
    /// Duration in seconds. Fails with [`SurveyError::ProbeFailure`].
    fn duration_secs(&self, path: &Path) -> Result<f64, SurveyError>;
}
