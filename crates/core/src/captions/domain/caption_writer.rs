use std::path::Path;

use crate::captions::domain::caption_entry::CaptionEntry;
use crate::shared::error::SurveyError;

/// Persists the caption entries of one clip.
pub trait CaptionWriter: Send {
    fn write(&self, path: &Path, entries: &[CaptionEntry]) -> Result<(), SurveyError>;
}
