use std::path::Path;

use crate::media::domain::media_probe::MediaProbe;
use crate::shared::error::SurveyError;

/// Container durations are reported in `AV_TIME_BASE` units.
pub(crate) const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// Reads the container duration via ffmpeg-next (libavformat).
pub struct FfmpegMediaProbe;

impl FfmpegMediaProbe {
    pub fn new() -> Self {
        Self
    }

    fn probe(path: &Path) -> Result<f64, Box<dyn std::error::Error>> {
        ffmpeg_next::init()?;

        let ictx = ffmpeg_next::format::input(path)?;
        let duration = ictx.duration();
        if duration <= 0 {
            return Err("container reports no duration".into());
        }
        Ok(duration as f64 / MICROS_PER_SECOND)
    }
}

impl Default for FfmpegMediaProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaProbe for FfmpegMediaProbe {
    fn duration_secs(&self, path: &Path) -> Result<f64, SurveyError> {
        Self::probe(path).map_err(|e| SurveyError::ProbeFailure {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::infrastructure::test_video::create_test_video;
    use approx::assert_relative_eq;

    #[test]
    fn test_duration_of_encoded_video() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("TR1_D01_20220701_095000.mp4");
        create_test_video(&path, 20, 10.0);

        let secs = FfmpegMediaProbe::new().duration_secs(&path).unwrap();
        assert_relative_eq!(secs, 2.0, epsilon = 0.25);
    }

    #[test]
    fn test_nonexistent_file_is_probe_failure() {
        let err = FfmpegMediaProbe::new()
            .duration_secs(Path::new("/nonexistent/clip.mp4"))
            .unwrap_err();
        assert!(matches!(err, SurveyError::ProbeFailure { .. }));
    }

    #[test]
    fn test_non_media_file_is_probe_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.mp4");
        std::fs::write(&path, b"not a video").unwrap();

        let err = FfmpegMediaProbe::new().duration_secs(&path).unwrap_err();
        assert!(matches!(err, SurveyError::ProbeFailure { .. }));
    }
}
