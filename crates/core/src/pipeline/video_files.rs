use std::path::{Path, PathBuf};

use crate::shared::constants::VIDEO_EXTENSIONS;
use crate::shared::error::SurveyError;

/// Video files directly inside `dir`, sorted by path.
pub fn list_videos(dir: &Path) -> Result<Vec<PathBuf>, SurveyError> {
    let io_error = |source: std::io::Error| SurveyError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut videos = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_file() && is_video(&path) {
            videos.push(path);
        }
    }
    videos.sort();
    Ok(videos)
}

pub fn is_video(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| VIDEO_EXTENSIONS.iter().any(|v| v.eq_ignore_ascii_case(ext)))
}
