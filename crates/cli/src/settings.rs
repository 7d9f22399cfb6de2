use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use transect_core::shared::constants::{
    DEFAULT_CAPTION_FIELDS, DEFAULT_CLIP_MINUTES, DEFAULT_DATETIME_FIELD, DEFAULT_DIVE_COLUMN,
    DEFAULT_DIVE_FIELD, DEFAULT_END_COLUMN, DEFAULT_LABEL_NOISE_TOKENS, DEFAULT_START_COLUMN,
};

/// Survey defaults read from a JSON file. Missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub clip_minutes: u32,
    /// 1-based dive log column positions.
    pub dive_column: usize,
    pub start_column: usize,
    pub end_column: usize,
    pub datetime_field: String,
    pub dive_field: String,
    pub caption_fields: Vec<String>,
    pub label_noise_tokens: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            clip_minutes: DEFAULT_CLIP_MINUTES,
            dive_column: DEFAULT_DIVE_COLUMN,
            start_column: DEFAULT_START_COLUMN,
            end_column: DEFAULT_END_COLUMN,
            datetime_field: DEFAULT_DATETIME_FIELD.to_string(),
            dive_field: DEFAULT_DIVE_FIELD.to_string(),
            caption_fields: to_strings(DEFAULT_CAPTION_FIELDS),
            label_noise_tokens: to_strings(DEFAULT_LABEL_NOISE_TOKENS),
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl Settings {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("transect").join("settings.json"))
    }

    /// Loads `explicit` if given, which must exist and parse. Otherwise the
    /// per-user file is used when present, and built-in defaults when not.
    pub fn load(explicit: Option<&Path>) -> Result<Self, Box<dyn std::error::Error>> {
        if let Some(path) = explicit {
            return Self::read(path);
        }
        match Self::config_path() {
            Some(path) if path.is_file() => Self::read(&path),
            _ => Ok(Self::default()),
        }
    }

    fn read(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let json = fs::read_to_string(path)
            .map_err(|e| format!("Cannot read settings {}: {e}", path.display()))?;
        let settings: Settings = serde_json::from_str(&json)
            .map_err(|e| format!("Invalid settings {}: {e}", path.display()))?;
        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}
