use std::collections::HashMap;

use crate::shared::constants::{DEFAULT_DIVE_COLUMN, DEFAULT_END_COLUMN, DEFAULT_START_COLUMN};
use crate::shared::error::SurveyError;
use crate::survey::domain::transect_window::TransectWindow;

/// 1-based dive log column positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiveLogColumns {
    pub dive: usize,
    pub start: usize,
    pub end: usize,
}

impl Default for DiveLogColumns {
    fn default() -> Self {
        Self {
            dive: DEFAULT_DIVE_COLUMN,
            start: DEFAULT_START_COLUMN,
            end: DEFAULT_END_COLUMN,
        }
    }
}

/// Transect windows keyed by dive ID. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct DiveLogIndex {
    windows: HashMap<String, TransectWindow>,
}

impl DiveLogIndex {
    /// Builds the index; a dive listed more than once keeps its last row.
    pub fn from_windows(windows: impl IntoIterator<Item = TransectWindow>) -> Self {
        let mut map = HashMap::new();
        for window in windows {
            if let Some(previous) = map.insert(window.dive_id.clone(), window) {
                log::warn!(
                    "Dive {} appears more than once in the dive log; using the last entry",
                    previous.dive_id
                );
            }
        }
        Self { windows: map }
    }

    pub fn window(&self, dive_id: &str) -> Result<&TransectWindow, SurveyError> {
        self.windows
            .get(dive_id)
            .ok_or_else(|| SurveyError::MissingDiveKey {
                dive_id: dive_id.to_string(),
                index: "dive log",
            })
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}
