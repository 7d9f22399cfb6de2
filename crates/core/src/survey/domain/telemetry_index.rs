use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::shared::error::SurveyError;
use crate::survey::domain::telemetry_layout::TelemetryLayout;

/// One telemetry sample. `values` are already formatted and line up with
/// [`TelemetryLayout::fields`].
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryRow {
    pub timestamp: NaiveDateTime,
    pub values: Vec<String>,
}

/// Telemetry rows partitioned by dive ID, each partition in input order.
#[derive(Debug, Clone)]
pub struct TelemetryIndex {
    layout: TelemetryLayout,
    partitions: HashMap<String, Vec<TelemetryRow>>,
}

impl TelemetryIndex {
    pub fn from_rows(
        layout: TelemetryLayout,
        rows: impl IntoIterator<Item = (String, TelemetryRow)>,
    ) -> Self {
        let mut partitions: HashMap<String, Vec<TelemetryRow>> = HashMap::new();
        for (dive_id, row) in rows {
            partitions.entry(dive_id).or_default().push(row);
        }
        Self { layout, partitions }
    }

    pub fn layout(&self) -> &TelemetryLayout {
        &self.layout
    }

    pub fn rows_for(&self, dive_id: &str) -> Result<&[TelemetryRow], SurveyError> {
        self.partitions
            .get(dive_id)
            .map(|rows| rows.as_slice())
            .ok_or_else(|| SurveyError::MissingDiveKey {
                dive_id: dive_id.to_string(),
                index: "telemetry log",
            })
    }

    pub fn dive_count(&self) -> usize {
        self.partitions.len()
    }
}
