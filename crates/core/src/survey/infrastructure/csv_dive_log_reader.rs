use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::shared::error::SurveyError;
use crate::shared::timecode::parse_log_timestamp;
use crate::survey::domain::dive_log_index::{DiveLogColumns, DiveLogIndex};
use crate::survey::domain::transect_window::TransectWindow;

/// Loads transect windows from a comma-delimited dive log with one header row.
pub struct CsvDiveLogReader {
    columns: DiveLogColumns,
}

impl CsvDiveLogReader {
    pub fn new(columns: DiveLogColumns) -> Self {
        Self { columns }
    }

    pub fn read(&self, path: &Path) -> Result<DiveLogIndex, SurveyError> {
        let file = File::open(path).map_err(|source| SurveyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.read_from(file, path)
    }

    /// Reads from any source; `origin` is only used in error messages.
    pub fn read_from<R: Read>(
        &self,
        source: R,
        origin: &Path,
    ) -> Result<DiveLogIndex, SurveyError> {
        let csv_error = |source: csv::Error| SurveyError::Csv {
            path: origin.to_path_buf(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(source);

        let width = reader.headers().map_err(csv_error)?.len();
        for column in [self.columns.dive, self.columns.start, self.columns.end] {
            if column == 0 || column > width {
                return Err(SurveyError::MissingColumn {
                    path: origin.to_path_buf(),
                    column,
                    width,
                });
            }
        }

        let mut windows = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(csv_error)?;
            // Header is line 1.
            let line = row + 2;
            let cell = |column: usize| {
                record
                    .get(column - 1)
                    .ok_or_else(|| SurveyError::ShortRow {
                        path: origin.to_path_buf(),
                        line,
                        column,
                        width: record.len(),
                    })
            };

            let dive_id = cell(self.columns.dive)?;
            if dive_id.is_empty() {
                log::debug!("Skipping dive log line {line}: no dive name");
                continue;
            }
            let context = |what: &str| format!("{what} of {} line {line}", origin.display());
            let start = parse_log_timestamp(cell(self.columns.start)?, context("transect start"))?;
            let end = parse_log_timestamp(cell(self.columns.end)?, context("transect end"))?;

            windows.push(TransectWindow {
                dive_id: dive_id.to_string(),
                start,
                end,
            });
        }

        let index = DiveLogIndex::from_windows(windows);
        log::info!(
            "Loaded {} transect windows from {}",
            index.len(),
            origin.display()
        );
        Ok(index)
    }
}
