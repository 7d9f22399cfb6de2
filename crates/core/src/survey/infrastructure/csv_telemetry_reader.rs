use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::shared::constants::TIME_OF_DAY_FORMAT;
use crate::shared::error::SurveyError;
use crate::shared::timecode::parse_log_timestamp;
use crate::survey::domain::field_format::format_value;
use crate::survey::domain::telemetry_index::{TelemetryIndex, TelemetryRow};
use crate::survey::domain::telemetry_layout::{TelemetryLayout, TelemetrySchema};

/// Loads a comma-delimited telemetry log into a [`TelemetryIndex`].
///
/// Rounding and the derived time-of-day value are applied here, once per
/// row, so caption output never reformats values.
pub struct CsvTelemetryReader {
    schema: TelemetrySchema,
}

impl CsvTelemetryReader {
    pub fn new(schema: TelemetrySchema) -> Self {
        Self { schema }
    }

    pub fn read(&self, path: &Path) -> Result<TelemetryIndex, SurveyError> {
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
    ) -> Result<TelemetryIndex, SurveyError> {
        let layout = TelemetryLayout::from_schema(&self.schema)?;
        let csv_error = |source: csv::Error| SurveyError::Csv {
            path: origin.to_path_buf(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(source);

        let headers = reader.headers().map_err(csv_error)?.clone();
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| SurveyError::MissingField {
                    path: origin.to_path_buf(),
                    field: name.to_string(),
                })
        };

        let datetime_column = find(self.schema.datetime_field.as_str())?;
        let dive_column = find(self.schema.dive_field.as_str())?;
        let value_columns = layout
            .fields()
            .iter()
            .map(|field| field.source.as_deref().map(find).transpose())
            .collect::<Result<Vec<Option<usize>>, SurveyError>>()?;

        let required_width = value_columns
            .iter()
            .flatten()
            .chain([&datetime_column, &dive_column])
            .max()
            .map_or(0, |last| last + 1);

        let mut rows = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(csv_error)?;
            let line = row + 2;
            if record.len() < required_width {
                return Err(SurveyError::ShortRow {
                    path: origin.to_path_buf(),
                    line,
                    column: required_width,
                    width: record.len(),
                });
            }

            let timestamp = parse_log_timestamp(
                &record[datetime_column],
                format!("{} of {} line {line}", self.schema.datetime_field, origin.display()),
            )?;
            let dive_id = &record[dive_column];

            let values = layout
                .fields()
                .iter()
                .zip(&value_columns)
                .map(|(field, column)| match column {
                    Some(column) => format_value(&record[*column], field.group.decimals()),
                    None => timestamp.format(TIME_OF_DAY_FORMAT).to_string(),
                })
                .collect();

            rows.push((dive_id.to_string(), TelemetryRow { timestamp, values }));
        }

        let row_count = rows.len();
        let index = TelemetryIndex::from_rows(layout, rows);
        log::info!(
            "Loaded {row_count} telemetry rows for {} dives from {}",
            index.dive_count(),
            origin.display()
        );
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = "\
Datetime,Dive_Name,ROV_Longitude_loess,ROV_Latitude_loess,Depth_m,Speed_kts,Altitude_m
2022-07-01 10:00:00,D01,-130.1234567,52.7654321,101.26,0.45,2.04
2022-07-01 10:00:05,D01,-130.1234600,52.7654400,101.3,0.5,2
2022-07-01 10:00:00,D02,-131.0,53.0,50,1,1
";

    fn read(log: &str, schema: TelemetrySchema) -> Result<TelemetryIndex, SurveyError> {
        CsvTelemetryReader::new(schema).read_from(log.as_bytes(), Path::new("telemetry.csv"))
    }

    #[test]
    fn test_rows_are_rounded_at_load() {
        let index = read(LOG, TelemetrySchema::default()).unwrap();
        let rows = index.rows_for("D01").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0].values,
            vec!["10:00:00", "-130.12346", "52.76543", "101.3", "0.5", "2.0"]
        );
    }

    #[test]
    fn test_partitions_by_dive() {
        let index = read(LOG, TelemetrySchema::default()).unwrap();
        assert_eq!(index.dive_count(), 2);
        assert_eq!(index.rows_for("D02").unwrap().len(), 1);
        assert!(index.rows_for("D03").is_err());
    }

    #[test]
    fn test_missing_field_fails() {
        let schema = TelemetrySchema {
            fields: vec!["Heading_deg".to_string()],
            ..TelemetrySchema::default()
        };
        let err = read(LOG, schema).unwrap_err();
        assert!(matches!(
            err,
            SurveyError::MissingField { ref field, .. } if field == "Heading_deg"
        ));
    }

    #[test]
    fn test_missing_datetime_column_fails() {
        let schema = TelemetrySchema {
            datetime_field: "Timestamp".to_string(),
            ..TelemetrySchema::default()
        };
        let err = read(LOG, schema).unwrap_err();
        assert!(matches!(err, SurveyError::MissingField { .. }));
    }

    #[test]
    fn test_duplicate_labels_fail_before_reading() {
        let schema = TelemetrySchema {
            fields: vec!["Depth_m".to_string(), "Depth_ft".to_string()],
            ..TelemetrySchema::default()
        };
        let err = read("not,a,telemetry,file\n", schema).unwrap_err();
        assert!(matches!(err, SurveyError::DuplicateLabel { .. }));
    }

    #[test]
    fn test_bad_datetime_fails() {
        let log = "Datetime,Dive_Name,Depth_m\n2022-07-01T10:00:00,D01,5\n";
        let schema = TelemetrySchema {
            fields: vec!["Depth_m".to_string()],
            ..TelemetrySchema::default()
        };
        let err = read(log, schema).unwrap_err();
        assert!(matches!(err, SurveyError::InvalidTimestamp { .. }));
    }

    #[test]
    fn test_short_row_fails_with_line() {
        let log = "\
Datetime,Dive_Name,Depth_m,Speed_kts
2022-07-01 10:00:00,D01,5,1
2022-07-01 10:00:05,D01,6
";
        let schema = TelemetrySchema {
            fields: vec!["Depth_m".to_string(), "Speed_kts".to_string()],
            ..TelemetrySchema::default()
        };
        let err = read(log, schema).unwrap_err();
        assert!(matches!(
            err,
            SurveyError::ShortRow {
                line: 3,
                column: 4,
                width: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_unselected_trailing_columns_may_be_missing() {
        let log = "\
Datetime,Dive_Name,Depth_m,Notes
2022-07-01 10:00:00,D01,5
";
        let schema = TelemetrySchema {
            fields: vec!["Depth_m".to_string()],
            ..TelemetrySchema::default()
        };
        let index = read(log, schema).unwrap();
        assert_eq!(index.rows_for("D01").unwrap()[0].values[1], "5.0");
    }

    #[test]
    fn test_loading_twice_is_identical() {
        let a = read(LOG, TelemetrySchema::default()).unwrap();
        let b = read(LOG, TelemetrySchema::default()).unwrap();
        assert_eq!(a.rows_for("D01").unwrap(), b.rows_for("D01").unwrap());
    }
}
