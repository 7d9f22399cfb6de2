use chrono::TimeDelta;

use crate::captions::domain::caption_entry::{CaptionEntry, FieldReading};
use crate::shared::constants::CAPTION_WINDOW_PAD_SECS;
use crate::shared::timecode::delta_from_secs;
use crate::shared::video_identity::VideoIdentity;
use crate::survey::domain::telemetry_index::TelemetryRow;
use crate::survey::domain::telemetry_layout::TelemetryLayout;

/// Builds caption entries for one clip from its dive's telemetry.
///
/// Rows with `clip.start <= timestamp <= clip.start + probed + 1s` are
/// selected in input order. Each adjacent pair yields one entry spanning
/// the two rows and carrying the first row's values, so `n` selected rows
/// give `n - 1` entries (none for fewer than two).
pub fn align_captions(
    clip: &VideoIdentity,
    probed_secs: f64,
    layout: &TelemetryLayout,
    rows: &[TelemetryRow],
) -> Vec<CaptionEntry> {
    let clip_start = clip.start;
    let clip_end =
        clip_start + delta_from_secs(probed_secs) + TimeDelta::seconds(CAPTION_WINDOW_PAD_SECS);

    let selected: Vec<&TelemetryRow> = rows
        .iter()
        .filter(|row| row.timestamp >= clip_start && row.timestamp <= clip_end)
        .collect();

    selected
        .windows(2)
        .enumerate()
        .map(|(i, pair)| CaptionEntry {
            index: i + 1,
            start: pair[0].timestamp - clip_start,
            end: pair[1].timestamp - clip_start,
            fields: layout
                .fields()
                .iter()
                .zip(&pair[0].values)
                .map(|(field, value)| FieldReading {
                    label: field.label.clone(),
                    value: value.clone(),
                    group: field.group,
                })
                .collect(),
        })
        .collect()
}
