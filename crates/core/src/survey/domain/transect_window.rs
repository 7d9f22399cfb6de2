use chrono::{NaiveDateTime, TimeDelta};

use crate::shared::constants::TRANSECT_BUFFER_SECS;

/// Transect start and end for one dive, as recorded in the dive log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransectWindow {
    pub dive_id: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// A [`TransectWindow`] widened by the fixed buffer on both sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferedWindow {
    pub dive_id: String,
    pub raw_start: NaiveDateTime,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TransectWindow {
    pub fn buffered(&self) -> BufferedWindow {
        let buffer = TimeDelta::seconds(TRANSECT_BUFFER_SECS);
        BufferedWindow {
            dive_id: self.dive_id.clone(),
            raw_start: self.start,
            start: self.start - buffer,
            end: self.end + buffer,
        }
    }
}

impl BufferedWindow {
    pub fn length(&self) -> TimeDelta {
        self.end - self.start
    }
}
