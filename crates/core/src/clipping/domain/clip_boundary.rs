use std::num::NonZeroU32;

use chrono::{NaiveDateTime, TimeDelta};

/// Nominal length of every clip cut from a source video.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipLength(NonZeroU32);

impl ClipLength {
    pub fn from_minutes(minutes: NonZeroU32) -> Self {
        Self(minutes)
    }

    pub fn minutes(self) -> u32 {
        self.0.get()
    }

    pub fn as_delta(self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.0.get()))
    }
}

/// One clip to cut: where it starts in the source and what to call it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipBoundary {
    /// Offset from the start of the source video.
    pub offset: TimeDelta,
    pub duration: TimeDelta,
    /// Absolute wall-clock time of the clip's first frame.
    pub start: NaiveDateTime,
    pub output_name: String,
}
