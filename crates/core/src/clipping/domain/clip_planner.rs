use chrono::{NaiveDateTime, TimeDelta};

use crate::clipping::domain::clip_boundary::{ClipBoundary, ClipLength};
use crate::shared::timecode::delta_to_secs;
use crate::shared::video_identity::VideoIdentity;
use crate::survey::domain::transect_window::BufferedWindow;

/// Advisory mismatch between a video and its dive log entry. Never fatal.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsistencyWarning {
    /// The video begins after the (unbuffered) transect start.
    VideoStartsAfterTransect {
        video_start: NaiveDateTime,
        transect_start: NaiveDateTime,
    },
    /// The probed duration ends before the buffered transect end.
    VideoEndsBeforeTransect { probed_secs: f64, required_secs: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClipPlan {
    pub boundaries: Vec<ClipBoundary>,
    pub warnings: Vec<ConsistencyWarning>,
}

/// Lays fixed-length clips over the buffered transect window of one video.
///
/// Offsets start at `window.start - video.start` (clamped to zero) and
/// advance by `clip_length` while below `window.end - video.start`. The
/// probed duration only drives the advisory warning: clips that overrun
/// the source are still planned and left for the extractor to truncate.
pub fn plan_clips(
    video: &VideoIdentity,
    probed_secs: f64,
    window: &BufferedWindow,
    clip_length: ClipLength,
) -> ClipPlan {
    let mut warnings = Vec::new();

    if video.start > window.raw_start {
        warnings.push(ConsistencyWarning::VideoStartsAfterTransect {
            video_start: video.start,
            transect_start: window.raw_start,
        });
    }

    let elapsed_at_end = window.end - video.start;
    let required_secs = delta_to_secs(elapsed_at_end);
    if required_secs > probed_secs {
        warnings.push(ConsistencyWarning::VideoEndsBeforeTransect {
            probed_secs,
            required_secs,
        });
    }

    let step = clip_length.as_delta();
    let mut elapsed = (window.start - video.start).max(TimeDelta::zero());
    let mut boundaries = Vec::new();
    while elapsed < elapsed_at_end {
        let start = video.start + elapsed;
        boundaries.push(ClipBoundary {
            offset: elapsed,
            duration: step,
            start,
            output_name: video.clip_name(start),
        });
        elapsed = elapsed + step;
    }

    ClipPlan {
        boundaries,
        warnings,
    }
}
