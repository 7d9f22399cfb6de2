/// Margin added before the transect start and after its end, in seconds.
pub const TRANSECT_BUFFER_SECS: i64 = 30;

/// Extra time appended to a clip's probed duration when selecting telemetry.
pub const CAPTION_WINDOW_PAD_SECS: i64 = 1;

/// Date and time segments of a video filename, joined by a space.
pub const FILENAME_STAMP_FORMAT: &str = "%Y%m%d %H%M%S";

/// Date and time segments as they appear in a filename.
pub const FILENAME_STAMP_OUTPUT_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Timestamp format used by the dive log and the telemetry log.
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const TIME_OF_DAY_FORMAT: &str = "%H:%M:%S";

pub const DEFAULT_CLIP_MINUTES: u32 = 10;

/// 1-based dive log columns: dive name, transect start, transect end.
pub const DEFAULT_DIVE_COLUMN: usize = 6;
pub const DEFAULT_START_COLUMN: usize = 11;
pub const DEFAULT_END_COLUMN: usize = 12;

pub const DEFAULT_DATETIME_FIELD: &str = "Datetime";
pub const DEFAULT_DIVE_FIELD: &str = "Dive_Name";
pub const DEFAULT_CAPTION_FIELDS: &[&str] = &[
    "ROV_Longitude_loess",
    "ROV_Latitude_loess",
    "Depth_m",
    "Speed_kts",
    "Altitude_m",
];

/// Literal tokens stripped from raw field names to build caption labels.
pub const DEFAULT_LABEL_NOISE_TOKENS: &[&str] = &["ROV_", "loess"];

/// Label of the time-of-day field derived from each row's datetime.
pub const TIME_LABEL: &str = "Time";

/// Case-sensitive name fragments that mark a positional field.
pub const POSITION_FIELD_TOKENS: &[&str] = &["Lat", "Lon", "Time"];

pub const POSITION_DECIMALS: u32 = 5;
pub const MEASUREMENT_DECIMALS: u32 = 1;

/// Separator between `label: value` pairs on one caption line.
pub const CAPTION_FIELD_SEPARATOR: &str = "   ";

pub const CAPTION_EXTENSION: &str = "srt";

pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "m4v", "mkv", "avi", "mts", "m2ts"];
