pub mod dive_log_index;
pub mod field_format;
pub mod telemetry_index;
pub mod telemetry_layout;
pub mod transect_window;
