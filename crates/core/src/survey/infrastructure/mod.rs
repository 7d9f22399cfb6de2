pub mod csv_dive_log_reader;
pub mod csv_telemetry_reader;
