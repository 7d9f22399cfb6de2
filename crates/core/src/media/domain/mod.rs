pub mod clip_extractor;
pub mod media_probe;
