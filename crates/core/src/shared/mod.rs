pub mod constants;
pub mod error;
pub mod timecode;
pub mod video_identity;
