pub mod batch_summary;
pub mod clip_videos_use_case;
pub mod diagnostics;
pub mod generate_captions_use_case;
pub mod video_files;
