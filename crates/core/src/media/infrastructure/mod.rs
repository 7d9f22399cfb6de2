pub mod ffmpeg_clip_extractor;
pub mod ffmpeg_media_probe;
#[cfg(test)]
mod test_video;
