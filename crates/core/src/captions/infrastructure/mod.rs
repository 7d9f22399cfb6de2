pub mod srt_caption_writer;
