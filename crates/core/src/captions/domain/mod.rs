pub mod caption_aligner;
pub mod caption_entry;
pub mod caption_writer;
