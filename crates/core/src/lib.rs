pub mod captions;
pub mod clipping;
pub mod media;
pub mod pipeline;
pub mod shared;
pub mod survey;
