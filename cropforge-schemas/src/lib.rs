//! Plain data types shared by the recommendation pipeline and its front-ends.

pub mod artifact;
pub mod file_formats;
pub mod preset;
pub mod recommendation;
pub mod sample;
