//! Crop and fertilizer recommendation pipeline.
//!
//! Raw soil measurements are scaled and classified into a crop, the crop is
//! swapped for a stand-in when the fertilizer data never covered it, and the
//! crop and soil type are encoded and classified again into a fertilizer.

pub mod analysis;
pub mod artifacts;
pub mod classifier;
pub mod compatibility;
pub mod encoder;
pub mod error;
pub mod logger;
pub mod pipeline;
pub mod scaler;

#[cfg(test)]
mod testing;
