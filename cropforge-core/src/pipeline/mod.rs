//! The recommendation pipeline: crop stage, compatibility lookup, fertilizer stage.

pub mod engine;
pub mod state;
