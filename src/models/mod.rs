//! Core data models for the score tracker.

mod ids;
mod match_record;
mod player;
mod stats;

pub use ids::*;
pub use match_record::*;
pub use player::*;
pub use stats::*;
