//! # Pickleball Stats
//!
//! Doubles score tracker that derives player and team statistics on demand
//! from the recorded match history.
//!
//! ## Architecture
//!
//! - **models**: Players, matches and the statistics shapes
//! - **calculate**: Pure aggregation (player stats, rankings, team streaks)
//! - **storage**: JSONL files behind the `Repository` trait
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation
//! - **seed**: Demo roster seeding

pub mod api;
pub mod calculate;
pub mod config;
pub mod models;
pub mod seed;
pub mod storage;

pub use models::*;
