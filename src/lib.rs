//! # FFL Ledger
//!
//! Record keeping and standings for a long-running fantasy football league.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (members, team seasons, games, champions, transactions)
//! - **storage**: JSONL table files under the data directory
//! - **calculate**: Standings aggregation, week ordering and other derived views
//! - **names**: Cached member display names
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod models;
pub mod names;
pub mod storage;

pub use models::*;
