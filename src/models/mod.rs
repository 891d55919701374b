//! Core data models for the league ledger.

mod champion;
mod game;
mod ids;
mod member;
mod standings;
mod team_season;
mod transaction;
pub(crate) mod wire;

pub use champion::*;
pub use game::*;
pub use ids::*;
pub use member::*;
pub use standings::*;
pub use team_season::*;
pub use transaction::*;
