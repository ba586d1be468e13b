//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - Teams(teamId)
//! - Players(playerId, teamId, age, height, foot)
//! - Matches(matchId, competition, homeTeamId, awayTeamId)
//! - Stadiums(stadiumId, capacity, teamId)
//! - Scores(playerId, matchId, amount)
//! - MatchInStadium(matchId, stadiumId, attendance)
//!
//! plus read-only views derived from them (see [`schema::VIEWS`]).

pub mod pool;
pub mod schema;
pub mod store;
pub mod violation;

pub use pool::{DbPool, PooledConnection};
pub use store::{LeagueStore, LeagueStats};
pub use violation::{Violation, WriteTarget};
