//! # leaguedb - Sports league data-access layer
//!
//! A thin, strongly-typed layer over SQLite modeling a sports league.
//!
//! leaguedb provides:
//! - Value objects for teams, players, matches and stadiums
//! - A declarative schema (tables plus derived views) with setup, teardown and clear
//! - CRUD and relationship operations with classified result codes
//! - Analytic queries (popular teams, attractive stadiums, close players, ...)

pub mod entity;
pub mod storage;
pub mod query;
pub mod config;
pub mod ui;


// Re-exports for convenient access
pub use entity::{Competition, Foot, Match, Player, Stadium, Team};
pub use storage::LeagueStore;
pub use query::Analytics;

/// Result type alias for leaguedb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for leaguedb operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Does not exist: {0}")]
    NotExists(String),

    #[error("Bad parameters: {0}")]
    BadParams(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),
}

impl Error {
    /// The result code this error reports to callers
    pub fn return_value(&self) -> ReturnValue {
        match self {
            Error::AlreadyExists(_) => ReturnValue::AlreadyExists,
            Error::NotExists(_) => ReturnValue::NotExists,
            Error::BadParams(_) => ReturnValue::BadParams,
            Error::Storage(_) | Error::Pool(_) => ReturnValue::Error,
        }
    }
}

/// Outcome of a write operation, as reported to callers.
///
/// Every [`Error`] maps onto exactly one of these; `Ok` covers success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReturnValue {
    Ok,
    AlreadyExists,
    NotExists,
    BadParams,
    Error,
}

impl ReturnValue {
    pub fn from_result<T>(result: &Result<T>) -> Self {
        match result {
            Ok(_) => ReturnValue::Ok,
            Err(e) => e.return_value(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReturnValue::Ok => "OK",
            ReturnValue::AlreadyExists => "ALREADY_EXISTS",
            ReturnValue::NotExists => "NOT_EXISTS",
            ReturnValue::BadParams => "BAD_PARAMS",
            ReturnValue::Error => "ERROR",
        }
    }
}

impl<T> From<&Result<T>> for ReturnValue {
    fn from(result: &Result<T>) -> Self {
        ReturnValue::from_result(result)
    }
}

impl std::fmt::Display for ReturnValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::AlreadyExists("x".into()).return_value(), ReturnValue::AlreadyExists);
        assert_eq!(Error::NotExists("x".into()).return_value(), ReturnValue::NotExists);
        assert_eq!(Error::BadParams("x".into()).return_value(), ReturnValue::BadParams);
        assert_eq!(
            Error::Storage(rusqlite::Error::QueryReturnedNoRows).return_value(),
            ReturnValue::Error
        );
    }

    #[test]
    fn test_from_result() {
        let ok: Result<()> = Ok(());
        let bad: Result<()> = Err(Error::BadParams("age".into()));
        assert_eq!(ReturnValue::from(&ok), ReturnValue::Ok);
        assert_eq!(ReturnValue::from(&bad), ReturnValue::BadParams);
        assert_eq!(ReturnValue::BadParams.to_string(), "BAD_PARAMS");
    }
}
