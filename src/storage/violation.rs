//! Classification of engine errors into result codes
//!
//! Every write statement funnels its `rusqlite::Error` through [`classify`].
//! Foreign-key failures depend on what was being written: an entity naming a
//! missing parent is bad input, a relationship naming a missing player,
//! match or stadium refers to something that does not exist.

use rusqlite::ErrorCode;
use rusqlite::ffi;

use crate::Error;

/// What kind of row a failing statement was writing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteTarget {
    /// Teams, Players, Matches, Stadiums
    Entity,
    /// Scores, MatchInStadium
    Relationship,
}

/// Engine violation classes we distinguish
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    Unique,
    ForeignKey,
    Check,
    NotNull,
    TooBig,
    Other,
}

impl Violation {
    pub fn of(err: &rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(e, _) => match e.extended_code {
                ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                | ffi::SQLITE_CONSTRAINT_UNIQUE
                | ffi::SQLITE_CONSTRAINT_ROWID => Violation::Unique,
                ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Violation::ForeignKey,
                ffi::SQLITE_CONSTRAINT_CHECK => Violation::Check,
                ffi::SQLITE_CONSTRAINT_NOTNULL => Violation::NotNull,
                _ if e.code == ErrorCode::TooBig => Violation::TooBig,
                _ => Violation::Other,
            },
            rusqlite::Error::ToSqlConversionFailure(_)
            | rusqlite::Error::IntegralValueOutOfRange(_, _) => Violation::TooBig,
            _ => Violation::Other,
        }
    }
}

/// Turn an engine error raised while writing `what` into a classified error
pub fn classify(err: rusqlite::Error, target: WriteTarget, what: &str) -> Error {
    let violation = Violation::of(&err);
    if violation != Violation::Other {
        tracing::warn!("{:?} violation writing {}: {}", violation, what, err);
    }

    match (violation, target) {
        (Violation::Unique, _) => Error::AlreadyExists(what.to_string()),
        (Violation::ForeignKey, WriteTarget::Relationship) => Error::NotExists(format!(
            "{} refers to a missing record",
            what
        )),
        (Violation::ForeignKey, WriteTarget::Entity) => Error::BadParams(format!(
            "{} refers to a missing record",
            what
        )),
        (Violation::Check | Violation::NotNull | Violation::TooBig, _) => {
            Error::BadParams(format!("{}: {}", what, err))
        }
        (Violation::Other, _) => {
            tracing::error!("Unclassified failure writing {}: {}", what, err);
            Error::Storage(err)
        }
    }
}
