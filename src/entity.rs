//! League value objects
//!
//! Four entities are stored as rows, decoded in the column order of their
//! CREATE TABLE statements:
//! - `Team`: just an id
//! - `Player`: belongs to a team, with age, height and preferred foot
//! - `Match`: a competition between a home and an away team
//! - `Stadium`: a capacity and an optional owning team

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A player's preferred foot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Foot {
    Left,
    Right,
}

impl Foot {
    /// Get the string representation stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Foot::Left => "Left",
            Foot::Right => "Right",
        }
    }

    pub fn all() -> &'static [Foot] {
        &[Foot::Left, Foot::Right]
    }
}

impl FromStr for Foot {
    type Err = Error;

    /// Exact, case-sensitive match only.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Left" => Ok(Foot::Left),
            "Right" => Ok(Foot::Right),
            _ => Err(Error::BadParams(format!("Unknown foot: {}", s))),
        }
    }
}

impl std::fmt::Display for Foot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Competition classification of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Competition {
    International,
    Domestic,
}

impl Competition {
    /// Get the string representation stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Competition::International => "International",
            Competition::Domestic => "Domestic",
        }
    }

    pub fn all() -> &'static [Competition] {
        &[Competition::International, Competition::Domestic]
    }
}

impl FromStr for Competition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "International" => Ok(Competition::International),
            "Domestic" => Ok(Competition::Domestic),
            _ => Err(Error::BadParams(format!("Unknown competition: {}", s))),
        }
    }
}

impl std::fmt::Display for Competition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn require_positive(field: &str, value: i64) -> Result<()> {
    if value > 0 {
        Ok(())
    } else {
        Err(Error::BadParams(format!("{} must be positive, got {}", field, value)))
    }
}

/// A team. Teams carry no attributes beyond their id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Team {
    pub id: i64,
}

impl Team {
    pub fn new(id: i64) -> Self {
        Self { id }
    }

    pub fn validate(&self) -> Result<()> {
        require_positive("teamId", self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub id: i64,
    pub team_id: i64,
    pub age: i64,
    /// Height in centimeters
    pub height: i64,
    pub foot: Foot,
}

impl Player {
    pub fn new(id: i64, team_id: i64, age: i64, height: i64, foot: Foot) -> Self {
        Self { id, team_id, age, height, foot }
    }

    /// Check the domain constraints that do not need the database
    pub fn validate(&self) -> Result<()> {
        require_positive("playerId", self.id)?;
        require_positive("teamId", self.team_id)?;
        require_positive("age", self.age)?;
        require_positive("height", self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Match {
    pub id: i64,
    pub competition: Competition,
    pub home_team_id: i64,
    pub away_team_id: i64,
}

impl Match {
    pub fn new(id: i64, competition: Competition, home_team_id: i64, away_team_id: i64) -> Self {
        Self { id, competition, home_team_id, away_team_id }
    }

    /// Check the domain constraints that do not need the database.
    ///
    /// A team cannot play against itself.
    pub fn validate(&self) -> Result<()> {
        require_positive("matchId", self.id)?;
        require_positive("homeTeamId", self.home_team_id)?;
        require_positive("awayTeamId", self.away_team_id)?;
        if self.home_team_id == self.away_team_id {
            return Err(Error::BadParams(format!(
                "team {} cannot play against itself",
                self.home_team_id
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stadium {
    pub id: i64,
    pub capacity: i64,
    /// Owning team, if any. A team owns at most one stadium.
    pub team_id: Option<i64>,
}

impl Stadium {
    pub fn new(id: i64, capacity: i64, team_id: Option<i64>) -> Self {
        Self { id, capacity, team_id }
    }

    pub fn validate(&self) -> Result<()> {
        require_positive("stadiumId", self.id)?;
        require_positive("capacity", self.capacity)?;
        if let Some(team_id) = self.team_id {
            require_positive("teamId", team_id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foot_roundtrip() {
        for foot in Foot::all() {
            let parsed: Foot = foot.as_str().parse().unwrap();
            assert_eq!(*foot, parsed);
        }
    }

    #[test]
    fn test_enum_parsing_is_case_sensitive() {
        assert!(matches!("left".parse::<Foot>(), Err(Error::BadParams(_))));
        assert!(matches!("Lefti like it".parse::<Foot>(), Err(Error::BadParams(_))));
        assert!(matches!("Dome".parse::<Competition>(), Err(Error::BadParams(_))));
        assert!(matches!("domestic".parse::<Competition>(), Err(Error::BadParams(_))));
        assert!(matches!("DOMESTIC".parse::<Competition>(), Err(Error::BadParams(_))));
        assert_eq!("Domestic".parse::<Competition>().unwrap(), Competition::Domestic);
    }

    #[test]
    fn test_player_validation() {
        assert!(Player::new(1, 1, 20, 185, Foot::Left).validate().is_ok());
        assert!(Player::new(-1, 1, 20, 185, Foot::Left).validate().is_err());
        assert!(Player::new(1, -1, 20, 185, Foot::Left).validate().is_err());
        assert!(Player::new(1, 1, -20, 185, Foot::Left).validate().is_err());
        assert!(Player::new(1, 1, 20, 0, Foot::Left).validate().is_err());
    }

    #[test]
    fn test_match_against_itself() {
        let m = Match::new(1, Competition::Domestic, 1, 1);
        assert!(matches!(m.validate(), Err(Error::BadParams(_))));
    }

    #[test]
    fn test_stadium_validation() {
        assert!(Stadium::new(1, 100, None).validate().is_ok());
        assert!(Stadium::new(1, 100, Some(-1)).validate().is_err());
        assert!(Stadium::new(1, -100, Some(1)).validate().is_err());
        assert!(Team::new(0).validate().is_err());
    }
}
