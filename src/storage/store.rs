//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, params, OptionalExtension};
use crate::{Result, Error};
use crate::entity::{Competition, Foot, Match, Player, Stadium, Team};
use super::pool::{self, DbPool, PooledConnection};
use super::schema::{self, TABLES};
use super::violation::{classify, WriteTarget};

/// SQLite-backed storage for the league.
///
/// Cloning is cheap: clones share the same connection pool.
#[derive(Clone)]
pub struct LeagueStore {
    pool: DbPool,
}

impl LeagueStore {
    /// Open a database file (creates it and any missing relations)
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_pool_size(path, pool::DEFAULT_POOL_SIZE)
    }

    pub fn open_with_pool_size(path: &Path, pool_size: u32) -> Result<Self> {
        let store = Self::connect(path, pool_size)?;
        store.ensure_schema()?;
        Ok(store)
    }

    /// Open a database file without creating any relations
    pub fn connect(path: &Path, pool_size: u32) -> Result<Self> {
        Ok(Self { pool: pool::file_pool(path, pool_size)? })
    }

    /// Open an in-memory database with the full schema (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let store = Self { pool: pool::memory_pool()? };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Wrap an existing pool without touching the schema
    pub fn from_pool(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Check out a connection; it returns to the pool when dropped
    pub fn conn(&self) -> Result<PooledConnection> {
        Ok(self.pool.get()?)
    }

    // ========== Schema Management ==========

    /// Create every table and view.
    ///
    /// Fails with `AlreadyExists` if any relation is already present, in
    /// which case nothing is created.
    pub fn create_schema(&self) -> Result<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        for relation in schema::creation_order() {
            if relation_exists(&tx, relation.name)? {
                return Err(Error::AlreadyExists(format!(
                    "{} {}",
                    relation.kind.as_str(),
                    relation.name
                )));
            }
            tx.execute_batch(relation.create)?;
        }
        tx.commit()?;
        tracing::info!("Created league schema");
        Ok(())
    }

    /// Create whichever relations are missing
    pub fn ensure_schema(&self) -> Result<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let mut created = 0;
        for relation in schema::creation_order() {
            if !relation_exists(&tx, relation.name)? {
                tx.execute_batch(relation.create)?;
                created += 1;
            }
        }
        tx.commit()?;
        if created > 0 {
            tracing::debug!("Created {} missing relations", created);
        }
        Ok(())
    }

    /// Drop views, then tables, children before parents
    pub fn drop_schema(&self) -> Result<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        for relation in schema::teardown_order() {
            tx.execute(&relation.drop_sql(), [])?;
        }
        tx.commit()?;
        tracing::info!("Dropped league schema");
        Ok(())
    }

    /// Delete every row, children before parents; the schema stays
    pub fn clear_schema(&self) -> Result<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        for table in TABLES.iter().rev() {
            tx.execute(&format!("DELETE FROM {}", table.name), [])?;
        }
        tx.commit()?;
        tracing::info!("Cleared all league tables");
        Ok(())
    }

    /// Whether every declared table and view exists
    pub fn schema_exists(&self) -> Result<bool> {
        let conn = self.conn()?;
        for relation in schema::creation_order() {
            if !relation_exists(&conn, relation.name)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<LeagueStats> {
        let conn = self.conn()?;
        let count = |table: &str| -> Result<usize> {
            let n: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))?;
            Ok(n as usize)
        };
        Ok(LeagueStats {
            teams: count("Teams")?,
            players: count("Players")?,
            matches: count("Matches")?,
            stadiums: count("Stadiums")?,
            scores: count("Scores")?,
            hosted_matches: count("MatchInStadium")?,
        })
    }

    // ========== Write Helpers ==========

    fn insert(&self, sql: &str, params: impl rusqlite::Params, target: WriteTarget, what: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(sql, params).map_err(|e| classify(e, target, what))?;
        tracing::debug!("Inserted {}", what);
        Ok(())
    }

    /// Run a DELETE; zero affected rows means the record was not there
    fn delete(&self, sql: &str, params: impl rusqlite::Params, what: &str) -> Result<()> {
        let conn = self.conn()?;
        let affected = conn
            .execute(sql, params)
            .map_err(|e| classify(e, WriteTarget::Entity, what))?;
        if affected == 0 {
            return Err(Error::NotExists(what.to_string()));
        }
        tracing::debug!("Deleted {}", what);
        Ok(())
    }

    // ========== Team Operations ==========

    pub fn add_team(&self, team_id: i64) -> Result<()> {
        let team = Team::new(team_id);
        team.validate()?;
        self.insert(
            "INSERT INTO Teams (teamId) VALUES (?1)",
            params![team.id],
            WriteTarget::Entity,
            &format!("team {}", team.id),
        )
    }

    pub fn get_team(&self, team_id: i64) -> Result<Option<Team>> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT teamId FROM Teams WHERE teamId = ?1",
            [team_id],
            |row| Ok(Team::new(row.get(0)?)),
        )
        .optional()
        .map_err(Into::into)
    }

    /// Delete a team together with its players and stadium
    pub fn delete_team(&self, team_id: i64) -> Result<()> {
        self.delete(
            "DELETE FROM Teams WHERE teamId = ?1",
            [team_id],
            &format!("team {}", team_id),
        )
    }

    // ========== Player Operations ==========

    pub fn add_player(&self, player: &Player) -> Result<()> {
        player.validate()?;
        self.insert(
            r#"
            INSERT INTO Players (playerId, teamId, age, height, foot)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![player.id, player.team_id, player.age, player.height, player.foot.as_str()],
            WriteTarget::Entity,
            &format!("player {}", player.id),
        )
    }

    /// Get a player by id; `None` when no such player exists
    pub fn get_player_profile(&self, player_id: i64) -> Result<Option<Player>> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT playerId, teamId, age, height, foot FROM Players WHERE playerId = ?1",
            [player_id],
            row_to_player,
        )
        .optional()
        .map_err(Into::into)
    }

    pub fn delete_player(&self, player: &Player) -> Result<()> {
        self.delete(
            "DELETE FROM Players WHERE playerId = ?1",
            [player.id],
            &format!("player {}", player.id),
        )
    }

    // ========== Match Operations ==========

    pub fn add_match(&self, m: &Match) -> Result<()> {
        m.validate()?;
        self.insert(
            r#"
            INSERT INTO Matches (matchId, competition, homeTeamId, awayTeamId)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![m.id, m.competition.as_str(), m.home_team_id, m.away_team_id],
            WriteTarget::Entity,
            &format!("match {}", m.id),
        )
    }

    pub fn get_match_profile(&self, match_id: i64) -> Result<Option<Match>> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT matchId, competition, homeTeamId, awayTeamId FROM Matches WHERE matchId = ?1",
            [match_id],
            row_to_match,
        )
        .optional()
        .map_err(Into::into)
    }

    pub fn delete_match(&self, m: &Match) -> Result<()> {
        self.delete(
            "DELETE FROM Matches WHERE matchId = ?1",
            [m.id],
            &format!("match {}", m.id),
        )
    }

    // ========== Stadium Operations ==========

    pub fn add_stadium(&self, stadium: &Stadium) -> Result<()> {
        stadium.validate()?;
        self.insert(
            "INSERT INTO Stadiums (stadiumId, capacity, teamId) VALUES (?1, ?2, ?3)",
            params![stadium.id, stadium.capacity, stadium.team_id],
            WriteTarget::Entity,
            &format!("stadium {}", stadium.id),
        )
    }

    pub fn get_stadium_profile(&self, stadium_id: i64) -> Result<Option<Stadium>> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT stadiumId, capacity, teamId FROM Stadiums WHERE stadiumId = ?1",
            [stadium_id],
            |row| Ok(Stadium::new(row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .optional()
        .map_err(Into::into)
    }

    pub fn delete_stadium(&self, stadium: &Stadium) -> Result<()> {
        self.delete(
            "DELETE FROM Stadiums WHERE stadiumId = ?1",
            [stadium.id],
            &format!("stadium {}", stadium.id),
        )
    }

    // ========== Relationship Operations ==========

    /// Record that `player` scored `amount` goals in `m`
    pub fn player_scored_in_match(&self, m: &Match, player: &Player, amount: i64) -> Result<()> {
        if amount <= 0 {
            return Err(Error::BadParams(format!("amount must be positive, got {}", amount)));
        }
        self.insert(
            "INSERT INTO Scores (playerId, matchId, amount) VALUES (?1, ?2, ?3)",
            params![player.id, m.id, amount],
            WriteTarget::Relationship,
            &format!("score of player {} in match {}", player.id, m.id),
        )
    }

    pub fn player_didnt_score_in_match(&self, m: &Match, player: &Player) -> Result<()> {
        self.delete(
            "DELETE FROM Scores WHERE playerId = ?1 AND matchId = ?2",
            params![player.id, m.id],
            &format!("score of player {} in match {}", player.id, m.id),
        )
    }

    /// Record that `m` was played in `stadium` in front of `attendance` people
    pub fn match_in_stadium(&self, m: &Match, stadium: &Stadium, attendance: i64) -> Result<()> {
        if attendance <= 0 {
            return Err(Error::BadParams(format!(
                "attendance must be positive, got {}",
                attendance
            )));
        }
        self.insert(
            "INSERT INTO MatchInStadium (matchId, stadiumId, attendance) VALUES (?1, ?2, ?3)",
            params![m.id, stadium.id, attendance],
            WriteTarget::Relationship,
            &format!("match {} in stadium {}", m.id, stadium.id),
        )
    }

    pub fn match_not_in_stadium(&self, m: &Match, stadium: &Stadium) -> Result<()> {
        self.delete(
            "DELETE FROM MatchInStadium WHERE matchId = ?1 AND stadiumId = ?2",
            params![m.id, stadium.id],
            &format!("match {} in stadium {}", m.id, stadium.id),
        )
    }
}

fn relation_exists(conn: &Connection, name: &str) -> Result<bool> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?1)",
        [name],
        |row| row.get(0),
    )?;
    Ok(exists)
}

/// Helper to convert a row to a Player
fn row_to_player(row: &rusqlite::Row) -> rusqlite::Result<Player> {
    let foot_str: String = row.get(4)?;
    let foot: Foot = foot_str.parse().map_err(|e: Error| {
        rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Player {
        id: row.get(0)?,
        team_id: row.get(1)?,
        age: row.get(2)?,
        height: row.get(3)?,
        foot,
    })
}

/// Helper to convert a row to a Match
fn row_to_match(row: &rusqlite::Row) -> rusqlite::Result<Match> {
    let competition_str: String = row.get(1)?;
    let competition: Competition = competition_str.parse().map_err(|e: Error| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Match {
        id: row.get(0)?,
        competition,
        home_team_id: row.get(2)?,
        away_team_id: row.get(3)?,
    })
}

/// Row counts per table
#[derive(Debug, Clone, serde::Serialize)]
pub struct LeagueStats {
    pub teams: usize,
    pub players: usize,
    pub matches: usize,
    pub stadiums: usize,
    pub scores: usize,
    pub hosted_matches: usize,
}

impl LeagueStats {
    pub fn rows(&self) -> [(&'static str, usize); 6] {
        [
            ("Teams", self.teams),
            ("Players", self.players),
            ("Matches", self.matches),
            ("Stadiums", self.stadiums),
            ("Scores", self.scores),
            ("Hosted matches", self.hosted_matches),
        ]
    }
}

impl std::fmt::Display for LeagueStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "League Statistics:")?;
        for (label, value) in self.rows() {
            writeln!(f, "  {}: {}", label, value)?;
        }
        Ok(())
    }
}
