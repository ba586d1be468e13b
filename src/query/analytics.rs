//! Analytic read queries
//!
//! Each query is a single statement over the base tables and the derived
//! views of [`crate::storage::schema`]. Ordering and tie-breaks are part of
//! each query's contract.

use rusqlite::{params, Params};
use crate::Result;
use crate::storage::LeagueStore;

/// Capacity a stadium must exceed for its team to count as rich
pub const RICH_CAPACITY: i64 = 55_000;

/// Minimum home attendance a team must exceed to count as popular
pub const POPULAR_ATTENDANCE: i64 = 40_000;

pub const ACTIVE_TALL_TEAMS_LIMIT: i64 = 5;
pub const POPULAR_TEAMS_LIMIT: i64 = 10;
pub const MOST_GOALS_LIMIT: i64 = 5;
pub const CLOSE_PLAYERS_LIMIT: i64 = 10;

/// Analytic queries over a league store
pub struct Analytics<'a> {
    store: &'a LeagueStore,
}

impl<'a> Analytics<'a> {
    pub fn new(store: &'a LeagueStore) -> Self {
        Self { store }
    }

    /// Run a query whose single column is an id
    fn ids(&self, sql: &str, params: impl Params) -> Result<Vec<i64>> {
        let conn = self.store.conn()?;
        let mut stmt = conn.prepare(sql)?;
        let ids = stmt
            .query_map(params, |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<i64>>>()?;
        tracing::debug!("Query returned {} ids", ids.len());
        Ok(ids)
    }

    /// Teams that played a match and have at least two players taller than 190.
    ///
    /// Highest team ids first, at most 5.
    pub fn active_tall_teams(&self) -> Result<Vec<i64>> {
        self.ids(
            "SELECT teamId FROM ActiveTallTeams ORDER BY teamId DESC LIMIT ?1",
            [ACTIVE_TALL_TEAMS_LIMIT],
        )
    }

    /// Active tall teams that own a stadium holding more than 55000.
    ///
    /// Lowest team ids first, at most 5.
    pub fn active_tall_rich_teams(&self) -> Result<Vec<i64>> {
        self.ids(
            r#"
            SELECT teamId FROM ActiveTallTeams
            INTERSECT
            SELECT teamId FROM Stadiums WHERE capacity > ?1
            ORDER BY teamId ASC
            LIMIT ?2
            "#,
            params![RICH_CAPACITY, ACTIVE_TALL_TEAMS_LIMIT],
        )
    }

    /// Teams with no recorded home attendance, or whose lowest recorded home
    /// attendance is above 40000. Highest team ids first, at most 10.
    pub fn popular_teams(&self) -> Result<Vec<i64>> {
        self.ids(
            r#"
            SELECT teamId FROM Teams
            WHERE teamId NOT IN (SELECT teamId FROM MinAttendancePerTeam)
            UNION
            SELECT T.teamId AS teamId FROM Teams T
            JOIN MinAttendancePerTeam A ON A.teamId = T.teamId
            WHERE A.minAttendance > ?1
            ORDER BY teamId DESC
            LIMIT ?2
            "#,
            params![POPULAR_ATTENDANCE, POPULAR_TEAMS_LIMIT],
        )
    }

    /// Every stadium, most goals scored there first, ties by lowest id
    pub fn most_attractive_stadiums(&self) -> Result<Vec<i64>> {
        self.ids(
            "SELECT stadiumId FROM GoalsPerStadium ORDER BY goals DESC, stadiumId ASC",
            [],
        )
    }

    /// Top scorers of a team over their whole career, ties by highest id
    pub fn most_goals_for_team(&self, team_id: i64) -> Result<Vec<i64>> {
        self.ids(
            r#"
            SELECT playerId FROM GoalsPerPlayer
            WHERE teamId = ?1
            ORDER BY goals DESC, playerId DESC
            LIMIT ?2
            "#,
            params![team_id, MOST_GOALS_LIMIT],
        )
    }

    /// Players who scored alongside `player_id` in at least half as many
    /// matches as the best such companion.
    ///
    /// The player counts as their own companion, so the bar is half the
    /// number of matches `player_id` scored in. When they never scored, every
    /// other player qualifies. Lowest ids first, at most 10.
    pub fn close_players(&self, player_id: i64) -> Result<Vec<i64>> {
        self.ids(
            r#"
            WITH Shared AS (
                SELECT friendId AS playerId, COUNT(*) AS together
                FROM Friends
                WHERE playerId = ?1
                GROUP BY friendId
            )
            SELECT P.playerId FROM Players P
            LEFT JOIN Shared S ON S.playerId = P.playerId
            WHERE P.playerId <> ?1
              AND 2 * COALESCE(S.together, 0) >= COALESCE((SELECT MAX(together) FROM Shared), 0)
            ORDER BY P.playerId ASC
            LIMIT ?2
            "#,
            params![player_id, CLOSE_PLAYERS_LIMIT],
        )
    }

    /// Whether the player scored at least half of all goals in the match.
    ///
    /// A player who did not score is never a winner, including in a
    /// goalless match.
    pub fn player_is_winner(&self, player_id: i64, match_id: i64) -> Result<bool> {
        let conn = self.store.conn()?;
        let winner: bool = conn.query_row(
            r#"
            SELECT COALESCE((
                SELECT COALESCE(S.amount, 0) > 0 AND 2 * COALESCE(S.amount, 0) >= G.goals
                FROM GoalsPerMatch G
                LEFT JOIN Scores S ON S.matchId = G.matchId AND S.playerId = ?1
                WHERE G.matchId = ?2
            ), 0)
            "#,
            params![player_id, match_id],
            |row| row.get(0),
        )?;
        Ok(winner)
    }

    /// Mean attendance of the matches hosted by a stadium, 0 if none
    pub fn average_attendance_in_stadium(&self, stadium_id: i64) -> Result<f64> {
        let conn = self.store.conn()?;
        let avg: f64 = conn.query_row(
            "SELECT COALESCE(AVG(attendance), 0.0) FROM MatchInStadium WHERE stadiumId = ?1",
            [stadium_id],
            |row| row.get(0),
        )?;
        Ok(avg)
    }

    /// Goals scored in all matches hosted by a stadium, 0 if none
    pub fn stadium_total_goals(&self, stadium_id: i64) -> Result<i64> {
        let conn = self.store.conn()?;
        let total: i64 = conn.query_row(
            r#"
            SELECT COALESCE(SUM(G.goals), 0)
            FROM MatchInStadium MIS
            JOIN GoalsPerMatch G ON G.matchId = MIS.matchId
            WHERE MIS.stadiumId = ?1
            "#,
            [stadium_id],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    /// Goals a player scored in one match, 0 if none (read from `PersonalStats`)
    pub fn personal_goals(&self, player_id: i64, match_id: i64) -> Result<i64> {
        let conn = self.store.conn()?;
        let goals: i64 = conn.query_row(
            r#"
            SELECT COALESCE(MAX(amount), 0) FROM PersonalStats
            WHERE playerId = ?1 AND matchId = ?2
            "#,
            params![player_id, match_id],
            |row| row.get(0),
        )?;
        Ok(goals)
    }
}
