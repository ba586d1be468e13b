//! Database schema definitions
//!
//! Tables and views are declared once, in dependency order: every relation
//! only references relations declared before it. Creation walks the lists
//! forwards; dropping and clearing walk them backwards.

/// Height (cm) a player must exceed to count as tall
pub const TALL_HEIGHT: i64 = 190;

/// Number of tall players that make a team tall
pub const TALL_PLAYERS_PER_TEAM: i64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    Table,
    View,
}

impl RelationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::Table => "table",
            RelationKind::View => "view",
        }
    }
}

/// A named table or view and the statement that creates it
#[derive(Debug, Clone, Copy)]
pub struct Relation {
    pub name: &'static str,
    pub kind: RelationKind,
    pub create: &'static str,
}

impl Relation {
    const fn table(name: &'static str, create: &'static str) -> Self {
        Self { name, kind: RelationKind::Table, create }
    }

    const fn view(name: &'static str, create: &'static str) -> Self {
        Self { name, kind: RelationKind::View, create }
    }

    pub fn drop_sql(&self) -> String {
        match self.kind {
            RelationKind::Table => format!("DROP TABLE IF EXISTS {}", self.name),
            RelationKind::View => format!("DROP VIEW IF EXISTS {}", self.name),
        }
    }
}

pub const CREATE_TEAMS_TABLE: &str = r#"
CREATE TABLE Teams (
    teamId INTEGER NOT NULL PRIMARY KEY CHECK (teamId > 0)
)
"#;

pub const CREATE_PLAYERS_TABLE: &str = r#"
CREATE TABLE Players (
    playerId INTEGER NOT NULL PRIMARY KEY CHECK (playerId > 0),
    teamId INTEGER NOT NULL CHECK (teamId > 0)
        REFERENCES Teams(teamId) ON DELETE CASCADE,
    age INTEGER NOT NULL CHECK (age > 0),
    height INTEGER NOT NULL CHECK (height > 0),
    foot TEXT NOT NULL CHECK (foot IN ('Left', 'Right'))
)
"#;

pub const CREATE_MATCHES_TABLE: &str = r#"
CREATE TABLE Matches (
    matchId INTEGER NOT NULL PRIMARY KEY CHECK (matchId > 0),
    competition TEXT NOT NULL CHECK (competition IN ('International', 'Domestic')),
    homeTeamId INTEGER NOT NULL CHECK (homeTeamId > 0)
        REFERENCES Teams(teamId) ON DELETE CASCADE,
    awayTeamId INTEGER NOT NULL CHECK (awayTeamId > 0)
        REFERENCES Teams(teamId) ON DELETE CASCADE,
    CHECK (homeTeamId <> awayTeamId)
)
"#;

pub const CREATE_STADIUMS_TABLE: &str = r#"
CREATE TABLE Stadiums (
    stadiumId INTEGER NOT NULL PRIMARY KEY CHECK (stadiumId > 0),
    capacity INTEGER NOT NULL CHECK (capacity > 0),
    teamId INTEGER UNIQUE CHECK (teamId > 0)
        REFERENCES Teams(teamId) ON DELETE CASCADE
)
"#;

pub const CREATE_SCORES_TABLE: &str = r#"
CREATE TABLE Scores (
    playerId INTEGER NOT NULL REFERENCES Players(playerId) ON DELETE CASCADE,
    matchId INTEGER NOT NULL REFERENCES Matches(matchId) ON DELETE CASCADE,
    amount INTEGER NOT NULL CHECK (amount > 0),
    PRIMARY KEY (playerId, matchId)
)
"#;

pub const CREATE_MATCH_IN_STADIUM_TABLE: &str = r#"
CREATE TABLE MatchInStadium (
    matchId INTEGER NOT NULL PRIMARY KEY REFERENCES Matches(matchId) ON DELETE CASCADE,
    stadiumId INTEGER NOT NULL REFERENCES Stadiums(stadiumId) ON DELETE CASCADE,
    attendance INTEGER NOT NULL CHECK (attendance > 0)
)
"#;

/// Goals of every player in every match, 0 where the player did not score
pub const CREATE_PERSONAL_STATS_VIEW: &str = r#"
CREATE VIEW PersonalStats AS
SELECT P.playerId AS playerId, M.matchId AS matchId, COALESCE(S.amount, 0) AS amount
FROM Players P
CROSS JOIN Matches M
LEFT JOIN Scores S ON S.playerId = P.playerId AND S.matchId = M.matchId
"#;

pub const CREATE_GOALS_PER_MATCH_VIEW: &str = r#"
CREATE VIEW GoalsPerMatch AS
SELECT M.matchId AS matchId, COALESCE(SUM(S.amount), 0) AS goals
FROM Matches M
LEFT JOIN Scores S ON S.matchId = M.matchId
GROUP BY M.matchId
"#;

pub const CREATE_GOALS_PER_PLAYER_VIEW: &str = r#"
CREATE VIEW GoalsPerPlayer AS
SELECT P.playerId AS playerId, P.teamId AS teamId, COALESCE(SUM(S.amount), 0) AS goals
FROM Players P
LEFT JOIN Scores S ON S.playerId = P.playerId
GROUP BY P.playerId, P.teamId
"#;

pub const CREATE_ACTIVE_TEAMS_VIEW: &str = r#"
CREATE VIEW ActiveTeams AS
SELECT T.teamId AS teamId
FROM Teams T
WHERE T.teamId IN (SELECT homeTeamId FROM Matches UNION SELECT awayTeamId FROM Matches)
"#;

pub const CREATE_TALL_TEAMS_VIEW: &str = r#"
CREATE VIEW TallTeams AS
SELECT teamId
FROM Players
WHERE height > 190
GROUP BY teamId
HAVING COUNT(*) >= 2
"#;

pub const CREATE_ACTIVE_TALL_TEAMS_VIEW: &str = r#"
CREATE VIEW ActiveTallTeams AS
SELECT teamId FROM ActiveTeams
INTERSECT
SELECT teamId FROM TallTeams
"#;

/// Lowest recorded attendance over each team's home matches. Teams without
/// any recorded home attendance have no row.
pub const CREATE_MIN_ATTENDANCE_PER_TEAM_VIEW: &str = r#"
CREATE VIEW MinAttendancePerTeam AS
SELECT M.homeTeamId AS teamId, MIN(MIS.attendance) AS minAttendance
FROM Matches M
JOIN MatchInStadium MIS ON MIS.matchId = M.matchId
GROUP BY M.homeTeamId
"#;

pub const CREATE_GOALS_PER_STADIUM_VIEW: &str = r#"
CREATE VIEW GoalsPerStadium AS
SELECT St.stadiumId AS stadiumId, COALESCE(SUM(G.goals), 0) AS goals
FROM Stadiums St
LEFT JOIN MatchInStadium MIS ON MIS.stadiumId = St.stadiumId
LEFT JOIN GoalsPerMatch G ON G.matchId = MIS.matchId
GROUP BY St.stadiumId
"#;

/// Ordered pairs of players who scored in the same match, self pairs included
pub const CREATE_FRIENDS_VIEW: &str = r#"
CREATE VIEW Friends AS
SELECT A.playerId AS playerId, B.playerId AS friendId, A.matchId AS matchId
FROM Scores A
JOIN Scores B ON B.matchId = A.matchId
"#;

/// Tables in dependency order (parents first)
pub const TABLES: &[Relation] = &[
    Relation::table("Teams", CREATE_TEAMS_TABLE),
    Relation::table("Players", CREATE_PLAYERS_TABLE),
    Relation::table("Matches", CREATE_MATCHES_TABLE),
    Relation::table("Stadiums", CREATE_STADIUMS_TABLE),
    Relation::table("Scores", CREATE_SCORES_TABLE),
    Relation::table("MatchInStadium", CREATE_MATCH_IN_STADIUM_TABLE),
];

/// Views in dependency order (a view only reads relations declared above it)
pub const VIEWS: &[Relation] = &[
    Relation::view("PersonalStats", CREATE_PERSONAL_STATS_VIEW),
    Relation::view("GoalsPerMatch", CREATE_GOALS_PER_MATCH_VIEW),
    Relation::view("GoalsPerPlayer", CREATE_GOALS_PER_PLAYER_VIEW),
    Relation::view("ActiveTeams", CREATE_ACTIVE_TEAMS_VIEW),
    Relation::view("TallTeams", CREATE_TALL_TEAMS_VIEW),
    Relation::view("ActiveTallTeams", CREATE_ACTIVE_TALL_TEAMS_VIEW),
    Relation::view("MinAttendancePerTeam", CREATE_MIN_ATTENDANCE_PER_TEAM_VIEW),
    Relation::view("GoalsPerStadium", CREATE_GOALS_PER_STADIUM_VIEW),
    Relation::view("Friends", CREATE_FRIENDS_VIEW),
];

/// All relations in creation order
pub fn creation_order() -> impl Iterator<Item = &'static Relation> {
    TABLES.iter().chain(VIEWS.iter())
}

/// All relations in teardown order: views first, children before parents
pub fn teardown_order() -> impl Iterator<Item = &'static Relation> {
    VIEWS.iter().rev().chain(TABLES.iter().rev())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teardown_is_reverse_of_creation() {
        let created: Vec<_> = creation_order().map(|r| r.name).collect();
        let mut dropped: Vec<_> = teardown_order().map(|r| r.name).collect();
        dropped.reverse();
        assert_eq!(created, dropped);
    }

    #[test]
    fn test_tall_thresholds_match_view() {
        assert!(CREATE_TALL_TEAMS_VIEW.contains(&format!("height > {}", TALL_HEIGHT)));
        assert!(CREATE_TALL_TEAMS_VIEW.contains(&format!("COUNT(*) >= {}", TALL_PLAYERS_PER_TEAM)));
    }

    #[test]
    fn test_relations_are_declared_before_use() {
        let names: Vec<_> = creation_order().map(|r| r.name).collect();
        for (i, relation) in creation_order().enumerate() {
            for later in &names[i + 1..] {
                let needle = format!(" {} ", later);
                assert!(
                    !relation.create.contains(&needle),
                    "{} references {} declared after it",
                    relation.name,
                    later
                );
            }
        }
    }
}
