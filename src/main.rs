//! leaguedb CLI - Command-line interface for the league data-access layer

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use leaguedb::config::{self, LeagueConfig};
use leaguedb::ui;
use leaguedb::{Analytics, Competition, Foot, LeagueStore, Match, Player, ReturnValue, Stadium};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "leaguedb")]
#[command(version)]
#[command(about = "Sports league data-access layer - teams, players, matches and stadiums over SQLite")]
#[command(long_about = r#"
leaguedb stores a sports league in SQLite and answers questions about it:
  • CRUD for teams, players, matches and stadiums
  • Who scored where, which match was played in which stadium
  • Popular teams, attractive stadiums, top scorers, close players

Example usage:
  leaguedb setup
  leaguedb team add 1
  leaguedb player add --id 1 --team 1 --age 20 --height 195 --foot Left
  leaguedb query popular
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the database file (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a leaguedb.toml config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Create all tables and views
    Setup,

    /// Drop all views and tables
    Teardown,

    /// Delete every row, keeping the schema
    Clear,

    /// Show row counts per table
    Stats,

    /// Team operations
    Team {
        #[command(subcommand)]
        action: TeamAction,
    },

    /// Player operations
    Player {
        #[command(subcommand)]
        action: PlayerAction,
    },

    /// Match operations
    Match {
        #[command(subcommand)]
        action: MatchAction,
    },

    /// Stadium operations
    Stadium {
        #[command(subcommand)]
        action: StadiumAction,
    },

    /// Record that a player scored in a match
    Score {
        #[arg(long)]
        player: i64,
        #[arg(long = "match")]
        match_id: i64,
        #[arg(long)]
        amount: i64,
    },

    /// Remove a player's score from a match
    Unscore {
        #[arg(long)]
        player: i64,
        #[arg(long = "match")]
        match_id: i64,
    },

    /// Record that a match was played in a stadium
    Host {
        #[arg(long = "match")]
        match_id: i64,
        #[arg(long)]
        stadium: i64,
        #[arg(long)]
        attendance: i64,
    },

    /// Remove a match's stadium record
    Unhost {
        #[arg(long = "match")]
        match_id: i64,
        #[arg(long)]
        stadium: i64,
    },

    /// Run an analytic query
    Query {
        #[command(subcommand)]
        query: QueryKind,
    },
}

#[derive(Subcommand)]
enum TeamAction {
    Add { id: i64 },
    Get { id: i64 },
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum PlayerAction {
    Add {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        team: i64,
        #[arg(long)]
        age: i64,
        /// Height in centimeters
        #[arg(long)]
        height: i64,
        /// Left or Right
        #[arg(long)]
        foot: String,
    },
    Get { id: i64 },
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum MatchAction {
    Add {
        #[arg(long)]
        id: i64,
        /// International or Domestic
        #[arg(long)]
        competition: String,
        #[arg(long)]
        home: i64,
        #[arg(long)]
        away: i64,
    },
    Get { id: i64 },
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum StadiumAction {
    Add {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        capacity: i64,
        /// Owning team
        #[arg(long)]
        team: Option<i64>,
    },
    Get { id: i64 },
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum QueryKind {
    /// Active teams with at least two players taller than 190
    ActiveTall,
    /// Active tall teams owning a stadium above 55000 seats
    ActiveTallRich,
    /// Teams with no recorded home attendance or always above 40000
    Popular,
    /// Stadiums ordered by goals scored there
    Attractive,
    /// A team's top scorers
    MostGoals { team: i64 },
    /// Players who often scored alongside a player
    Close { player: i64 },
    /// Whether a player scored at least half the goals of a match
    Winner {
        #[arg(long)]
        player: i64,
        #[arg(long = "match")]
        match_id: i64,
    },
    /// Average attendance of a stadium
    AvgAttendance { stadium: i64 },
    /// Total goals scored in a stadium
    StadiumGoals { stadium: i64 },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let league_config = config::load_config(Some(config_path.as_path()))?.unwrap_or_default();
    let cwd = std::env::current_dir()?;
    let db_path = league_config.database_path(cli.database.as_deref(), &cwd);
    let format = cli.format;

    match cli.command {
        Commands::Init { force } => {
            let written = LeagueConfig {
                database: Some(db_path.display().to_string()),
                pool_size: Some(league_config.pool_size()),
            };
            config::write_config(&config_path, &written, force)?;
            ui::success(&format!("Wrote {}", config_path.display()));
        }

        Commands::Setup => {
            let store = connect(&db_path, &league_config)?;
            let result = store.create_schema();
            report(format, "setup", &result)?;
        }

        Commands::Teardown => {
            let store = connect(&db_path, &league_config)?;
            let result = store.drop_schema();
            report(format, "teardown", &result)?;
        }

        Commands::Clear => {
            let store = open(&db_path, &league_config)?;
            let result = store.clear_schema();
            report(format, "clear", &result)?;
        }

        Commands::Stats => {
            let store = open(&db_path, &league_config)?;
            let stats = store.stats()?;
            if format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                ui::header(&format!("League Statistics ({})", db_path.display()));
                println!("{}", ui::stats_table(&stats.rows()));
            }
        }

        Commands::Team { action } => {
            let store = open(&db_path, &league_config)?;
            match action {
                TeamAction::Add { id } => {
                    report(format, &format!("add team {}", id), &store.add_team(id))?;
                }
                TeamAction::Get { id } => {
                    let team = store.get_team(id)?;
                    if format == OutputFormat::Json {
                        println!("{}", serde_json::to_string_pretty(&team)?);
                    } else if team.is_some() {
                        ui::info("Team", &id.to_string());
                    } else {
                        ui::warn(&format!("Team {} not found", id));
                    }
                }
                TeamAction::Delete { id } => {
                    report(format, &format!("delete team {}", id), &store.delete_team(id))?;
                }
            }
        }

        Commands::Player { action } => {
            let store = open(&db_path, &league_config)?;
            match action {
                PlayerAction::Add { id, team, age, height, foot } => {
                    let result = foot
                        .parse::<Foot>()
                        .and_then(|foot| store.add_player(&Player::new(id, team, age, height, foot)));
                    report(format, &format!("add player {}", id), &result)?;
                }
                PlayerAction::Get { id } => {
                    show_profile(format, "Player", id, store.get_player_profile(id)?)?;
                }
                PlayerAction::Delete { id } => {
                    report(format, &format!("delete player {}", id), &store.delete_player(&player_ref(id)))?;
                }
            }
        }

        Commands::Match { action } => {
            let store = open(&db_path, &league_config)?;
            match action {
                MatchAction::Add { id, competition, home, away } => {
                    let result = competition
                        .parse::<Competition>()
                        .and_then(|competition| store.add_match(&Match::new(id, competition, home, away)));
                    report(format, &format!("add match {}", id), &result)?;
                }
                MatchAction::Get { id } => {
                    show_profile(format, "Match", id, store.get_match_profile(id)?)?;
                }
                MatchAction::Delete { id } => {
                    report(format, &format!("delete match {}", id), &store.delete_match(&match_ref(id)))?;
                }
            }
        }

        Commands::Stadium { action } => {
            let store = open(&db_path, &league_config)?;
            match action {
                StadiumAction::Add { id, capacity, team } => {
                    let result = store.add_stadium(&Stadium::new(id, capacity, team));
                    report(format, &format!("add stadium {}", id), &result)?;
                }
                StadiumAction::Get { id } => {
                    show_profile(format, "Stadium", id, store.get_stadium_profile(id)?)?;
                }
                StadiumAction::Delete { id } => {
                    report(format, &format!("delete stadium {}", id), &store.delete_stadium(&stadium_ref(id)))?;
                }
            }
        }

        Commands::Score { player, match_id, amount } => {
            let store = open(&db_path, &league_config)?;
            let result = store.player_scored_in_match(&match_ref(match_id), &player_ref(player), amount);
            report(format, &format!("player {} scored {} in match {}", player, amount, match_id), &result)?;
        }

        Commands::Unscore { player, match_id } => {
            let store = open(&db_path, &league_config)?;
            let result = store.player_didnt_score_in_match(&match_ref(match_id), &player_ref(player));
            report(format, &format!("remove score of player {} in match {}", player, match_id), &result)?;
        }

        Commands::Host { match_id, stadium, attendance } => {
            let store = open(&db_path, &league_config)?;
            let result = store.match_in_stadium(&match_ref(match_id), &stadium_ref(stadium), attendance);
            report(format, &format!("match {} in stadium {}", match_id, stadium), &result)?;
        }

        Commands::Unhost { match_id, stadium } => {
            let store = open(&db_path, &league_config)?;
            let result = store.match_not_in_stadium(&match_ref(match_id), &stadium_ref(stadium));
            report(format, &format!("match {} not in stadium {}", match_id, stadium), &result)?;
        }

        Commands::Query { query } => {
            let store = open(&db_path, &league_config)?;
            run_query(format, &Analytics::new(&store), query)?;
        }
    }

    Ok(())
}

fn connect(db_path: &Path, league_config: &LeagueConfig) -> anyhow::Result<LeagueStore> {
    config::ensure_db_dir(db_path)?;
    tracing::debug!("Connecting to {}", db_path.display());
    Ok(LeagueStore::connect(db_path, league_config.pool_size())?)
}

fn open(db_path: &Path, league_config: &LeagueConfig) -> anyhow::Result<LeagueStore> {
    config::ensure_db_dir(db_path)?;
    tracing::debug!("Opening {}", db_path.display());
    Ok(LeagueStore::open_with_pool_size(db_path, league_config.pool_size())?)
}

// Relationship and delete operations only look at ids.

fn player_ref(id: i64) -> Player {
    Player::new(id, 0, 0, 0, Foot::Left)
}

fn match_ref(id: i64) -> Match {
    Match::new(id, Competition::Domestic, 0, 0)
}

fn stadium_ref(id: i64) -> Stadium {
    Stadium::new(id, 0, None)
}

fn report<T>(format: OutputFormat, action: &str, result: &leaguedb::Result<T>) -> anyhow::Result<()> {
    let code = ReturnValue::from_result(result);
    if let Err(e) = result {
        tracing::debug!("{} failed: {}", action, e);
    }
    match format {
        OutputFormat::Json => {
            let data = serde_json::json!({ "action": action, "result": code });
            println!("{}", serde_json::to_string(&data)?);
        }
        OutputFormat::Text => ui::outcome(action, code),
    }
    Ok(())
}

fn show_profile<T>(format: OutputFormat, kind: &str, id: i64, entity: Option<T>) -> anyhow::Result<()>
where
    T: ui::Profile + serde::Serialize,
{
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&entity)?);
        return Ok(());
    }
    match entity {
        Some(entity) => println!("{}", ui::entity_table(&entity)),
        None => ui::warn(&format!("{} {} not found", kind, id)),
    }
    Ok(())
}

fn run_query(format: OutputFormat, analytics: &Analytics, query: QueryKind) -> anyhow::Result<()> {
    let (title, value) = match query {
        QueryKind::ActiveTall => ("Active tall teams", serde_json::json!(analytics.active_tall_teams()?)),
        QueryKind::ActiveTallRich => ("Active tall rich teams", serde_json::json!(analytics.active_tall_rich_teams()?)),
        QueryKind::Popular => ("Popular teams", serde_json::json!(analytics.popular_teams()?)),
        QueryKind::Attractive => ("Most attractive stadiums", serde_json::json!(analytics.most_attractive_stadiums()?)),
        QueryKind::MostGoals { team } => ("Top scorers", serde_json::json!(analytics.most_goals_for_team(team)?)),
        QueryKind::Close { player } => ("Close players", serde_json::json!(analytics.close_players(player)?)),
        QueryKind::Winner { player, match_id } => {
            ("Winner", serde_json::json!(analytics.player_is_winner(player, match_id)?))
        }
        QueryKind::AvgAttendance { stadium } => {
            ("Average attendance", serde_json::json!(analytics.average_attendance_in_stadium(stadium)?))
        }
        QueryKind::StadiumGoals { stadium } => {
            ("Total goals", serde_json::json!(analytics.stadium_total_goals(stadium)?))
        }
    };

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    match value.as_array() {
        Some(items) => {
            let ids: Vec<i64> = items.iter().filter_map(|v| v.as_i64()).collect();
            ui::id_list(title, &ids);
        }
        None => ui::summary_row(&format!("{}:", title), &value.to_string()),
    }
    Ok(())
}
