use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ffl_ledger::api::{build_router, cors_layer, state::AppState};
use ffl_ledger::calculate::{
    aggregate, apply_member_names, available_years, game_log, league_totals, transaction_log,
    TransactionFilter,
};
use ffl_ledger::config::AppConfig;
use ffl_ledger::models::{
    ChampionEntry, GameResult, LeagueMember, MemberId, Scope, Season, TeamSeasonEntry,
    Transaction,
};
use ffl_ledger::names::MemberNames;
use ffl_ledger::storage::{EntityType, LeagueSnapshot, Record, StorageConfig, Table};

#[derive(Parser)]
#[command(name = "ffl-ledger")]
#[command(about = "Fantasy football league records and standings")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides config)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,

        /// Log all HTTP requests
        #[arg(long)]
        access_log: bool,
    },

    /// Print standings
    Standings {
        /// "all" or a season year
        #[arg(long, default_value = "all")]
        scope: String,
    },

    /// Print one member's games for a season, in week order
    GameLog {
        #[arg(long)]
        member: MemberId,

        #[arg(long)]
        year: Season,
    },

    /// Print transaction history
    Transactions {
        #[arg(long)]
        member: Option<MemberId>,

        #[arg(long)]
        year: Option<Season>,
    },

    /// Print league-wide totals
    Dashboard,

    /// Bulk-load a JSON array of rows into a table
    Import {
        /// Target table (league-members, team-data, game-data, champions, transactions)
        #[arg(long)]
        kind: String,

        /// JSON file containing an array of rows
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    config.logging.json |= cli.json_logs;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    if config.logging.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting ffl-ledger v{}", env!("CARGO_PKG_VERSION"));

    let storage = config.storage();

    match cli.command {
        Commands::Serve {
            host,
            port,
            access_log,
        } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.logging.access_log |= access_log;
            config.validate()?;

            let cors = cors_layer(&config.server.cors_origin)
                .with_context(|| format!("invalid CORS origin {:?}", config.server.cors_origin))?;
            let state = AppState::new(storage);
            match Table::<LeagueMember>::open(&state.storage).list() {
                Ok(members) => {
                    state.names.refresh(&members).await;
                    tracing::info!("Loaded {} league members", members.len());
                }
                Err(e) => tracing::warn!("Member names unavailable at startup: {}", e),
            }

            let mut app = build_router(state).layer(cors);
            if config.logging.access_log {
                app = app.layer(TraceLayer::new_for_http());
            }

            let addr = config.server.bind_addr();
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Standings { scope } => {
            let scope: Scope = scope.parse()?;
            let snapshot = LeagueSnapshot::load(&storage)?;
            let mut teams = aggregate(
                &snapshot.team_entries,
                &snapshot.games,
                &snapshot.champions,
                scope,
            );
            apply_member_names(&mut teams, &MemberNames::load(&storage));

            let years: Vec<String> = available_years(&snapshot.team_entries)
                .iter()
                .map(ToString::to_string)
                .collect();
            println!("=== Standings ({}) ===", scope);
            println!("Seasons: {}\n", years.join(", "));
            if teams.is_empty() {
                println!("No teams in scope.");
            }
            for team in &teams {
                println!(
                    "{:>3}. [{:<2}] {:<28} {:<16} {:>3}-{:<3}-{:<2} {:>6}  PF {:>6}  PA {:>6}  Titles {}  {}",
                    team.rank,
                    team.initials,
                    team.team_name,
                    team.member_name,
                    team.wins,
                    team.losses,
                    team.ties,
                    team.win_percentage,
                    team.points_for,
                    team.points_against,
                    team.championship_count,
                    team.activity_status,
                );
            }
        }
        Commands::GameLog { member, year } => {
            let games = Table::<GameResult>::open(&storage).by_member(member)?;
            let team_entries = Table::<TeamSeasonEntry>::open(&storage).by_year(year)?;
            let names = MemberNames::load(&storage);
            let log = game_log(&games, &team_entries, &names, member, year);

            println!("=== {} ({}) ===\n", names.resolve(member), year);
            if log.is_empty() {
                println!("No games recorded.");
            }
            for entry in &log {
                println!(
                    "Week {:<6} {:<2} {:>5}-{:<5} vs {} {}",
                    entry.week.as_deref().unwrap_or("-"),
                    entry.result.map(|r| r.code()).unwrap_or("-"),
                    entry.points_for,
                    entry.points_against,
                    entry.opponent,
                    entry
                        .opponent_team
                        .as_deref()
                        .map(|t| format!("({})", t))
                        .unwrap_or_default(),
                );
            }
        }
        Commands::Transactions { member, year } => {
            let rows = Table::<Transaction>::open(&storage).list()?;
            let filter = TransactionFilter {
                member_id: member,
                year,
            };
            let log = transaction_log(&rows, filter, &MemberNames::load(&storage));

            println!("=== Transactions ({} rows) ===\n", log.len());
            for entry in &log {
                let t = &entry.transaction;
                println!(
                    "{} wk {:<6} {:<16} trades {:>2}  adds {:>2}  drops {:>2}  act {:>2}  ir {:>2}  total {}",
                    t.year,
                    t.week.as_deref().unwrap_or("-"),
                    entry.member_name,
                    t.trades,
                    t.acquisitions,
                    t.drops,
                    t.activations,
                    t.ir,
                    entry.total,
                );
            }
        }
        Commands::Dashboard => {
            let snapshot = LeagueSnapshot::load(&storage)?;
            let totals = league_totals(
                &snapshot.team_entries,
                &snapshot.games,
                &snapshot.champions,
                &snapshot.transactions,
            );

            println!("=== League Dashboard ===");
            println!("Teams:          {}", totals.total_teams);
            println!("Games played:   {}", totals.total_games_played);
            println!("Championships:  {}", totals.total_championships);
            println!("Transactions:   {}", totals.total_transactions);
        }
        Commands::Import { kind, path } => {
            let entity: EntityType = kind.parse().map_err(anyhow::Error::msg)?;
            let imported = match entity {
                EntityType::LeagueMember => import_rows::<LeagueMember>(&storage, &path)?,
                EntityType::TeamData => import_rows::<TeamSeasonEntry>(&storage, &path)?,
                EntityType::GameData => import_rows::<GameResult>(&storage, &path)?,
                EntityType::Champion => import_rows::<ChampionEntry>(&storage, &path)?,
                EntityType::Transaction => import_rows::<Transaction>(&storage, &path)?,
            };
            println!(
                "Imported {} {} into {:?}",
                imported,
                entity.plural(),
                storage.table_path(entity)
            );
        }
    }

    Ok(())
}

fn import_rows<T: Record>(storage: &StorageConfig, path: &Path) -> Result<usize> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let rows: Vec<T> = serde_json::from_str(&contents)
        .with_context(|| format!("{} is not a JSON array of {}", path.display(), T::ENTITY.plural()))?;
    let stored = Table::<T>::open(storage).insert_batch(rows)?;
    Ok(stored.len())
}
