use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tournament_desk::api::{self, state::AppState};
use tournament_desk::calculate::{
    self, best_defense, compute, draw_groups, generate_with, record_player_stat, record_result,
    register_team, CalcError,
};
use tournament_desk::config::AppConfig;
use tournament_desk::models::{Group, GroupDraw, PlayerTotal, StandingsRow};
use tournament_desk::storage::{JsonlStore, StorageConfig, TournamentStore};

#[derive(Parser)]
#[command(name = "tournament-desk")]
#[command(about = "Group-stage tournament bookkeeping: fixtures, standings and awards")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

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
        /// Bind address (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides the config file)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Register a team
    AddTeam {
        /// Team name
        name: String,
    },

    /// Randomly split the registered teams into groups A and B
    DrawGroups,

    /// Generate the group-stage fixtures, replacing any existing schedule
    Generate,

    /// Record a match result
    Record {
        /// Match ID
        id: u32,

        /// Home team goals
        home: u32,

        /// Away team goals
        away: u32,
    },

    /// Record goals and saves for a player
    AddStat {
        /// Player name
        player: String,

        /// Player's team
        team: String,

        #[arg(long, default_value = "0")]
        goals: u32,

        #[arg(long, default_value = "0")]
        saves: u32,
    },

    /// Print the standings
    Standings {
        /// Only this group (A or B)
        #[arg(long)]
        group: Option<String>,
    },

    /// Print the awards
    Awards,

    /// Schedule the final between the two group winners
    ScheduleFinal,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    let mut config = AppConfig::load_or_default(&PathBuf::from(&cli.config))
        .with_context(|| format!("loading {}", cli.config))?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = PathBuf::from(dir);
    }

    let store = JsonlStore::new(
        StorageConfig::new(config.data_dir.clone()),
        config.tournament.kickoff(),
    );
    let settings = config.tournament.clone();

    match cli.command {
        Commands::Serve { host, port } => {
            tracing::info!("Starting tournament-desk v{}", env!("CARGO_PKG_VERSION"));
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;

            let snapshot = store.load_or_empty();
            tracing::info!(
                "Loaded {} teams, {} matches, {} player stats",
                snapshot.teams.len(),
                snapshot.matches.len(),
                snapshot.player_stats.len()
            );

            let addr = format!("{}:{}", config.server.host, config.server.port);
            let state = AppState::new(Arc::new(store), snapshot, config);
            let app = api::build_router(state);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::AddTeam { name } => {
            let snapshot = store.load()?;
            let teams = register_team(&snapshot.teams, &name, settings.max_teams)?;
            store.save_teams(&teams)?;
            println!("Registered {} ({}/{})", name.trim(), teams.len(), settings.max_teams);
        }
        Commands::DrawGroups => {
            let snapshot = store.load()?;
            let teams = draw_groups(
                &snapshot.teams,
                settings.group_a_size,
                settings.max_teams,
                &mut rand::thread_rng(),
            )?;
            store.save_teams(&teams)?;
            if let Some(draw) = GroupDraw::from_entries(&teams) {
                for group in Group::STAGES {
                    println!("{}: {}", group, draw.teams(group).join(", "));
                }
            }
        }
        Commands::Generate => {
            let snapshot = store.load()?;
            let Some(draw) = GroupDraw::from_entries(&snapshot.teams) else {
                bail!("groups have not been drawn yet; run draw-groups first");
            };
            let matches = generate_with(
                draw.teams(Group::A),
                draw.teams(Group::B),
                &settings.fixture_policy(),
                Local::now().date_naive(),
                &mut rand::thread_rng(),
            )?;
            store.save_matches(&matches)?;
            for m in &matches {
                println!(
                    "#{:<3} {:<7} {} {}  {} vs {}",
                    m.id,
                    m.group,
                    m.date,
                    m.time.format("%H:%M"),
                    m.home_team,
                    m.away_team
                );
            }
        }
        Commands::Record { id, home, away } => {
            let snapshot = store.load()?;
            let matches = record_result(&snapshot.matches, id, home, away)?;
            store.save_matches(&matches)?;
            if let Some(m) = matches.iter().find(|m| m.id == id) {
                println!("{} {}-{} {}", m.home_team, home, away, m.away_team);
            }
        }
        Commands::AddStat {
            player,
            team,
            goals,
            saves,
        } => {
            let snapshot = store.load()?;
            let stats = record_player_stat(&snapshot.player_stats, &player, &team, goals, saves)?;
            if let Some(added) = stats.last() {
                store.append_player_stat(added)?;
                println!(
                    "{} ({}): +{} goals, +{} saves",
                    added.player_name, added.team, added.goals, added.saves
                );
            }
        }
        Commands::Standings { group } => {
            let snapshot = store.load()?;
            let groups = match group {
                Some(raw) => vec![raw.parse::<Group>()?],
                None => Group::STAGES.to_vec(),
            };
            for group in groups {
                print_table(group, &compute(&snapshot.matches, Some(group)));
            }
        }
        Commands::Awards => {
            let snapshot = store.load()?;
            let limit = match settings.top_scorers_limit {
                0 => None,
                n => Some(n),
            };

            print_leaderboard(
                "Top scorers",
                &calculate::top_scorers(&snapshot.player_stats, limit),
            );
            print_leaderboard(
                "Top savers",
                &calculate::top_savers(&snapshot.player_stats, limit),
            );

            println!("\nBest defense");
            match best_defense(&snapshot.matches) {
                Ok(row) => println!(
                    "  {} ({} conceded in {} played)",
                    row.team, row.goals_against, row.played
                ),
                Err(CalcError::EmptyData(msg)) => println!("  {}", msg),
                Err(e) => return Err(e.into()),
            }

            println!("\nFinalists");
            match calculate::finalists(&snapshot.matches, &Group::STAGES) {
                Ok(finalists) => {
                    for f in finalists {
                        println!("  {}: {} ({} pts)", f.group, f.team, f.row.points);
                    }
                }
                Err(CalcError::EmptyData(msg)) => println!("  {}", msg),
                Err(e) => return Err(e.into()),
            }
        }
        Commands::ScheduleFinal => {
            let snapshot = store.load()?;
            let matches = calculate::schedule_final(&snapshot.matches, settings.kickoff())?;
            store.save_matches(&matches)?;
            if let Some(m) = matches.iter().find(|m| m.group == Group::Final) {
                println!(
                    "Final #{}: {} vs {} on {} at {}",
                    m.id,
                    m.home_team,
                    m.away_team,
                    m.date,
                    m.time.format("%H:%M")
                );
            }
        }
    }

    Ok(())
}

fn print_table(group: Group, rows: &[StandingsRow]) {
    println!("\n{}", group.label());
    println!(
        "{:<20} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4}",
        "Team", "P", "W", "D", "L", "GF", "GA", "GD", "Pts"
    );
    if rows.is_empty() {
        println!("  (no results yet)");
    }
    for r in rows {
        println!(
            "{:<20} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4}",
            r.team,
            r.played,
            r.won,
            r.drawn,
            r.lost,
            r.goals_for,
            r.goals_against,
            r.goal_diff,
            r.points
        );
    }
}

fn print_leaderboard(title: &str, players: &[PlayerTotal]) {
    println!("\n{}", title);
    if players.is_empty() {
        println!("  (none recorded)");
    }
    for (rank, p) in players.iter().enumerate() {
        println!("  {}. {} ({}) {}", rank + 1, p.player_name, p.team, p.total);
    }
}
