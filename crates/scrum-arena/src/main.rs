use anyhow::Context;
use clap::{Parser, Subcommand};
use scrum_arena::config::ArenaConfig;
use scrum_arena::console::run_session;
use scrum_arena::recorder::run_recorded;
use scrum_arena::retry::with_backoff;
use scrum_arena::storage::Storage;
use scrum_engine::Match;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "scrum-arena")]
#[command(about = "Play Scrum Chess and browse finished games")]
struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a match on stdin/stdout
    Play {
        /// Board rows (defaults to the configured size)
        #[arg(long)]
        rows: Option<u8>,
        /// Board columns (defaults to the configured size)
        #[arg(long)]
        cols: Option<u8>,
    },
    /// List finished games, newest first
    History,
    /// Show one finished game as JSON
    Show {
        /// Record id
        id: Uuid,
    },
    /// Delete one finished game
    Delete {
        /// Record id
        id: Uuid,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ArenaConfig::load_from(path),
        None => ArenaConfig::load(),
    }
    .context("loading configuration")?;
    let policy = config.retry.policy();

    if let Some(dir) = config.database.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating database directory {}", dir.display()))?;
    }
    let storage = Arc::new(
        with_backoff(&policy, || Storage::open(&config.database))
            .await
            .with_context(|| format!("opening database {}", config.database.display()))?,
    );
    tracing::debug!(database = %config.database.display(), "storage ready");

    match cli.command {
        Commands::Play { rows, cols } => {
            let board = config.board.dimensions()?;
            let rows = rows.unwrap_or(board.rows());
            let cols = cols.unwrap_or(board.cols());

            let game = Match::new(rows, cols)?;

            // Pending record writes finish before a session error is reported.
            let session = run_recorded(storage.clone(), policy, move |recorder| {
                let mut game = game.with_sink(Arc::new(recorder));
                let stdin = std::io::stdin();
                let mut stdout = std::io::stdout();
                run_session(&mut game, stdin.lock(), &mut stdout)
            })
            .await?;
            session?;
        }
        Commands::History => {
            let records = with_backoff(&policy, || storage.list_records()).await?;
            if records.is_empty() {
                println!("No finished games yet.");
            }
            for record in records {
                println!(
                    "{}  {}  {} won with a {}",
                    record.id,
                    record.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    record.winner,
                    record.piece_kind
                );
            }
        }
        Commands::Show { id } => match with_backoff(&policy, || storage.get_record(&id)).await? {
            Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
            None => anyhow::bail!("no game with id {}", id),
        },
        Commands::Delete { id } => {
            if with_backoff(&policy, || storage.delete_record(&id)).await? {
                println!("Deleted game {}", id);
            } else {
                println!("No game with id {}", id);
            }
        }
    }

    Ok(())
}
