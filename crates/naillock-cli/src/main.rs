//! `naillock`: daily treatment checklist, streaks and progress photos.
//!
//! Reads `naillock.toml` (or the path given with `--config`), opens the
//! SQLite store and runs one subcommand against a single partition.
//!
//! ```
//! naillock log --done treatment --done wash --notes "left toe looks better"
//! naillock status
//! naillock photo add ~/Pictures/toe.jpg --kind weekly
//! naillock export --out backup.tar.gz
//! ```

mod commands;
mod config;
mod reminder;

use std::path::PathBuf;

use anyhow::Context as _;
use chrono::NaiveTime;
use clap::{Parser, Subcommand};
use commands::Ctx;
use config::AppConfig;
use naillock_core::{day::Day, partition::PartitionId, photo::PhotoKind};
use naillock_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "naillock", version, about = "Daily nail-care checklist and streak tracker")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "naillock.toml")]
  config: PathBuf,

  /// Storage partition (overrides the config file).
  #[arg(short, long)]
  partition: Option<String>,

  /// Active mode (overrides the config file).
  #[arg(short, long)]
  mode: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Save a day's checklist. Actions not passed with `--done` are saved as
  /// not done.
  Log {
    /// Day to save (YYYY-MM-DD); defaults to today.
    #[arg(short, long)]
    day:   Option<Day>,
    /// Action key completed; repeat for each.
    #[arg(long = "done", value_name = "KEY")]
    done:  Vec<String>,
    /// Free-text notes; existing notes are kept when omitted.
    #[arg(short, long)]
    notes: Option<String>,
  },
  /// Show a day's checklist, score and verdict.
  Show {
    #[arg(short, long)]
    day: Option<Day>,
  },
  /// Current streak, level, badge, mission progress and the last 35 days.
  Status,
  /// Aggregates over the whole history, plus the score series.
  Summary {
    /// Print the aggregates as JSON.
    #[arg(long)]
    json: bool,
  },
  /// Manage progress photos.
  #[command(subcommand)]
  Photo(PhotoCommand),
  /// Write every log and photo to a tar.gz archive.
  ///
  /// The archive is gzip-compressed tar, not the ZIP format written by the
  /// NailLock web app.
  Export {
    #[arg(short, long, default_value = "naillock_export.tar.gz")]
    out: PathBuf,
  },
  /// Restore a tar.gz archive written by `export`.
  ///
  /// ZIP exports from the NailLock web app cannot be imported; unpack one and
  /// repack `daily_log.csv` and `photos/` as tar.gz first.
  Import { file: PathBuf },
  /// Write a daily calendar reminder (.ics).
  Reminder {
    #[arg(short, long, default_value = "NailLock: daily actions")]
    title: String,
    /// Local time of day, HH:MM.
    #[arg(long, default_value = "09:00", value_parser = parse_hhmm)]
    at:    NaiveTime,
    /// Number of daily occurrences.
    #[arg(long, default_value_t = 90, value_parser = clap::value_parser!(u32).range(reminder::REMINDER_DAYS))]
    days:  u32,
    #[arg(short, long, default_value = "naillock_reminder.ics")]
    out:   PathBuf,
  },
  /// Print every known mode as TOML.
  Modes,
}

#[derive(Subcommand, Debug)]
enum PhotoCommand {
  /// Store an image file.
  Add {
    path: PathBuf,
    #[arg(short, long)]
    kind: PhotoKind,
    #[arg(short, long)]
    day:  Option<Day>,
  },
  /// List stored photos, optionally of one kind.
  List {
    #[arg(short, long)]
    kind: Option<PhotoKind>,
  },
  /// Write a stored photo's bytes to a file.
  Save {
    id:  i64,
    #[arg(short, long)]
    out: PathBuf,
  },
  /// Delete a photo. Deleting a missing id is not an error.
  Delete { id: i64 },
}

fn parse_hhmm(s: &str) -> Result<NaiveTime, String> {
  NaiveTime::parse_from_str(s, "%H:%M").map_err(|e| format!("expected HH:MM: {e}"))
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let cfg = AppConfig::load(&cli.config)?;
  let registry = cfg.registry()?;
  let today = Day::today();

  // Commands that never touch the store.
  match &cli.command {
    Command::Modes => {
      print!("{}", commands::render_modes(&registry)?);
      return Ok(());
    }
    Command::Reminder { title, at, days, out } => {
      let ics = reminder::daily_ics(title, today.date().and_time(*at), *days);
      tokio::fs::write(out, ics)
        .await
        .with_context(|| format!("writing {}", out.display()))?;
      println!("wrote {}", out.display());
      return Ok(());
    }
    _ => {}
  }

  let mode_name = cli.mode.as_deref().unwrap_or(&cfg.mode);
  let mode = registry.get(mode_name)?.clone();
  let partition = PartitionId::new(cli.partition.as_deref().unwrap_or(&cfg.partition))?;

  let store_path = cfg.store_path();
  if let Some(parent) = store_path.parent()
    && !parent.as_os_str().is_empty()
  {
    tokio::fs::create_dir_all(parent)
      .await
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  tracing::debug!(partition = %partition, mode = mode.name(), "store opened");

  let ctx = Ctx { store, partition, mode, today };

  match cli.command {
    Command::Log { day, done, notes } => commands::log(&ctx, day, &done, notes).await,
    Command::Show { day } => commands::show(&ctx, day).await,
    Command::Status => commands::status(&ctx).await,
    Command::Summary { json } => commands::summary(&ctx, json).await,
    Command::Photo(PhotoCommand::Add { path, kind, day }) => {
      commands::photo_add(&ctx, &path, kind, day).await
    }
    Command::Photo(PhotoCommand::List { kind }) => commands::photo_list(&ctx, kind).await,
    Command::Photo(PhotoCommand::Save { id, out }) => commands::photo_save(&ctx, id, &out).await,
    Command::Photo(PhotoCommand::Delete { id }) => commands::photo_delete(&ctx, id).await,
    Command::Export { out } => commands::export(&ctx, &out).await,
    Command::Import { file } => commands::import(&ctx, &file).await,
    Command::Modes | Command::Reminder { .. } => Ok(()),
  }
}
