//! Command-line probe for the recent documents core.
//!
//! # Responsibility
//! - Print the recent list of one SQLite collection store.
//! - Keep output deterministic when `--now-ms` is given.

use chrono::Local;
use clap::Parser;
use recent_docs_core::db::open_db;
use recent_docs_core::settings::normalize_max_files;
use recent_docs_core::{
    default_log_level, init_logging, now_epoch_ms, present_in, RecentAggregator,
    RecentSettings, SqliteCollectionStore, ViewItem,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "recent-docs", version, about = "List recently modified documents")]
struct Cli {
    /// SQLite collection store to scan.
    #[arg(env = "RECENT_DOCS_DB_PATH")]
    db_path: PathBuf,

    /// Maximum number of rows; zero or negative means the default.
    #[arg(long, allow_negative_numbers = true)]
    max_files: Option<i64>,

    /// Omit the collection column.
    #[arg(long)]
    hide_collection: bool,

    /// Write rolling logs into this directory.
    #[arg(long)]
    log_dir: Option<String>,

    #[arg(long, default_value_t = default_log_level().to_string())]
    log_level: String,

    /// Print the list as a JSON array.
    #[arg(long)]
    json: bool,

    /// Reference instant in epoch milliseconds.
    #[arg(long)]
    now_ms: Option<i64>,
}

impl Cli {
    fn settings(&self) -> RecentSettings {
        RecentSettings {
            max_files: normalize_max_files(self.max_files),
            show_collection: !self.hide_collection,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        if let Err(err) = init_logging(&cli.log_level, log_dir) {
            eprintln!("recent-docs: logging disabled: {err}");
        }
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("recent-docs: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let settings = cli.settings();
    let conn = open_db(&cli.db_path).map_err(|err| err.to_string())?;
    let store = SqliteCollectionStore::try_new(&conn).map_err(|err| err.to_string())?;

    let summaries = RecentAggregator::new(&store)
        .collect(settings.max_items())
        .map_err(|err| err.to_string())?;
    let now = cli.now_ms.unwrap_or_else(now_epoch_ms);
    let items = present_in(&summaries, now, settings.show_collection, &Local);
    log::info!(
        "event=cli_list module=cli status=ok rows={} limit={}",
        items.len(),
        settings.max_files
    );

    if cli.json {
        let rendered = serde_json::to_string_pretty(&items).map_err(|err| err.to_string())?;
        println!("{rendered}");
    } else if items.is_empty() {
        println!("No recent files.");
    } else {
        for line in render_rows(&items) {
            println!("{line}");
        }
    }
    Ok(())
}

/// Renders aligned text rows: title, optional collection, age.
fn render_rows(items: &[ViewItem]) -> Vec<String> {
    let title_width = items
        .iter()
        .map(|item| item.title.chars().count())
        .max()
        .unwrap_or(0);
    let collection_width = items
        .iter()
        .filter_map(|item| item.collection_label.as_deref())
        .map(|label| label.chars().count())
        .max();

    items
        .iter()
        .map(|item| match collection_width {
            Some(width) => format!(
                "{:<title_width$}  {:<width$}  {}",
                item.title,
                item.collection_label.as_deref().unwrap_or(""),
                item.age_label
            ),
            None => format!("{:<title_width$}  {}", item.title, item.age_label),
        })
        .collect()
}
