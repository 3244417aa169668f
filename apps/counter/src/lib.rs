//! # Brew Counter Library
//!
//! Order-taking terminal for a coffee counter.
//!
//! ## Module Organization
//! ```text
//! brew_counter/
//! ├── lib.rs          ◄─── You are here (startup, logging, terminal loop)
//! ├── cli.rs          ◄─── Command parsing + Repl over one session
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── session.rs  ◄─── OrderSession: store, catalog, codes, cart
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── catalog.rs  ◄─── filter_catalog
//! │   ├── cart.rs     ◄─── add_item, cancel_order, get_cart
//! │   ├── discount.rs ◄─── apply_discount
//! │   ├── order.rs    ◄─── complete_order, render_receipt
//! │   ├── stock.rs    ◄─── commit_stock
//! │   ├── admin.rs    ◄─── product and discount code maintenance
//! │   └── report.rs   ◄─── history and reports
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Database::new(config)   init once: pool, pragmas, migrations          │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  OrderSession::load(db)  store injected, catalog + codes loaded        │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  Repl::handle_line(...)  one line at a time, one actor                 │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  Database::close()       teardown on quit / end of input               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

use directories::ProjectDirs;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use brew_db::{Database, DbConfig};
use cli::{Outcome, Repl};
use state::{ConfigState, OrderSession};

const PROMPT: &[u8] = b"> ";

/// Runs the counter until `quit` or end of input.
///
/// ## Startup Sequence
/// 1. Initialize logging (stderr, so stdout stays the terminal's)
/// 2. Load configuration from `BREW_*` variables
/// 3. Determine the database path and connect (migrations included)
/// 4. Load the order session
/// 5. Read commands from stdin
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = ConfigState::from_env();
    info!(store_name = %config.store_name, "Starting Brew Counter");

    let db_path = get_database_path(&config)?;
    info!(?db_path, "Database path determined");

    let db = Database::new(DbConfig::new(db_path)).await?;
    info!("Database connected and migrations applied");

    let session = OrderSession::load(db).await?;
    let mut repl = Repl::new(session, config);

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout
        .write_all(b"Brew Counter. Type 'help' for commands.\n")
        .await?;
    stdout.write_all(PROMPT).await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        match repl.handle_line(&line).await {
            Outcome::Continue(text) => {
                if !text.is_empty() {
                    stdout.write_all(text.as_bytes()).await?;
                    stdout.write_all(b"\n").await?;
                }
            }
            Outcome::Quit => break,
        }
        stdout.write_all(PROMPT).await?;
        stdout.flush().await?;
    }

    repl.into_session().into_store().close().await;
    info!("Brew Counter stopped");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=brew=trace` - Show trace for brew crates only
/// - Default: `info,brew=debug,sqlx=warn`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,brew=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Determines the database file path.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.brew.counter/brew.db`
/// - **Windows**: `%APPDATA%\brew\counter\data\brew.db`
/// - **Linux**: `~/.local/share/counter/brew.db`
///
/// `BREW_DB_PATH` (via [`ConfigState`]) overrides all of these.
fn get_database_path(config: &ConfigState) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(path) = &config.database_path {
        return Ok(path.clone());
    }

    let proj_dirs = ProjectDirs::from("com", "brew", "counter")
        .ok_or("Could not determine app data directory")?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;

    Ok(data_dir.join("brew.db"))
}
