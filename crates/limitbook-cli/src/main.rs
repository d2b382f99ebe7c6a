//! Interactive driver for the limitbook matching engine.
//!
//! ```text
//! limitbook [CONFIG.json]
//! ```
//!
//! Logs go to stderr and are filtered with `RUST_LOG` (default `warn`).

mod menu;

use std::io;
use std::process::ExitCode;

use limitbook_matchcore::MatchingEngine;
use limitbook_types::{BookConfig, Result, constants};
use tracing_subscriber::EnvFilter;

use crate::menu::Session;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<String>) -> Result<BookConfig> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)?;
            let cfg = BookConfig::from_json_str(&raw)?;
            tracing::info!(%path, symbol = %cfg.symbol, "Loaded book config");
            Ok(cfg)
        }
        None => Ok(BookConfig::default()),
    }
}

fn run() -> Result<()> {
    let config = load_config(std::env::args().nth(1))?;
    let engine = MatchingEngine::new(config)?;
    tracing::info!(
        engine = constants::ENGINE_NAME,
        version = constants::VERSION,
        symbol = %engine.symbol(),
        "Engine started"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(engine, stdin.lock(), stdout.lock()).run()
}

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "limitbook exited with error");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
