//! Manual exploration tool: replays a file of captured frame payloads
//! through a `StateManager` and prints the resulting matches and change
//! events. Not part of the crate's public contract.

use std::env;
use std::fs;
use std::path::PathBuf;

use liveodds_decoder::formatter;
use liveodds_decoder::{Config, StateManager};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
enum ReplayError {
    #[error("usage: replay <path-to-captured-payloads>")]
    MissingArgument,
    #[error("failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn main() -> Result<(), ReplayError> {
    let config = Config::from_env();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(config.log_filter.clone()))
        .init();

    let path = env::args().nth(1).ok_or(ReplayError::MissingArgument)?;
    let path = PathBuf::from(path);
    let raw = fs::read(&path).map_err(|source| ReplayError::ReadFailed {
        path: path.clone(),
        source,
    })?;

    let mut sm = StateManager::new();
    for (i, line) in raw.split(|&b| b == b'\n').enumerate() {
        if line.is_empty() {
            continue;
        }
        info!(line = i, bytes = line.len(), "replaying captured payload");
        let updates = sm.process(line);
        for update in &updates {
            println!("{}", formatter::format_update(update));
        }
    }

    println!("--- final state ---");
    for m in sm.all_matches() {
        println!("{}", formatter::format_match(m));
    }

    Ok(())
}
