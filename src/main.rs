//! Headless simulator (default binary).
//!
//! Plays a deterministic scripted session against the rules engine and
//! prints the final board as JSON.
//!
//! ```text
//! srs-tetris-sim [--mode cheese|line-clear|score-attack] [--target N]
//!                [--seed N] [--frames N] [--verbose]
//! ```

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::prelude::*;

use srs_tetris::sim::{parse_sim_args, run_session};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_sim_args(&args)?;

    let level = if config.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .init();

    let report = run_session(&config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
