//! Headerproof CLI - RLP test vector generator.
//!
//! Loads a block header and `eth_getProof` fixtures from JSON, serializes
//! them with canonical RLP, checks the header against its block hash and
//! writes the bytes as hex artifacts.

pub mod commands;
pub mod config;
pub mod generate;
pub mod output;
pub mod telemetry;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = commands::Cli::parse();

    let mut config = config::FixtureConfig::load(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    config.logging.json |= cli.log_json;

    config.logging.validate()?;
    telemetry::init(&config.logging)?;

    if let Err(e) = commands::execute(cli.command, config) {
        output::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
