//! CLI command implementations.

use anyhow::Context;
use clap::{Parser, Subcommand};
use headerproof_fixtures::encoding::{decode_hex, encode_hex};
use headerproof_fixtures::{HeaderSelector, KeccakHash};
use headerproof_rlp::decode;
use std::path::PathBuf;

use crate::config::{FixtureConfig, DEFAULT_CONFIG_FILE};
use crate::generate::{check_header_hash, generate, serialize_header_file, serialize_proof_file};
use crate::output::*;

/// Main CLI.
#[derive(Parser, Debug)]
#[command(name = "headerproof")]
#[command(about = "RLP test vectors for block headers and storage proofs")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Config file path
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level (overrides the config file)
    #[arg(short, long, global = true, env = "HEADERPROOF_LOG")]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serialize the block header and all holder proofs into hex artifacts
    Generate {
        /// Directory holding block.json and the proof fixtures
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
        /// Directory for the hex artifacts
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        /// Block number used in artifact names
        #[arg(short, long)]
        block_number: Option<u64>,
        /// Holder address (repeatable, replaces the configured list)
        #[arg(long = "holder", value_name = "ADDRESS")]
        holders: Vec<String>,
        /// Skip the header hash check
        #[arg(long)]
        no_verify: bool,
        /// Fail on absent required header fields
        #[arg(long)]
        strict: bool,
    },

    /// Serialize a single header fixture and print its hex
    Header {
        /// Block JSON file
        file: PathBuf,
        /// Skip the header hash check
        #[arg(long)]
        no_verify: bool,
        /// Fail on absent required header fields
        #[arg(long)]
        strict: bool,
        /// Prefix output with 0x
        #[arg(long)]
        prefix: bool,
    },

    /// Serialize a single proof fixture and print its hex
    Proof {
        /// Proof JSON file
        file: PathBuf,
        /// Prefix output with 0x
        #[arg(long)]
        prefix: bool,
    },

    /// Decode RLP hex and print the item tree as JSON
    Decode {
        /// RLP bytes as hex
        hex: String,
    },

    /// Configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Config commands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a default config file
    Init {
        /// Destination
        #[arg(default_value = DEFAULT_CONFIG_FILE)]
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
}

/// Execute a command against the loaded configuration.
pub fn execute(cmd: Commands, mut config: FixtureConfig) -> anyhow::Result<()> {
    match cmd {
        Commands::Generate {
            data_dir,
            output_dir,
            block_number,
            holders,
            no_verify,
            strict,
        } => {
            if let Some(dir) = data_dir {
                config.data_dir = dir;
            }
            if output_dir.is_some() {
                config.output_dir = output_dir;
            }
            if let Some(number) = block_number {
                config.block_number = number;
            }
            if !holders.is_empty() {
                config.holders = holders;
            }
            config.verify_hash &= !no_verify;
            config.strict_header |= strict;

            let report = generate(&config)?;
            print_success(&format!(
                "Header {} -> {}",
                report.header_hash,
                report.header_path.display()
            ));
            for path in &report.proof_paths {
                print_success(&format!("Proof -> {}", path.display()));
            }
        }

        Commands::Header {
            file,
            no_verify,
            strict,
            prefix,
        } => {
            let selector = if strict || config.strict_header {
                HeaderSelector::strict()
            } else {
                HeaderSelector::lenient()
            };
            let (record, encoded) = serialize_header_file(&file, selector)?;

            if no_verify || !config.verify_hash {
                print_field("Hash", &KeccakHash::compute(&encoded).to_string());
            } else {
                let hash = check_header_hash(&record, &encoded)?;
                print_field("Hash", &hash.to_string());
                print_success("Header hash matches");
            }
            println!("{}", encode_hex(&encoded, prefix));
        }

        Commands::Proof { file, prefix } => {
            let encoded = serialize_proof_file(&file)?;
            print_field("Size", &format!("{} bytes", encoded.len()));
            println!("{}", encode_hex(&encoded, prefix));
        }

        Commands::Decode { hex } => {
            let bytes = decode_hex(hex.trim()).context("Input is not valid hex")?;
            let item = decode(&bytes).context("Input is not a single canonical RLP item")?;
            println!("{}", serde_json::to_string_pretty(&item)?);
        }

        Commands::Config(ConfigCommands::Init { path, force }) => {
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file '{}' already exists (use --force to overwrite)",
                    path.display()
                );
            }
            FixtureConfig::default().to_file(&path)?;
            print_success(&format!("Wrote {}", path.display()));
        }

        Commands::Config(ConfigCommands::Show) => {
            print!("{}", toml::to_string_pretty(&config)?);
            if let Err(e) = config.validate() {
                print_warning(&format!("Configuration is invalid: {}", e));
            }
        }
    }

    Ok(())
}
