//! Generator configuration.
//!
//! Handles loading and validation of the fixture layout from a TOML file;
//! command-line flags override individual values.

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "headerproof.toml";

/// Block the bundled fixtures were captured at.
pub const DEFAULT_BLOCK_NUMBER: u64 = 14_297_900;

/// Accounts whose proofs the bundled fixtures carry.
pub const DEFAULT_HOLDERS: [&str; 10] = [
    "0x7a16ff8270133f063aab6c9977183d9e72835428",
    "0xf89501b77b2fa6329f94f5a05fe84cebb5c8b1a0",
    "0x9b44473e223f8a3c047ad86f387b80402536b029",
    "0x431e81e5dfb5a24541b5ff8762bdef3f32f96354",
    "0x425d16b0e08a28a3ff9e4404ae99d78c0a076c5a",
    "0x32d03db62e464c9168e41028ffa6e9a05d8c6451",
    "0xb18fbfe3d34fdc227eb4508cde437412b6233121",
    "0x394a16eea604fbd86b0b45184b2d790c83a950e3",
    "0xc72aed14386158960d0e93fecb83642e68482e4b",
    "0x9c5083dd4838e120dbeac44c052179692aa5dac5",
];

/// Fixture generator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureConfig {
    /// Directory holding the block and proof JSON
    pub data_dir: PathBuf,
    /// Directory for hex artifacts (defaults to data_dir)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    /// Block number used in artifact names
    pub block_number: u64,
    /// Header fixture file name
    pub block_file: String,
    /// Proof fixtures are named `<prefix><holder>.json`
    pub proof_file_prefix: String,
    /// Accounts to serialize proofs for
    pub holders: Vec<String>,
    /// Check Keccak-256 of the header against its recorded hash
    pub verify_hash: bool,
    /// Fail on absent required header fields
    pub strict_header: bool,
    /// Write hex with a `0x` prefix
    pub hex_prefix: bool,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            output_dir: None,
            block_number: DEFAULT_BLOCK_NUMBER,
            block_file: "block.json".to_string(),
            proof_file_prefix: "proofs_".to_string(),
            holders: DEFAULT_HOLDERS.iter().map(|h| h.to_string()).collect(),
            verify_hash: true,
            strict_header: false,
            hex_prefix: false,
            logging: LoggingConfig::default(),
        }
    }
}

impl FixtureConfig {
    /// Load configuration from file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e))?;
        let config: FixtureConfig = toml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e))?;
        Ok(config)
    }

    /// Load `path` if given, else `headerproof.toml` in the working directory
    /// if it exists, else the defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.exists() {
                    Self::from_file(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Save configuration to file.
    pub fn to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .map_err(|e| anyhow::anyhow!("Failed to write config file '{}': {}", path.display(), e))?;
        Ok(())
    }

    /// Validate configuration.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.block_file.is_empty() {
            anyhow::bail!("block_file cannot be empty");
        }
        if self.proof_file_prefix.is_empty() {
            anyhow::bail!("proof_file_prefix cannot be empty");
        }
        for name in [&self.block_file, &self.proof_file_prefix] {
            if name.contains('/') || name.contains('\\') || name.contains("..") {
                anyhow::bail!("Invalid file name '{}': must not contain path separators", name);
            }
        }
        check_no_parent_dir("data_dir", &self.data_dir)?;
        if let Some(output_dir) = &self.output_dir {
            check_no_parent_dir("output_dir", output_dir)?;
        }
        self.logging.validate()?;
        for holder in &self.holders {
            let digits = holder
                .strip_prefix("0x")
                .ok_or_else(|| anyhow::anyhow!("Holder '{}' must be 0x-prefixed", holder))?;
            if digits.len() != 40 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
                anyhow::bail!("Holder '{}' is not a 20-byte hex address", holder);
            }
        }
        Ok(())
    }

    pub fn output_dir(&self) -> &Path {
        self.output_dir.as_deref().unwrap_or(&self.data_dir)
    }

    pub fn block_path(&self) -> PathBuf {
        self.data_dir.join(&self.block_file)
    }

    pub fn proof_path(&self, holder: &str) -> PathBuf {
        self.data_dir
            .join(format!("{}{}.json", self.proof_file_prefix, holder))
    }

    pub fn header_output_path(&self) -> PathBuf {
        self.output_dir()
            .join(format!("block_header_rlp-{}.txt", self.block_number))
    }

    pub fn proof_output_path(&self, holder: &str) -> PathBuf {
        self.output_dir()
            .join(format!("proof_rlp-{}-{}.txt", self.block_number, holder))
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log filter (e.g. "info", "headerproof_fixtures=debug")
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
    /// Append logs to this file instead of stderr
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Reject a log file path that climbs out of the working tree.
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(file) = &self.file {
            check_no_parent_dir("logging.file", file)?;
        }
        Ok(())
    }
}

fn check_no_parent_dir(key: &str, path: &Path) -> anyhow::Result<()> {
    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        anyhow::bail!("Invalid {} '{}': directory traversal detected", key, path.display());
    }
    Ok(())
}
