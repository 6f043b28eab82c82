//! Fixture loading, serialization and artifact writing.

use anyhow::Context;
use headerproof_fixtures::encoding::encode_hex;
use headerproof_fixtures::{serialize_proof, HeaderRecord, HeaderSelector, KeccakHash, ProofRecord};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::config::FixtureConfig;

/// Artifacts written by one `generate` run.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub header_path: PathBuf,
    pub header_hash: KeccakHash,
    pub proof_paths: Vec<PathBuf>,
}

/// Read and parse a header fixture, returning the record and its encoding.
pub fn serialize_header_file(
    path: &Path,
    selector: HeaderSelector,
) -> anyhow::Result<(HeaderRecord, Vec<u8>)> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read header fixture '{}'", path.display()))?;
    let record = HeaderRecord::from_json(&contents)
        .with_context(|| format!("Failed to parse header fixture '{}'", path.display()))?;
    let encoded = selector
        .serialize(&record)
        .with_context(|| format!("Failed to serialize header '{}'", path.display()))?;
    Ok((record, encoded))
}

/// Read and serialize a proof fixture.
pub fn serialize_proof_file(path: &Path) -> anyhow::Result<Vec<u8>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read proof fixture '{}'", path.display()))?;
    let record = ProofRecord::from_json(&contents)
        .with_context(|| format!("Failed to parse proof fixture '{}'", path.display()))?;
    serialize_proof(&record)
        .with_context(|| format!("Failed to serialize proof '{}'", path.display()))
}

/// Hash the encoded header and compare it with the record's `hash` field.
pub fn check_header_hash(record: &HeaderRecord, encoded: &[u8]) -> anyhow::Result<KeccakHash> {
    let computed = KeccakHash::compute(encoded);
    let expected = record
        .expected_hash()?
        .ok_or_else(|| anyhow::anyhow!("Header fixture has no 'hash' field to verify against"))?;

    if computed != expected {
        error!("Header hash mismatch: expected {}, computed {}", expected, computed);
        anyhow::bail!("Incorrect hash: expected {}, computed {}", expected, computed);
    }
    Ok(computed)
}

/// Write `bytes` as hex text, creating parent directories.
pub fn write_hex(path: &Path, bytes: &[u8], prefixed: bool) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create '{}'", parent.display()))?;
        }
    }
    std::fs::write(path, encode_hex(bytes, prefixed))
        .with_context(|| format!("Failed to write '{}'", path.display()))?;
    info!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

/// Serialize the header and every configured holder's proof.
pub fn generate(config: &FixtureConfig) -> anyhow::Result<GenerateReport> {
    config.validate()?;

    let selector = if config.strict_header {
        HeaderSelector::strict()
    } else {
        HeaderSelector::lenient()
    };

    let block_path = config.block_path();
    let (record, encoded) = serialize_header_file(&block_path, selector)?;
    if let Some(number) = record.number() {
        if number != config.block_number {
            warn!(
                "Header fixture is block {} but artifacts are named for block {}",
                number, config.block_number
            );
        }
    }

    let header_hash = if config.verify_hash {
        let hash = check_header_hash(&record, &encoded)?;
        info!("Header hash verified: {}", hash);
        hash
    } else {
        debug!("Header hash verification disabled");
        KeccakHash::compute(&encoded)
    };

    let header_path = config.header_output_path();
    write_hex(&header_path, &encoded, config.hex_prefix)?;

    let mut proof_paths = Vec::with_capacity(config.holders.len());
    for holder in &config.holders {
        let encoded = serialize_proof_file(&config.proof_path(holder))?;
        let path = config.proof_output_path(holder);
        write_hex(&path, &encoded, config.hex_prefix)?;
        proof_paths.push(path);
    }

    info!(
        "Generated header and {} proof artifacts for block {}",
        proof_paths.len(),
        config.block_number
    );
    Ok(GenerateReport {
        header_path,
        header_hash,
        proof_paths,
    })
}
