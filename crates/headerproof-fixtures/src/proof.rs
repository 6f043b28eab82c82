//! Proof assembly.
//!
//! Each trie node arrives already RLP-encoded. Nodes are decoded one layer
//! so that the outer list embeds them structurally; passing them through as
//! byte strings would wrap every node in a second length prefix.

use crate::encoding::decode_hex;
use crate::error::FixtureError;
use crate::record::ProofRecord;
use headerproof_rlp::{decode, encode, RlpItem};
use tracing::debug;

/// Decode one hex-encoded trie node. `path` names the node in errors.
pub fn decode_node(path: &str, node: &str) -> Result<RlpItem, FixtureError> {
    let bytes = decode_hex(node).map_err(|e| FixtureError::malformed(path, e))?;
    decode(&bytes).map_err(|source| FixtureError::NodeDecode {
        node: path.to_string(),
        source,
    })
}

/// Decode a proof path into a list item, preserving node order.
pub fn decode_nodes(path: &str, nodes: &[String]) -> Result<RlpItem, FixtureError> {
    nodes
        .iter()
        .enumerate()
        .map(|(i, node)| decode_node(&format!("{}[{}]", path, i), node))
        .collect::<Result<Vec<_>, _>>()
        .map(RlpItem::List)
}

/// `[account proof, storage proof 0, storage proof 1, ...]`
pub fn assemble_proof(record: &ProofRecord) -> Result<RlpItem, FixtureError> {
    let mut parts = Vec::with_capacity(1 + record.storage_proof.len());
    parts.push(decode_nodes("accountProof", &record.account_proof)?);

    for (i, storage) in record.storage_proof.iter().enumerate() {
        parts.push(decode_nodes(&format!("storageProof[{}].proof", i), &storage.proof)?);
    }

    debug!(
        "Assembled proof: {} account nodes, {} storage proofs",
        record.account_proof.len(),
        record.storage_proof.len()
    );
    Ok(RlpItem::List(parts))
}

/// Canonical encoding of the assembled proof.
pub fn serialize_proof(record: &ProofRecord) -> Result<Vec<u8>, FixtureError> {
    Ok(encode(&assemble_proof(record)?))
}
