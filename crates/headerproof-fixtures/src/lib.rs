//! Headerproof Fixtures - block header and storage proof serialization.
//!
//! This crate provides:
//! - Typed JSON records for `eth_getBlockByNumber` / `eth_getProof` output
//! - The canonical header field table and selector
//! - Proof assembly into a single RLP list
//! - Keccak-256 digests for checking headers against their recorded hash

pub mod record;
pub mod header;
pub mod proof;
pub mod digest;
pub mod encoding;
pub mod error;

pub use record::{FieldValue, HeaderRecord, ProofRecord, StorageProof};
pub use header::{
    select_fields, serialize_header, HeaderField, HeaderSelector, BASE_FEE_FIELD, HEADER_FIELDS,
};
pub use proof::{assemble_proof, decode_node, decode_nodes, serialize_proof};
pub use digest::KeccakHash;
pub use error::FixtureError;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        assemble_proof, serialize_header, serialize_proof, FieldValue, FixtureError,
        HeaderRecord, HeaderSelector, KeccakHash, ProofRecord,
    };
    pub use headerproof_rlp::{decode, encode, RlpItem};
}
