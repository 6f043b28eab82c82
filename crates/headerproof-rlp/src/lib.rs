//! Headerproof RLP - canonical recursive-length-prefix codec.
//!
//! This crate provides:
//! - `RlpItem`, the byte-string / list tree that RLP serializes
//! - Canonical encoding (`encode`, `encode_byte_list`, `encoded_len`)
//! - Strict decoding that rejects truncated, trailing, non-canonical and
//!   over-nested input

pub mod item;
pub mod encode;
pub mod decode;
pub mod error;

#[cfg(feature = "serde")]
mod serialization;

pub use item::RlpItem;
pub use encode::{encode, encode_bytes, encode_byte_list, encode_into, encoded_len};
pub use decode::{decode, decode_prefix, MAX_DEPTH};
pub use error::RlpError;
