//! Typed views of the JSON fixtures.
//!
//! Header values are classified once, at deserialization time, into
//! `FieldValue`; the selector never inspects raw JSON.

use crate::digest::KeccakHash;
use crate::error::FixtureError;
use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single header value as it arrived from JSON.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    /// Non-negative JSON integer
    Integer(u64),
    /// JSON string, expected to hold hex
    Hex(String),
    /// Anything else; the description names the JSON kind
    Unsupported(String),
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Hex(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Hex(value)
    }
}

struct FieldValueVisitor;

impl<'de> Visitor<'de> for FieldValueVisitor {
    type Value = FieldValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(FieldValue::Integer(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(u64::try_from(v)
            .map(FieldValue::Integer)
            .unwrap_or_else(|_| FieldValue::Unsupported(format!("negative integer {}", v))))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(FieldValue::Unsupported(format!("non-integer number {}", v)))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(FieldValue::Unsupported(format!("boolean {}", v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(FieldValue::Hex(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(FieldValue::Hex(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(FieldValue::Unsupported("null".to_string()))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        self.visit_unit()
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(FieldValue::Unsupported("array".to_string()))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(FieldValue::Unsupported("object".to_string()))
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(FieldValueVisitor)
    }
}

/// A decoded block as returned by `eth_getBlockByNumber`, keyed by field name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct HeaderRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl HeaderRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a block JSON object.
    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.fields.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The block hash recorded next to the header, if any.
    pub fn expected_hash(&self) -> Result<Option<KeccakHash>, FixtureError> {
        match self.fields.get("hash") {
            None => Ok(None),
            Some(FieldValue::Hex(s)) => s.parse().map(Some),
            Some(other) => Err(FixtureError::InvalidHash(format!(
                "hash field is not a hex string: {:?}",
                other
            ))),
        }
    }

    /// Block number, when present as an integer or hex quantity.
    pub fn number(&self) -> Option<u64> {
        match self.fields.get("number")? {
            FieldValue::Integer(n) => Some(*n),
            FieldValue::Hex(s) => u64::from_str_radix(crate::encoding::strip_hex_prefix(s), 16).ok(),
            FieldValue::Unsupported(_) => None,
        }
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for HeaderRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// One storage slot proof from `eth_getProof`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageProof {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Hex-encoded trie nodes, root first
    pub proof: Vec<String>,
}

/// Account and storage proofs from `eth_getProof`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Hex-encoded account trie nodes, root first
    pub account_proof: Vec<String>,
    #[serde(default)]
    pub storage_proof: Vec<StorageProof>,
}

impl ProofRecord {
    /// Parse a proof JSON object.
    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_classification() {
        let record = HeaderRecord::from_json(
            r#"{
                "number": 12,
                "extraData": "0xab",
                "negative": -1,
                "float": 1.5,
                "flag": true,
                "missing": null,
                "uncles": ["0x01"],
                "nested": {"a": 1}
            }"#,
        )
        .unwrap();

        assert_eq!(record.get("number"), Some(&FieldValue::Integer(12)));
        assert_eq!(record.get("extraData"), Some(&FieldValue::Hex("0xab".into())));
        for name in ["negative", "float", "flag", "missing", "uncles", "nested"] {
            assert!(
                matches!(record.get(name), Some(FieldValue::Unsupported(_))),
                "{} should be unsupported",
                name
            );
        }
    }

    #[test]
    fn test_expected_hash() {
        let mut record: HeaderRecord = [("number", 1u64)].into_iter().collect();
        assert_eq!(record.expected_hash(), Ok(None));

        record.insert(
            "hash",
            "0xd4e56740f876aef8c010b86a40d5f56745a118d0906a34e69aec8c0db1cb8fa3",
        );
        let hash = record.expected_hash().unwrap().unwrap();
        assert_eq!(hash.as_bytes()[0], 0xd4);

        record.insert("hash", 7u64);
        assert!(matches!(record.expected_hash(), Err(FixtureError::InvalidHash(_))));
    }

    #[test]
    fn test_number_accepts_integer_and_quantity() {
        let mut record = HeaderRecord::new();
        assert_eq!(record.number(), None);
        record.insert("number", 14_297_900u64);
        assert_eq!(record.number(), Some(14_297_900));
        record.insert("number", "0xda2b2c");
        assert_eq!(record.number(), Some(14_297_900));
    }

    #[test]
    fn test_proof_record_ignores_extra_fields() {
        let record = ProofRecord::from_json(
            r#"{
                "address": "0x7a16ff8270133f063aab6c9977183d9e72835428",
                "balance": 0,
                "accountProof": ["0xc0"],
                "storageProof": [{"key": "0x01", "value": 3, "proof": ["0x80"]}]
            }"#,
        )
        .unwrap();
        assert_eq!(record.account_proof, vec!["0xc0".to_string()]);
        assert_eq!(record.storage_proof.len(), 1);
        assert_eq!(record.storage_proof[0].proof, vec!["0x80".to_string()]);
    }

    #[test]
    fn test_proof_record_requires_account_proof() {
        assert!(matches!(
            ProofRecord::from_json(r#"{"storageProof": []}"#),
            Err(FixtureError::Json(_))
        ));
    }
}
