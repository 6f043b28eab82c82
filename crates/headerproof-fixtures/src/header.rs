//! Canonical header field selection.
//!
//! Field order follows go-ethereum's `core/types/block.go`. Only
//! `baseFeePerGas` (EIP-1559) may be absent from a well-formed header.

use crate::encoding::{decode_hex, minimal_be_bytes};
use crate::error::FixtureError;
use crate::record::{FieldValue, HeaderRecord};
use headerproof_rlp::encode_byte_list;
use tracing::debug;

/// One entry of the header field table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeaderField {
    pub name: &'static str,
    /// Introduced by a fork; headers predating it omit the field.
    pub optional: bool,
}

impl HeaderField {
    const fn required(name: &'static str) -> Self {
        Self { name, optional: false }
    }

    const fn optional(name: &'static str) -> Self {
        Self { name, optional: true }
    }
}

pub const BASE_FEE_FIELD: &str = "baseFeePerGas";

/// Encoding order of a block header.
pub const HEADER_FIELDS: [HeaderField; 16] = [
    HeaderField::required("parentHash"),
    HeaderField::required("sha3Uncles"),
    HeaderField::required("miner"),
    HeaderField::required("stateRoot"),
    HeaderField::required("transactionsRoot"),
    HeaderField::required("receiptsRoot"),
    HeaderField::required("logsBloom"),
    HeaderField::required("difficulty"),
    HeaderField::required("number"),
    HeaderField::required("gasLimit"),
    HeaderField::required("gasUsed"),
    HeaderField::required("timestamp"),
    HeaderField::required("extraData"),
    HeaderField::required("mixHash"),
    HeaderField::required("nonce"),
    HeaderField::optional(BASE_FEE_FIELD),
];

/// Turns a `HeaderRecord` into the ordered byte strings of its RLP list.
///
/// The lenient selector skips every field missing from the record. The
/// strict selector only skips optional ones and reports `MissingField`
/// for the rest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeaderSelector {
    strict: bool,
}

impl HeaderSelector {
    pub const fn lenient() -> Self {
        Self { strict: false }
    }

    pub const fn strict() -> Self {
        Self { strict: true }
    }

    pub const fn is_strict(&self) -> bool {
        self.strict
    }

    /// Byte strings of every present field, in table order.
    pub fn select(&self, record: &HeaderRecord) -> Result<Vec<Vec<u8>>, FixtureError> {
        let mut selected = Vec::with_capacity(HEADER_FIELDS.len());
        for field in HEADER_FIELDS.iter() {
            match record.get(field.name) {
                Some(value) => selected.push(field_bytes(field.name, value)?),
                None if self.strict && !field.optional => {
                    return Err(FixtureError::MissingField(field.name.to_string()));
                }
                None => debug!("Header field {} absent, skipping", field.name),
            }
        }
        Ok(selected)
    }

    /// RLP list of the selected fields.
    pub fn serialize(&self, record: &HeaderRecord) -> Result<Vec<u8>, FixtureError> {
        let fields = self.select(record)?;
        Ok(encode_byte_list(&fields))
    }
}

/// Select header fields with the lenient selector.
pub fn select_fields(record: &HeaderRecord) -> Result<Vec<Vec<u8>>, FixtureError> {
    HeaderSelector::lenient().select(record)
}

/// Serialize a header with the lenient selector.
pub fn serialize_header(record: &HeaderRecord) -> Result<Vec<u8>, FixtureError> {
    HeaderSelector::lenient().serialize(record)
}

fn field_bytes(name: &str, value: &FieldValue) -> Result<Vec<u8>, FixtureError> {
    match value {
        // zero and every other integer take their minimal big-endian form
        FieldValue::Integer(n) => Ok(minimal_be_bytes(*n)),
        FieldValue::Hex(s) => decode_hex(s).map_err(|e| FixtureError::malformed(name, e)),
        FieldValue::Unsupported(kind) => Err(FixtureError::malformed(
            name,
            format!("expected an integer or hex string, got {}", kind),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::KeccakHash;

    const GENESIS: &str = include_str!("../testdata/genesis_block.json");
    const LONDON: &str = include_str!("../testdata/london_block.json");

    #[test]
    fn test_zero_integer_is_empty_string() {
        let record: HeaderRecord = [("difficulty", 0u64)].into_iter().collect();
        assert_eq!(select_fields(&record).unwrap(), vec![Vec::<u8>::new()]);
    }

    #[test]
    fn test_hex_values_are_raw_bytes() {
        let mut record = HeaderRecord::new();
        record.insert("nonce", "0x0000000000000042");
        record.insert("extraData", "0x");
        record.insert("miner", "ea674fdde714fd979de3edf0f56aa9716b898ec8");

        let selected = select_fields(&record).unwrap();
        // table order: miner, extraData, nonce
        assert_eq!(selected[0].len(), 20);
        assert!(selected[1].is_empty());
        assert_eq!(selected[2], vec![0, 0, 0, 0, 0, 0, 0, 0x42]);
    }

    #[test]
    fn test_order_follows_table_not_record() {
        let mut record = HeaderRecord::new();
        record.insert("timestamp", "0x03");
        record.insert("parentHash", "0x01");
        record.insert("number", "0x02");
        assert_eq!(
            select_fields(&record).unwrap(),
            vec![vec![0x01], vec![0x02], vec![0x03]]
        );
    }

    #[test]
    fn test_malformed_fields() {
        let cases = [
            FieldValue::Hex("0xabc".into()),
            FieldValue::Hex("0xgg".into()),
            FieldValue::Unsupported("null".into()),
        ];
        for value in cases {
            let mut record = HeaderRecord::new();
            record.insert("gasUsed", value);
            match select_fields(&record) {
                Err(FixtureError::MalformedField { field, .. }) => assert_eq!(field, "gasUsed"),
                other => panic!("unexpected result: {:?}", other),
            }
        }
    }

    #[test]
    fn test_fields_outside_table_are_ignored() {
        let mut record = HeaderRecord::new();
        record.insert("totalDifficulty", FieldValue::Unsupported("object".into()));
        record.insert("hash", "0xzz");
        assert!(select_fields(&record).unwrap().is_empty());
    }

    #[test]
    fn test_genesis_header_matches_block_hash() {
        let record = HeaderRecord::from_json(GENESIS).unwrap();
        assert!(!record.contains(BASE_FEE_FIELD));

        let fields = select_fields(&record).unwrap();
        assert_eq!(fields.len(), 15);

        let encoded = serialize_header(&record).unwrap();
        assert_eq!(encoded.len(), 535);
        assert_eq!(&encoded[..3], &[0xf9, 0x02, 0x14]);
        assert_eq!(
            KeccakHash::compute(&encoded),
            record.expected_hash().unwrap().unwrap()
        );
        assert_eq!(
            KeccakHash::compute(&encoded).to_hex(),
            "d4e56740f876aef8c010b86a40d5f56745a118d0906a34e69aec8c0db1cb8fa3"
        );
    }

    #[test]
    fn test_london_header_matches_block_hash() {
        let record = HeaderRecord::from_json(LONDON).unwrap();
        let fields = select_fields(&record).unwrap();
        assert_eq!(fields.len(), 16);
        // baseFeePerGas = 42 gwei
        assert_eq!(fields[15], vec![0x09, 0xc7, 0x65, 0x24, 0x00]);

        let encoded = serialize_header(&record).unwrap();
        assert_eq!(
            KeccakHash::compute(&encoded).to_hex(),
            "169e77462f389180a1effb2dcca2482401b8f99e055a357a5d5b2f5328fc23b5"
        );
    }

    #[test]
    fn test_dropping_base_fee_yields_fifteen_fields() {
        let mut record = HeaderRecord::from_json(LONDON).unwrap();
        record.remove(BASE_FEE_FIELD);

        assert_eq!(select_fields(&record).unwrap().len(), 15);
        let encoded = HeaderSelector::strict().serialize(&record).unwrap();
        assert_eq!(
            KeccakHash::compute(&encoded).to_hex(),
            "ed5ae53293813258826339db39c3bcf3570c197e07c8e5a5e7da76f14ffcfbb2"
        );
    }

    #[test]
    fn test_strict_selector_reports_missing_required_field() {
        let mut record = HeaderRecord::from_json(GENESIS).unwrap();
        record.remove("mixHash");

        assert_eq!(select_fields(&record).unwrap().len(), 14);
        assert_eq!(
            HeaderSelector::strict().select(&record),
            Err(FixtureError::MissingField("mixHash".to_string()))
        );
    }

    #[test]
    fn test_table_shape() {
        assert_eq!(HEADER_FIELDS.len(), 16);
        assert_eq!(HEADER_FIELDS.iter().filter(|f| f.optional).count(), 1);
        assert_eq!(HEADER_FIELDS[15].name, BASE_FEE_FIELD);
    }
}
