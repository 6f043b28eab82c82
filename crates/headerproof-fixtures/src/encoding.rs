//! Hex and integer helpers shared by the header and proof paths.

/// Strip an optional `0x` / `0X` prefix.
pub fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Decode a hex string, with or without `0x` prefix. Odd lengths are rejected.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(strip_hex_prefix(s))
}

/// Lowercase hex, optionally `0x`-prefixed.
pub fn encode_hex(bytes: &[u8], prefixed: bool) -> String {
    if prefixed {
        format!("0x{}", hex::encode(bytes))
    } else {
        hex::encode(bytes)
    }
}

/// Minimal big-endian bytes of `value`; zero is the empty string.
pub fn minimal_be_bytes(value: u64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    bytes[start..].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_decode_hex_prefixes() {
        assert_eq!(decode_hex("0xdead").unwrap(), vec![0xde, 0xad]);
        assert_eq!(decode_hex("0XDEAD").unwrap(), vec![0xde, 0xad]);
        assert_eq!(decode_hex("dead").unwrap(), vec![0xde, 0xad]);
        assert_eq!(decode_hex("0x").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_decode_hex_rejects_malformed() {
        assert!(decode_hex("0xabc").is_err());
        assert!(decode_hex("0xzz").is_err());
    }

    #[test]
    fn test_encode_hex() {
        assert_eq!(encode_hex(&[0x01, 0xff], false), "01ff");
        assert_eq!(encode_hex(&[0x01, 0xff], true), "0x01ff");
    }

    #[test]
    fn test_minimal_be_bytes() {
        assert!(minimal_be_bytes(0).is_empty());
        assert_eq!(minimal_be_bytes(1), vec![0x01]);
        assert_eq!(minimal_be_bytes(14_297_900), vec![0xda, 0x2b, 0x2c]);
        assert_eq!(minimal_be_bytes(u64::MAX), vec![0xff; 8]);
    }

    proptest! {
        #[test]
        fn prop_minimal_be_bytes_is_minimal(value in any::<u64>()) {
            let bytes = minimal_be_bytes(value);
            prop_assert!(bytes.first() != Some(&0));
            let mut padded = [0u8; 8];
            padded[8 - bytes.len()..].copy_from_slice(&bytes);
            prop_assert_eq!(u64::from_be_bytes(padded), value);
        }

        #[test]
        fn prop_hex_roundtrip(bytes in prop::collection::vec(any::<u8>(), 0..64), prefixed: bool) {
            let text = encode_hex(&bytes, prefixed);
            prop_assert_eq!(decode_hex(&text).unwrap(), bytes);
        }
    }
}
