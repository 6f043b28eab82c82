//! Strict RLP decoding.
//!
//! Only canonical encodings are accepted: a bare byte below `0x80` must not
//! carry a prefix, long-form prefixes are reserved for payloads above 55
//! bytes, and length fields carry no leading zero bytes.
//!
//! Lists may nest at most [`MAX_DEPTH`] deep; deeper input is rejected with
//! [`RlpError::DepthLimitExceeded`] before it can exhaust the call stack.

use crate::encode::{LIST_OFFSET, MAX_SHORT_LEN, STRING_OFFSET};
use crate::error::RlpError;
use crate::item::RlpItem;

/// Maximum number of nested lists accepted by the decoder.
pub const MAX_DEPTH: usize = 128;

/// Parsed prefix of one encoded item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Header {
    list: bool,
    /// Bytes taken by the prefix and length field; zero for a bare byte.
    header_len: usize,
    payload_len: usize,
}

impl Header {
    fn parse(input: &[u8]) -> Result<Self, RlpError> {
        let prefix = *input.first().ok_or_else(|| RlpError::truncated(1, 0))?;

        let header = match prefix {
            // Single byte [0x00, 0x7f]
            0x00..=0x7f => Header {
                list: false,
                header_len: 0,
                payload_len: 1,
            },

            // Short string [0x80, 0xb7]
            0x80..=0xb7 => {
                let payload_len = (prefix - STRING_OFFSET) as usize;
                if payload_len == 1 {
                    match input.get(1) {
                        Some(&byte) if byte < STRING_OFFSET => {
                            return Err(RlpError::NonCanonicalEncoding(
                                "single byte below 0x80 encoded with a length prefix",
                            ));
                        }
                        Some(_) => {}
                        None => return Err(RlpError::truncated(2, input.len())),
                    }
                }
                Header {
                    list: false,
                    header_len: 1,
                    payload_len,
                }
            }

            // Long string [0xb8, 0xbf]
            0xb8..=0xbf => {
                let len_of_len = (prefix - STRING_OFFSET) as usize - MAX_SHORT_LEN;
                Header {
                    list: false,
                    header_len: 1 + len_of_len,
                    payload_len: read_long_length(input, len_of_len)?,
                }
            }

            // Short list [0xc0, 0xf7]
            0xc0..=0xf7 => Header {
                list: true,
                header_len: 1,
                payload_len: (prefix - LIST_OFFSET) as usize,
            },

            // Long list [0xf8, 0xff]
            0xf8..=0xff => {
                let len_of_len = (prefix - LIST_OFFSET) as usize - MAX_SHORT_LEN;
                Header {
                    list: true,
                    header_len: 1 + len_of_len,
                    payload_len: read_long_length(input, len_of_len)?,
                }
            }
        };

        let total = header
            .header_len
            .checked_add(header.payload_len)
            .ok_or_else(|| RlpError::truncated(usize::MAX, input.len()))?;
        if input.len() < total {
            return Err(RlpError::truncated(total, input.len()));
        }

        Ok(header)
    }
}

/// Read the big-endian length field that follows a long-form prefix.
fn read_long_length(input: &[u8], len_of_len: usize) -> Result<usize, RlpError> {
    let field = input
        .get(1..1 + len_of_len)
        .ok_or_else(|| RlpError::truncated(1 + len_of_len, input.len()))?;

    if field[0] == 0 {
        return Err(RlpError::NonCanonicalEncoding("length field has leading zero bytes"));
    }
    if len_of_len > std::mem::size_of::<usize>() {
        // A length this wide cannot be backed by an in-memory buffer.
        return Err(RlpError::truncated(usize::MAX, input.len()));
    }

    let len = field
        .iter()
        .fold(0usize, |acc, &b| (acc << 8) | b as usize);
    if len <= MAX_SHORT_LEN {
        return Err(RlpError::NonCanonicalEncoding(
            "long form prefix used for a payload of 55 bytes or fewer",
        ));
    }
    Ok(len)
}

/// Decode exactly one item; the whole input must be consumed.
pub fn decode(input: &[u8]) -> Result<RlpItem, RlpError> {
    let (item, consumed) = decode_prefix(input)?;
    if consumed < input.len() {
        return Err(RlpError::TrailingBytes {
            remaining: input.len() - consumed,
        });
    }
    Ok(item)
}

/// Decode the first item of `input`, returning it with the number of bytes
/// it occupied. Bytes after the item are left untouched.
pub fn decode_prefix(input: &[u8]) -> Result<(RlpItem, usize), RlpError> {
    decode_at_depth(input, 0)
}

fn decode_at_depth(input: &[u8], depth: usize) -> Result<(RlpItem, usize), RlpError> {
    let header = Header::parse(input)?;
    let end = header.header_len + header.payload_len;
    let payload = &input[header.header_len..end];

    let item = if header.list {
        if depth >= MAX_DEPTH {
            return Err(RlpError::DepthLimitExceeded { limit: MAX_DEPTH });
        }
        RlpItem::List(decode_list_payload(payload, depth + 1)?)
    } else {
        RlpItem::Bytes(payload.to_vec())
    };
    Ok((item, end))
}

fn decode_list_payload(mut payload: &[u8], depth: usize) -> Result<Vec<RlpItem>, RlpError> {
    let mut items = Vec::new();
    while !payload.is_empty() {
        let (item, consumed) = decode_at_depth(payload, depth)?;
        items.push(item);
        payload = &payload[consumed..];
    }
    Ok(items)
}
