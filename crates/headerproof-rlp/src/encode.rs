//! Canonical RLP encoding.

use crate::item::RlpItem;

/// Offset of the short string prefix range (`0x80..=0xb7`).
pub const STRING_OFFSET: u8 = 0x80;
/// Offset of the short list prefix range (`0xc0..=0xf7`).
pub const LIST_OFFSET: u8 = 0xc0;
/// Longest payload that still fits in a single prefix byte.
pub const MAX_SHORT_LEN: usize = 55;

/// Encode an item into its canonical binary form.
pub fn encode(item: &RlpItem) -> Vec<u8> {
    let lens = list_payload_lens(item);
    let mut out = Vec::with_capacity(total_len(item, &lens));
    write_item(item, &lens, &mut out);
    out
}

/// Append the canonical encoding of `item` to `out`.
pub fn encode_into(item: &RlpItem, out: &mut Vec<u8>) {
    let lens = list_payload_lens(item);
    out.reserve(total_len(item, &lens));
    write_item(item, &lens, out);
}

/// Encode a single byte string.
pub fn encode_bytes(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes_encoded_len(bytes));
    encode_bytes_into(bytes, &mut out);
    out
}

/// Encode a list of byte strings, the shape of a block header.
pub fn encode_byte_list<B: AsRef<[u8]>>(fields: &[B]) -> Vec<u8> {
    let payload_len: usize = fields.iter().map(|f| bytes_encoded_len(f.as_ref())).sum();
    let mut out = Vec::with_capacity(header_len(payload_len) + payload_len);
    write_header(LIST_OFFSET, payload_len, &mut out);
    for field in fields {
        encode_bytes_into(field.as_ref(), &mut out);
    }
    out
}

/// Length of the canonical encoding of `item`, without allocating it.
pub fn encoded_len(item: &RlpItem) -> usize {
    total_len(item, &list_payload_lens(item))
}

fn total_len(item: &RlpItem, lens: &[usize]) -> usize {
    match item {
        RlpItem::Bytes(bytes) => bytes_encoded_len(bytes),
        RlpItem::List(_) => header_len(lens[0]) + lens[0],
    }
}

/// Payload length of every list in `item`, indexed in pre-order.
///
/// Walks the tree with an explicit stack so nesting depth never grows the
/// call stack, and each list is measured once.
fn list_payload_lens(item: &RlpItem) -> Vec<usize> {
    let mut lens = Vec::new();
    let RlpItem::List(root) = item else {
        return lens;
    };
    lens.push(0);
    let mut stack = vec![(0usize, root.iter())];

    loop {
        let Some((slot, children)) = stack.last_mut() else {
            break;
        };
        let slot = *slot;
        match children.next() {
            Some(RlpItem::Bytes(bytes)) => lens[slot] += bytes_encoded_len(bytes),
            Some(RlpItem::List(items)) => {
                lens.push(0);
                stack.push((lens.len() - 1, items.iter()));
            }
            None => {
                stack.pop();
                if let Some(&(parent, _)) = stack.last() {
                    lens[parent] += header_len(lens[slot]) + lens[slot];
                }
            }
        }
    }
    lens
}

/// Emit `item` in pre-order, taking list payload lengths from `lens`.
fn write_item(item: &RlpItem, lens: &[usize], out: &mut Vec<u8>) {
    let mut next_list = 0;
    let mut stack = Vec::new();
    let mut current = Some(item);

    loop {
        match current.take() {
            Some(RlpItem::Bytes(bytes)) => encode_bytes_into(bytes, out),
            Some(RlpItem::List(items)) => {
                write_header(LIST_OFFSET, lens[next_list], out);
                next_list += 1;
                stack.push(items.iter());
            }
            None => {}
        }
        let Some(children) = stack.last_mut() else {
            break;
        };
        match children.next() {
            Some(child) => current = Some(child),
            None => {
                stack.pop();
            }
        }
    }
}

fn encode_bytes_into(bytes: &[u8], out: &mut Vec<u8>) {
    if bytes.len() == 1 && bytes[0] < STRING_OFFSET {
        out.push(bytes[0]);
        return;
    }
    write_header(STRING_OFFSET, bytes.len(), out);
    out.extend_from_slice(bytes);
}

fn bytes_encoded_len(bytes: &[u8]) -> usize {
    if bytes.len() == 1 && bytes[0] < STRING_OFFSET {
        1
    } else {
        header_len(bytes.len()) + bytes.len()
    }
}

fn header_len(payload_len: usize) -> usize {
    if payload_len <= MAX_SHORT_LEN {
        1
    } else {
        1 + be_len(payload_len)
    }
}

#[allow(clippy::cast_possible_truncation)]
pub(crate) fn write_header(offset: u8, payload_len: usize, out: &mut Vec<u8>) {
    if payload_len <= MAX_SHORT_LEN {
        out.push(offset + payload_len as u8);
    } else {
        let n = be_len(payload_len);
        let len_bytes = payload_len.to_be_bytes();
        // long form prefix sits 55 above the short offset: 0xb7 / 0xf7
        out.push(offset + MAX_SHORT_LEN as u8 + n as u8);
        out.extend_from_slice(&len_bytes[len_bytes.len() - n..]);
    }
}

/// Number of bytes in the minimal big-endian form of a non-zero length.
fn be_len(value: usize) -> usize {
    let bits = usize::BITS - value.leading_zeros();
    bits.div_ceil(8) as usize
}
