use std::fmt;

/// A node of an RLP tree: either a byte string or an ordered list of items.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RlpItem {
    /// Raw byte string (may be empty)
    Bytes(Vec<u8>),
    /// Ordered list of nested items
    List(Vec<RlpItem>),
}

impl RlpItem {
    /// The empty byte string, RLP's representation of integer zero.
    pub const EMPTY: Self = RlpItem::Bytes(Vec::new());

    /// Create an empty list.
    pub const fn empty_list() -> Self {
        RlpItem::List(Vec::new())
    }

    pub fn is_list(&self) -> bool {
        matches!(self, RlpItem::List(_))
    }

    pub fn is_bytes(&self) -> bool {
        matches!(self, RlpItem::Bytes(_))
    }

    /// Borrow the byte string, if this item is one.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            RlpItem::Bytes(bytes) => Some(bytes),
            RlpItem::List(_) => None,
        }
    }

    /// Borrow the list elements, if this item is a list.
    pub fn as_list(&self) -> Option<&[RlpItem]> {
        match self {
            RlpItem::List(items) => Some(items),
            RlpItem::Bytes(_) => None,
        }
    }

    /// Consume the item, returning the list elements if it is a list.
    pub fn into_list(self) -> Option<Vec<RlpItem>> {
        match self {
            RlpItem::List(items) => Some(items),
            RlpItem::Bytes(_) => None,
        }
    }

    /// Canonical encoding of this item.
    pub fn encode(&self) -> Vec<u8> {
        crate::encode::encode(self)
    }

    /// Number of bytes `encode` would produce.
    pub fn encoded_len(&self) -> usize {
        crate::encode::encoded_len(self)
    }
}

impl Default for RlpItem {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl From<Vec<u8>> for RlpItem {
    fn from(bytes: Vec<u8>) -> Self {
        RlpItem::Bytes(bytes)
    }
}

impl From<&[u8]> for RlpItem {
    fn from(bytes: &[u8]) -> Self {
        RlpItem::Bytes(bytes.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for RlpItem {
    fn from(bytes: [u8; N]) -> Self {
        RlpItem::Bytes(bytes.to_vec())
    }
}

impl From<Vec<RlpItem>> for RlpItem {
    fn from(items: Vec<RlpItem>) -> Self {
        RlpItem::List(items)
    }
}

impl FromIterator<RlpItem> for RlpItem {
    fn from_iter<I: IntoIterator<Item = RlpItem>>(iter: I) -> Self {
        RlpItem::List(iter.into_iter().collect())
    }
}

impl fmt::Display for RlpItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RlpItem::Bytes(bytes) => write!(f, "0x{}", hex::encode(bytes)),
            RlpItem::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let bytes = RlpItem::from(vec![1u8, 2]);
        assert!(bytes.is_bytes());
        assert_eq!(bytes.as_bytes(), Some(&[1u8, 2][..]));
        assert!(bytes.as_list().is_none());

        let list: RlpItem = vec![bytes.clone(), RlpItem::EMPTY].into_iter().collect();
        assert!(list.is_list());
        assert_eq!(list.as_list().map(|l| l.len()), Some(2));
        assert_eq!(list.into_list(), Some(vec![bytes, RlpItem::EMPTY]));
    }

    #[test]
    fn test_display() {
        let item = RlpItem::List(vec![
            RlpItem::from([0xabu8]),
            RlpItem::List(vec![RlpItem::EMPTY]),
        ]);
        assert_eq!(item.to_string(), "[0xab, [0x]]");
    }
}
