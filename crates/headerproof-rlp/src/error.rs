use thiserror::Error;

/// Errors that can occur while decoding RLP.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RlpError {
    #[error("Truncated input: need {needed} bytes, {available} available")]
    TruncatedInput { needed: usize, available: usize },

    #[error("Trailing bytes: {remaining} bytes left after the first item")]
    TrailingBytes { remaining: usize },

    #[error("Non-canonical encoding: {0}")]
    NonCanonicalEncoding(&'static str),

    #[error("Lists nested deeper than {limit} levels")]
    DepthLimitExceeded { limit: usize },
}

impl RlpError {
    pub(crate) fn truncated(needed: usize, available: usize) -> Self {
        RlpError::TruncatedInput { needed, available }
    }
}
