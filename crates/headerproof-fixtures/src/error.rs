use headerproof_rlp::RlpError;
use thiserror::Error;

/// Errors that can occur while turning fixture records into RLP.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FixtureError {
    #[error("Malformed field '{field}': {reason}")]
    MalformedField { field: String, reason: String },

    #[error("Missing required header field: {0}")]
    MissingField(String),

    #[error("Proof node {node} is not valid RLP: {source}")]
    NodeDecode {
        node: String,
        #[source]
        source: RlpError,
    },

    #[error("Invalid hash: {0}")]
    InvalidHash(String),

    #[error("JSON error: {0}")]
    Json(String),
}

impl FixtureError {
    pub(crate) fn malformed(field: impl Into<String>, reason: impl ToString) -> Self {
        FixtureError::MalformedField {
            field: field.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<serde_json::Error> for FixtureError {
    fn from(e: serde_json::Error) -> Self {
        FixtureError::Json(e.to_string())
    }
}
