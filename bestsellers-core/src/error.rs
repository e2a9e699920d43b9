//! Error types for section setup and cart submission
use thiserror::Error;

/// Failures while wiring a section to its markup or reading its dataset.
#[derive(Debug, Error)]
pub enum SectionError {
    #[error("Missing region: {0}")]
    MissingRegion(String),
    #[error("Missing attribute {attribute} on {element}")]
    MissingAttribute {
        element: String,
        attribute: String,
    },
    #[error("Missing section payload: script#{0}")]
    MissingPayload(String),
    #[error("JSON parsing error: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("Product index {index} out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Section entry {0} has no product descriptor")]
    EmptyEntry(usize),
    #[error("Invalid product index: {0:?}")]
    InvalidIndex(String),
    #[error("DOM error: {0}")]
    Dom(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Failures while building or sending an add-to-cart request.
#[derive(Debug, Error)]
pub enum CartError {
    #[error("Product form has no `id` field")]
    MissingId,
    #[error("Request failed: {0}")]
    Request(String),
    #[error("HTTP {status}: {status_text}")]
    Status { status: u16, status_text: String },
    #[error("JSON parsing error: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for CartError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
