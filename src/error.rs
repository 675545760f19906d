//! Crate-wide error type.
//!
//! Nothing here is fatal to the page. Components log these and carry on so a
//! failure in one widget never takes the others down with it.

/// Failures surfaced by the page adapters and configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required host element could not be found.
    #[error("missing element: {0}")]
    MissingElement(String),
    /// The DOM rejected an operation (attribute write, element creation, ...).
    #[error("dom operation failed: {0}")]
    Dom(String),
    /// The modal dialog library was present but could not be driven.
    #[error("dialog failed: {0}")]
    Dialog(String),
    /// A configuration override document could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
