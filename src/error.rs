//! Error types for fikcio operations.

use thiserror::Error;

/// Errors that can occur while parsing or rendering a FictionBook document.
///
/// The element/attribute variants carry the offending name as structured
/// data so callers can produce localized messages.
#[derive(Error, Debug)]
pub enum Error {
    #[error("missing required element: {0}")]
    ElementNotFound(String),

    /// Reserved for mandatory-attribute checks; no current code path
    /// enforces one.
    #[error("missing required attribute: {0}")]
    AttributeNotFound(String),

    #[error("section nesting exceeds supported depth ({0})")]
    NestingTooDeep(usize),

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("locale catalog error: {0}")]
    Catalog(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for the mandatory-element failure used throughout parsing.
    pub(crate) fn element(name: &str) -> Self {
        Error::ElementNotFound(name.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
