//! Error types for document generation.

use thiserror::Error;

/// Errors that can occur while building a selector document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The selection string could not be resolved.
    #[error("selection error: {0}")]
    Selection(#[from] residue_select::SelectionError),

    /// No selector records were supplied.
    #[error("no selectors to declare")]
    NoSelectors,

    /// An aggregate refers to a selector that has not been declared before it.
    #[error("selector '{selector}' refers to undeclared selector '{reference}'")]
    UndeclaredSelector {
        /// Name of the aggregate selector.
        selector: String,
        /// The missing name.
        reference: String,
    },
}

/// Result type for document operations.
pub type DocumentResult<T> = std::result::Result<T, DocumentError>;
