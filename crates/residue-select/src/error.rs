//! Error types for selection parsing and resolution.

use thiserror::Error;

/// Errors that can occur while resolving a residue selection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// Empty input provided.
    #[error("empty selection expression")]
    EmptySelection,

    /// The expression matches neither the compact nor the spaced term grammar.
    #[error("syntax error at position {position}: unexpected input at '{fragment}'")]
    Syntax {
        /// Position in the normalized expression where parsing stopped.
        position: usize,
        /// The offending part of the expression.
        fragment: String,
    },

    /// One or more terms parsed but matched no predicate pattern.
    #[error("unrecognized predicate: {}", quote_all(.terms))]
    Classification {
        /// Text of every term that could not be classified.
        terms: Vec<String>,
    },

    /// An aggregate record refers to a selector that is not defined before it.
    #[error("selector '{name}' {reason}")]
    Referential {
        /// Name of the offending selector.
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The selection contains more predicates than the configured limit.
    #[error("selection has {count} predicates, exceeding the limit of {limit}")]
    TooManyPredicates {
        /// Number of predicates found.
        count: usize,
        /// Configured limit.
        limit: usize,
    },
}

fn quote_all(terms: &[String]) -> String {
    terms
        .iter()
        .map(|t| format!("'{}'", t))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for selection operations.
pub type SelectionResult<T> = std::result::Result<T, SelectionError>;
