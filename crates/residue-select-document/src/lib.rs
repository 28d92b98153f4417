//! # residue-select-document
//!
//! Turns resolved residue selections into the residue-selector and
//! movable-region blocks of a refinement protocol script.
//!
//! ## Quick Start
//!
//! ```rust
//! use residue_select_document::{generate, DocumentConfig};
//!
//! let xml = generate("chain A and not resn HOH", &DocumentConfig::default()).unwrap();
//! assert!(xml.contains("<Chain name=\"000\" chains=\"A\"/>"));
//! assert!(xml.contains("<Not name=\"020\">"));
//! assert!(xml.contains("<And name=\"00\" selectors=\"000,020\"/>"));
//! assert!(xml.contains("<Backbone residue_selector=\"00\"/>"));
//! ```
//!
//! ## Output Layout
//!
//! | Record | Element |
//! |--------|---------|
//! | `Chain` | `<Chain name chains/>` |
//! | `Index` | `<Index name resnums/>` |
//! | `ResidueName` | `<ResidueName name residue_names/>` |
//! | inverted atomic | `<Not name>` around the unnamed element |
//! | `And` / `Or` | `<And name selectors/>` / `<Or name selectors/>` |
//!
//! The `MoveMapFactory` freezes everything and then frees backbone and
//! side chains for each top-level selector.
//!
//! ## Architecture
//!
//! ```text
//! selection ── residue_select::ResidueSelection ── SelectorDocument ── XmlFormatter
//!                  ordered records                 declarations +        XML text
//!                                                  MoveMapFactory
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod config;
mod document;
mod error;
mod formatter;

// Public re-exports
pub use config::{DocumentConfig, DocumentConfigBuilder, DEFAULT_FACTORY_NAME};
pub use document::{value_attribute, MoveMapFactory, SelectorDeclaration, SelectorDocument};
pub use error::{DocumentError, DocumentResult};
pub use formatter::{escape, XmlFormatter};

// Re-export commonly used types from the resolver for convenience
pub use residue_select::{ResidueSelection, SelectorKind, SelectorRecord};

/// Resolves `selection` and renders its selector document.
///
/// Nothing is rendered unless the whole selection resolves.
pub fn generate(selection: &str, config: &DocumentConfig) -> DocumentResult<String> {
    let selection = ResidueSelection::with_config(selection, &config.resolver)?;
    let document = SelectorDocument::from_records(selection.records(), config)?;
    Ok(document.render())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api_accessible() {
        let _: Option<DocumentConfig> = None;
        let _: Option<SelectorDocument> = None;
        let _: Option<DocumentResult<()>> = None;
    }

    #[test]
    fn test_generate_propagates_selection_errors() {
        let err = generate("foo bar", &DocumentConfig::default()).unwrap_err();
        assert!(matches!(err, DocumentError::Selection(_)));
    }

    #[test]
    fn test_generate_uses_resolver_config() {
        let config = DocumentConfig::builder()
            .with_resolver(
                residue_select::ResolverConfig::builder()
                    .with_max_predicates(1)
                    .build(),
            )
            .build();
        assert!(generate("chain A", &config).is_ok());
        assert!(generate("chain A or chain B", &config).is_err());
    }
}
