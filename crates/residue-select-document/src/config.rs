//! Configuration types for document generation.

use residue_select::ResolverConfig;

/// Name of the move map factory the refinement protocol refers to.
pub const DEFAULT_FACTORY_NAME: &str = "fr_mm_factory";

/// Configuration for building and rendering a selector document.
///
/// # Example
///
/// ```rust
/// use residue_select_document::DocumentConfig;
///
/// let config = DocumentConfig::builder()
///     .with_factory_name("relax_mm")
///     .with_indent(4)
///     .with_chi(false)
///     .build();
/// assert_eq!(config.factory_name, "relax_mm");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentConfig {
    /// Configuration used when resolving selection strings.
    pub resolver: ResolverConfig,
    /// Name of the generated `MoveMapFactory`.
    pub factory_name: String,
    /// Spaces per nesting level in rendered output.
    pub indent: usize,
    /// Allow backbone movement in the movable region.
    pub backbone: bool,
    /// Allow side-chain (chi) movement in the movable region.
    pub chi: bool,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            resolver: ResolverConfig::default(),
            factory_name: DEFAULT_FACTORY_NAME.to_string(),
            indent: 2,
            backbone: true,
            chi: true,
        }
    }
}

impl DocumentConfig {
    /// Creates a new builder for DocumentConfig.
    pub fn builder() -> DocumentConfigBuilder {
        DocumentConfigBuilder::default()
    }
}

/// Builder for DocumentConfig.
#[derive(Debug, Clone, Default)]
pub struct DocumentConfigBuilder {
    config: DocumentConfig,
}

impl DocumentConfigBuilder {
    /// Sets the resolver configuration.
    pub fn with_resolver(mut self, resolver: ResolverConfig) -> Self {
        self.config.resolver = resolver;
        self
    }

    /// Sets the move map factory name.
    pub fn with_factory_name(mut self, name: impl Into<String>) -> Self {
        self.config.factory_name = name.into();
        self
    }

    /// Sets the indentation width.
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.config.indent = indent;
        self
    }

    /// Enables or disables backbone entries.
    pub fn with_backbone(mut self, backbone: bool) -> Self {
        self.config.backbone = backbone;
        self
    }

    /// Enables or disables chi entries.
    pub fn with_chi(mut self, chi: bool) -> Self {
        self.config.chi = chi;
        self
    }

    /// Builds the DocumentConfig.
    pub fn build(self) -> DocumentConfig {
        self.config
    }
}
