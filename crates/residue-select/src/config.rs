//! Configuration for the selection resolver.

/// Default limit on parenthesis nesting.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Configuration for [`resolve_with`](crate::resolve_with).
///
/// # Example
///
/// ```rust
/// use residue_select::ResolverConfig;
///
/// let config = ResolverConfig::builder()
///     .with_spaced_fallback(false)
///     .with_max_predicates(64)
///     .build();
/// assert!(!config.spaced_fallback);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolverConfig {
    /// Retry with spaced terms (`not chain A`, `resi 1 - 9`) when the compact
    /// grammar fails.
    pub spaced_fallback: bool,
    /// Maximum number of predicates in one selection (None = unlimited).
    pub max_predicates: Option<usize>,
    /// Maximum parenthesis nesting of the normalized selection, counting the
    /// outer pair added by normalization. Deeper input is a syntax error.
    pub max_depth: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            spaced_fallback: true,
            max_predicates: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ResolverConfig {
    /// Creates a new builder for ResolverConfig.
    pub fn builder() -> ResolverConfigBuilder {
        ResolverConfigBuilder::default()
    }
}

/// Builder for ResolverConfig.
#[derive(Debug, Clone, Default)]
pub struct ResolverConfigBuilder {
    config: ResolverConfig,
}

impl ResolverConfigBuilder {
    /// Enables or disables the spaced-term retry.
    pub fn with_spaced_fallback(mut self, enabled: bool) -> Self {
        self.config.spaced_fallback = enabled;
        self
    }

    /// Sets the maximum number of predicates.
    pub fn with_max_predicates(mut self, limit: usize) -> Self {
        self.config.max_predicates = Some(limit);
        self
    }

    /// Sets the maximum parenthesis nesting depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth;
        self
    }

    /// Builds the ResolverConfig.
    pub fn build(self) -> ResolverConfig {
        self.config
    }
}
