//! The resolver facade: raw selection string in, ordered records out.

use std::fmt;

use crate::ast::SelectorRecord;
use crate::classify::classify_tree;
use crate::config::ResolverConfig;
use crate::error::{SelectionError, SelectionResult};
use crate::flatten::flatten;
use crate::index::assign_positions;
use crate::normalize::normalize;
use crate::parser::parse_with;
use crate::reorder::{reorder, verify_references};

/// Resolve a selection string into ordered selector records.
///
/// Either every phase succeeds or the whole call fails; a partial record
/// list is never returned.
///
/// # Examples
///
/// ```rust
/// use residue_select::{resolve, SelectorKind};
///
/// let records = resolve("chain A and chain B and chain C").unwrap();
/// let and = records.last().unwrap();
/// assert_eq!(and.kind, SelectorKind::And);
/// assert_eq!(and.name, "00");
/// assert_eq!(and.values, "000,020,040");
/// ```
pub fn resolve(raw: &str) -> SelectionResult<Vec<SelectorRecord>> {
    resolve_with(raw, &ResolverConfig::default())
}

/// Resolve a selection string with a custom configuration.
pub fn resolve_with(raw: &str, config: &ResolverConfig) -> SelectionResult<Vec<SelectorRecord>> {
    ResidueSelection::with_config(raw, config).map(ResidueSelection::into_records)
}

/// A resolved residue selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidueSelection {
    source: String,
    normalized: String,
    records: Vec<SelectorRecord>,
}

impl ResidueSelection {
    /// Resolves `raw` with the default configuration.
    pub fn new(raw: &str) -> SelectionResult<Self> {
        Self::with_config(raw, &ResolverConfig::default())
    }

    /// Resolves `raw` with `config`.
    pub fn with_config(raw: &str, config: &ResolverConfig) -> SelectionResult<Self> {
        log::debug!("resolving selection '{}'", raw);

        let normalized = normalize(raw);
        if normalized.trim_matches(|c: char| c == '(' || c == ')' || c.is_whitespace()).is_empty() {
            return Err(SelectionError::EmptySelection);
        }
        log::debug!("normalized selection: '{}'", normalized);

        let tree = parse_with(&normalized, config)?;
        log::debug!("parse tree: {}", tree);

        let count = tree.leaf_count();
        if let Some(limit) = config.max_predicates {
            if count > limit {
                return Err(SelectionError::TooManyPredicates { count, limit });
            }
        }

        let predicates = classify_tree(&tree)?;
        let indexed = assign_positions(&predicates);
        let records = reorder(flatten(&indexed));
        verify_references(&records)?;

        log::debug!("resolved {} selector records", records.len());
        for record in &records {
            log::trace!("{}", record);
        }

        Ok(Self {
            source: raw.to_string(),
            normalized,
            records,
        })
    }

    /// The selection as given.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The selection after quote removal and wrapping.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Records in output order.
    pub fn records(&self) -> &[SelectorRecord] {
        &self.records
    }

    /// Consumes the selection, returning its records.
    pub fn into_records(self) -> Vec<SelectorRecord> {
        self.records
    }

    /// Names of the top-level selectors, i.e. those with the shortest name.
    ///
    /// These scope the movable region of a refinement.
    pub fn root_names(&self) -> Vec<&str> {
        root_names(&self.records)
    }
}

/// Names of the records with the shortest name, in output order.
pub fn root_names(records: &[SelectorRecord]) -> Vec<&str> {
    let Some(shortest) = records.iter().map(|r| r.name.len()).min() else {
        return Vec::new();
    };
    records
        .iter()
        .filter(|r| r.name.len() == shortest)
        .map(|r| r.name.as_str())
        .collect()
}

impl fmt::Display for ResidueSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in &self.records {
            writeln!(f, "{}", record)?;
        }
        Ok(())
    }
}
