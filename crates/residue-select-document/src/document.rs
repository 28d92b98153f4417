//! Selector declarations and the movable-region factory built from records.

use std::collections::HashSet;

use residue_select::{root_names, SelectorKind, SelectorRecord};

use crate::config::DocumentConfig;
use crate::error::{DocumentError, DocumentResult};
use crate::formatter::XmlFormatter;

/// One declared residue selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorDeclaration {
    /// Element kind.
    pub kind: SelectorKind,
    /// Selector name. For a negated declaration this names the `Not` wrapper.
    pub name: String,
    /// Attribute carrying `value` (`chains`, `resnums`, `residue_names` or `selectors`).
    pub attribute: &'static str,
    /// Literal value or comma-joined selector names.
    pub value: String,
    /// Wrap the element in a `Not` selector.
    pub negated: bool,
}

impl SelectorDeclaration {
    /// Builds the declaration for one record.
    pub fn from_record(record: &SelectorRecord) -> Self {
        Self {
            kind: record.kind,
            name: record.name.clone(),
            attribute: value_attribute(record.kind),
            value: record.values.clone(),
            negated: record.invert && !record.kind.is_aggregate(),
        }
    }
}

/// Attribute name that holds a selector's value.
pub fn value_attribute(kind: SelectorKind) -> &'static str {
    match kind {
        SelectorKind::Chain => "chains",
        SelectorKind::Index => "resnums",
        SelectorKind::ResidueName => "residue_names",
        SelectorKind::And | SelectorKind::Or => "selectors",
    }
}

/// Move map factory restricting minimization to the selected residues.
///
/// The factory starts with everything frozen (`bb="0" chi="0" jumps="0"`)
/// and re-enables backbone and side-chain movement for each region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveMapFactory {
    /// Factory name.
    pub name: String,
    /// Selector names whose residues may move.
    pub regions: Vec<String>,
    /// Emit a `Backbone` entry per region.
    pub backbone: bool,
    /// Emit a `Chi` entry per region.
    pub chi: bool,
}

/// Residue selectors plus the factory that scopes a refinement to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorDocument {
    declarations: Vec<SelectorDeclaration>,
    factory: MoveMapFactory,
    indent: usize,
}

impl SelectorDocument {
    /// Builds a document from records in output order.
    ///
    /// Every aggregate must only reference selectors declared before it.
    pub fn from_records(records: &[SelectorRecord], config: &DocumentConfig) -> DocumentResult<Self> {
        if records.is_empty() {
            return Err(DocumentError::NoSelectors);
        }

        let mut declared: HashSet<&str> = HashSet::with_capacity(records.len());
        let mut declarations = Vec::with_capacity(records.len());
        for record in records {
            if let Some(missing) = record.references().into_iter().find(|r| !declared.contains(r)) {
                return Err(DocumentError::UndeclaredSelector {
                    selector: record.name.clone(),
                    reference: missing.to_string(),
                });
            }
            declared.insert(record.name.as_str());
            declarations.push(SelectorDeclaration::from_record(record));
        }

        let regions: Vec<String> = root_names(records).into_iter().map(String::from).collect();
        log::debug!(
            "declared {} selectors, movable regions: {:?}",
            declarations.len(),
            regions
        );

        Ok(Self {
            declarations,
            factory: MoveMapFactory {
                name: config.factory_name.clone(),
                regions,
                backbone: config.backbone,
                chi: config.chi,
            },
            indent: config.indent,
        })
    }

    /// Declarations in output order.
    pub fn declarations(&self) -> &[SelectorDeclaration] {
        &self.declarations
    }

    /// The move map factory.
    pub fn factory(&self) -> &MoveMapFactory {
        &self.factory
    }

    /// Renders the document as XML.
    pub fn render(&self) -> String {
        XmlFormatter::new(self.indent).format(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use residue_select::{resolve, BoolOp, Predicate, PredicateKind};

    fn chain(name: &str, id: &str, invert: bool) -> SelectorRecord {
        SelectorRecord::atomic(name, &Predicate::new(PredicateKind::Chain, id, invert))
    }

    mod declarations {
        use super::*;

        #[test]
        fn test_attribute_per_kind() {
            assert_eq!(value_attribute(SelectorKind::Chain), "chains");
            assert_eq!(value_attribute(SelectorKind::Index), "resnums");
            assert_eq!(value_attribute(SelectorKind::ResidueName), "residue_names");
            assert_eq!(value_attribute(SelectorKind::And), "selectors");
            assert_eq!(value_attribute(SelectorKind::Or), "selectors");
        }

        #[test]
        fn test_negated_atomic() {
            let decl = SelectorDeclaration::from_record(&chain("00", "A", true));
            assert!(decl.negated);
            assert_eq!(decl.attribute, "chains");
            assert_eq!(decl.value, "A");
        }

        #[test]
        fn test_aggregate_is_never_negated() {
            let mut record = SelectorRecord::aggregate(BoolOp::Or, "00", &["000", "020"]);
            record.invert = true;
            let decl = SelectorDeclaration::from_record(&record);
            assert!(!decl.negated);
            assert_eq!(decl.value, "000,020");
        }
    }

    mod building {
        use super::*;

        #[test]
        fn test_empty_records() {
            let err = SelectorDocument::from_records(&[], &DocumentConfig::default()).unwrap_err();
            assert_eq!(err, DocumentError::NoSelectors);
        }

        #[test]
        fn test_undeclared_reference() {
            let records = vec![
                chain("000", "A", false),
                SelectorRecord::aggregate(BoolOp::And, "00", &["000", "020"]),
            ];
            let err =
                SelectorDocument::from_records(&records, &DocumentConfig::default()).unwrap_err();
            assert_eq!(
                err,
                DocumentError::UndeclaredSelector {
                    selector: "00".to_string(),
                    reference: "020".to_string(),
                }
            );
        }

        #[test]
        fn test_forward_reference_is_undeclared() {
            let records = vec![
                SelectorRecord::aggregate(BoolOp::And, "00", &["000"]),
                chain("000", "A", false),
            ];
            assert!(matches!(
                SelectorDocument::from_records(&records, &DocumentConfig::default()),
                Err(DocumentError::UndeclaredSelector { .. })
            ));
        }

        #[test]
        fn test_regions_are_root_selectors() {
            let records = resolve("chain A and resn ALA or chain B").unwrap();
            let doc = SelectorDocument::from_records(&records, &DocumentConfig::default()).unwrap();
            assert_eq!(doc.factory().regions, vec!["00".to_string()]);
            assert_eq!(doc.factory().name, "fr_mm_factory");
            assert_eq!(doc.declarations().len(), records.len());
        }

        #[test]
        fn test_config_flows_into_factory() {
            let config = DocumentConfig::builder()
                .with_factory_name("mm")
                .with_chi(false)
                .build();
            let doc = SelectorDocument::from_records(&[chain("00", "A", false)], &config).unwrap();
            assert_eq!(doc.factory().name, "mm");
            assert!(doc.factory().backbone);
            assert!(!doc.factory().chi);
        }
    }
}
