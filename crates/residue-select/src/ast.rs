//! Tree types produced by the selection parser.

use std::fmt;

/// Boolean operator joining the operands of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoolOp {
    /// Conjunction: `and`
    And,
    /// Disjunction: `or`
    Or,
}

impl fmt::Display for BoolOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoolOp::And => write!(f, "and"),
            BoolOp::Or => write!(f, "or"),
        }
    }
}

/// A node of a selection tree.
///
/// The leaf payload changes from phase to phase: the parser produces
/// [`ParseTree`] (raw term text) and the classifier turns it into a
/// [`PredicateTree`].
///
/// A group always has at least two operands, and chains of the same operator
/// at one level are kept in a single group: `a and b and c` is one `And`
/// group over three operands, never two nested binary groups.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionNode<T> {
    /// An atomic term.
    Leaf(T),

    /// Operands joined by one boolean operator, in source order.
    Group {
        /// The operator shared by all operands.
        op: BoolOp,
        /// The operands (at least two).
        operands: Vec<SelectionNode<T>>,
    },
}

/// Parser output: leaves carry the term text, words joined by single spaces.
pub type ParseTree = SelectionNode<String>;

/// Classifier output: leaves carry typed predicates.
pub type PredicateTree = SelectionNode<Predicate>;

impl<T> SelectionNode<T> {
    /// Creates a leaf node.
    pub fn leaf(value: T) -> Self {
        SelectionNode::Leaf(value)
    }

    /// Joins operands with `op`.
    ///
    /// A single operand is returned unchanged, so a parenthesised term does
    /// not introduce an extra level.
    pub fn group(op: BoolOp, mut operands: Vec<SelectionNode<T>>) -> Self {
        if operands.len() == 1 {
            if let Some(only) = operands.pop() {
                return only;
            }
        }
        SelectionNode::Group { op, operands }
    }

    /// Returns true if this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, SelectionNode::Leaf(_))
    }

    /// Number of leaves below (and including) this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            SelectionNode::Leaf(_) => 1,
            SelectionNode::Group { operands, .. } => {
                operands.iter().map(SelectionNode::leaf_count).sum()
            }
        }
    }

    /// Rebuilds the tree with every leaf mapped through `f`, keeping the shape.
    ///
    /// `f` is called once per leaf, in source order, even after a failure.
    /// If any call fails, every error is returned.
    pub fn try_map<U, E>(
        &self,
        f: &mut impl FnMut(&T) -> Result<U, E>,
    ) -> Result<SelectionNode<U>, Vec<E>> {
        let mut errors = Vec::new();
        let mapped = self.map_leaves(f, &mut errors);
        mapped.ok_or(errors)
    }

    fn map_leaves<U, E>(
        &self,
        f: &mut impl FnMut(&T) -> Result<U, E>,
        errors: &mut Vec<E>,
    ) -> Option<SelectionNode<U>> {
        match self {
            SelectionNode::Leaf(value) => match f(value) {
                Ok(mapped) => Some(SelectionNode::Leaf(mapped)),
                Err(e) => {
                    errors.push(e);
                    None
                }
            },
            SelectionNode::Group { op, operands } => {
                let mut mapped = Vec::with_capacity(operands.len());
                for operand in operands {
                    if let Some(node) = operand.map_leaves(&mut *f, errors) {
                        mapped.push(node);
                    }
                }
                (mapped.len() == operands.len()).then(|| SelectionNode::Group {
                    op: *op,
                    operands: mapped,
                })
            }
        }
    }
}

impl<T: fmt::Display> fmt::Display for SelectionNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionNode::Leaf(value) => write!(f, "{}", value),
            SelectionNode::Group { op, operands } => {
                write!(f, "(")?;
                for (i, operand) in operands.iter().enumerate() {
                    if i > 0 {
                        write!(f, " {} ", op)?;
                    }
                    write!(f, "{}", operand)?;
                }
                write!(f, ")")
            }
        }
    }
}

// =============================================================================
// Predicates
// =============================================================================

/// What an atomic term selects on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PredicateKind {
    /// `chain ID`
    Chain,
    /// `resi N`
    ResidueIndex,
    /// `resi N-M` or `resi N - M`
    ResidueIndexRange,
    /// `resn NAME`
    ResidueName,
}

/// A classified atomic term.
///
/// Example: `not resi 10 - 20` is
/// `Predicate { kind: ResidueIndexRange, value: "10-20", invert: true }`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Predicate {
    /// Predicate kind.
    pub kind: PredicateKind,
    /// The literal value; ranges are normalized to `lo-hi`.
    pub value: String,
    /// True if the term was prefixed with `not`.
    pub invert: bool,
}

impl Predicate {
    /// Creates a predicate.
    pub fn new(kind: PredicateKind, value: impl Into<String>, invert: bool) -> Self {
        Self {
            kind,
            value: value.into(),
            invert,
        }
    }

    /// The selector kind this predicate is emitted as.
    pub fn selector_kind(&self) -> SelectorKind {
        match self.kind {
            PredicateKind::Chain => SelectorKind::Chain,
            PredicateKind::ResidueIndex | PredicateKind::ResidueIndexRange => SelectorKind::Index,
            PredicateKind::ResidueName => SelectorKind::ResidueName,
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.invert {
            write!(f, "not ")?;
        }
        let keyword = match self.kind {
            PredicateKind::Chain => "chain",
            PredicateKind::ResidueIndex | PredicateKind::ResidueIndexRange => "resi",
            PredicateKind::ResidueName => "resn",
        };
        write!(f, "{} {}", keyword, self.value)
    }
}

// =============================================================================
// Selector records
// =============================================================================

/// Kind of a flat selector record.
///
/// The `Display` form is the element name the document generator emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectorKind {
    /// Chain identifier selector.
    Chain,
    /// Residue number or residue number range selector.
    Index,
    /// Residue name selector.
    ResidueName,
    /// Intersection of the referenced selectors.
    And,
    /// Union of the referenced selectors.
    Or,
}

impl SelectorKind {
    /// Returns true for `And`/`Or`.
    pub fn is_aggregate(self) -> bool {
        matches!(self, SelectorKind::And | SelectorKind::Or)
    }
}

impl From<BoolOp> for SelectorKind {
    fn from(op: BoolOp) -> Self {
        match op {
            BoolOp::And => SelectorKind::And,
            BoolOp::Or => SelectorKind::Or,
        }
    }
}

impl fmt::Display for SelectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SelectorKind::Chain => "Chain",
            SelectorKind::Index => "Index",
            SelectorKind::ResidueName => "ResidueName",
            SelectorKind::And => "And",
            SelectorKind::Or => "Or",
        };
        f.write_str(name)
    }
}

/// One named selector in the resolved output.
///
/// Aggregate records (`And`/`Or`) list the names of their operands,
/// comma-joined and in source order, in `values`. They never set `invert`;
/// negation only applies to atomic predicates.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectorRecord {
    /// Record kind.
    pub kind: SelectorKind,
    /// Positional name.
    pub name: String,
    /// Literal value, or comma-joined operand names for aggregates.
    pub values: String,
    /// True if the selection is negated.
    pub invert: bool,
}

impl SelectorRecord {
    /// Creates an atomic record from a classified predicate.
    pub fn atomic(name: impl Into<String>, predicate: &Predicate) -> Self {
        Self {
            kind: predicate.selector_kind(),
            name: name.into(),
            values: predicate.value.clone(),
            invert: predicate.invert,
        }
    }

    /// Creates an aggregate record over the given operand names.
    pub fn aggregate<S: AsRef<str>>(op: BoolOp, name: impl Into<String>, operands: &[S]) -> Self {
        Self {
            kind: op.into(),
            name: name.into(),
            values: operands
                .iter()
                .map(|s| s.as_ref())
                .collect::<Vec<_>>()
                .join(","),
            invert: false,
        }
    }

    /// Names this record refers to; empty for atomic records.
    pub fn references(&self) -> Vec<&str> {
        if self.kind.is_aggregate() {
            self.values.split(',').filter(|s| !s.is_empty()).collect()
        } else {
            Vec::new()
        }
    }

    /// Returns the record as a `(kind, name, values, invert)` tuple.
    pub fn into_tuple(self) -> (SelectorKind, String, String, bool) {
        (self.kind, self.name, self.values, self.invert)
    }
}

impl fmt::Display for SelectorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, \"{}\", {})",
            self.kind, self.name, self.values, self.invert
        )
    }
}
