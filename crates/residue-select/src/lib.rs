//! # residue-select
//!
//! Parser and resolver for boolean residue-selection expressions.
//!
//! A selection such as `chain A and resn ALA or chain B and not resi 10-20`
//! is compiled into a flat, ordered list of named selector records that a
//! protocol generator can declare one by one. Aggregate records refer to
//! their operands by positional name, and every name is defined before it
//! is referenced.
//!
//! ## Usage
//!
//! ```rust
//! use residue_select::{resolve, SelectorKind};
//!
//! let records = resolve("chain A and resn ALA or chain B and resn GLY").unwrap();
//!
//! let kinds: Vec<SelectorKind> = records.iter().map(|r| r.kind).collect();
//! assert_eq!(
//!     kinds,
//!     vec![
//!         SelectorKind::Chain,
//!         SelectorKind::ResidueName,
//!         SelectorKind::And,
//!         SelectorKind::Chain,
//!         SelectorKind::ResidueName,
//!         SelectorKind::And,
//!         SelectorKind::Or,
//!     ]
//! );
//! assert_eq!(records.last().unwrap().values, "000,020");
//! ```
//!
//! ## Selection Syntax Quick Reference
//!
//! | Syntax | Meaning | Record |
//! |--------|---------|--------|
//! | `chain A` | Chain identifier | `Chain` |
//! | `resi 42` | Residue number | `Index` |
//! | `resi 10-20`, `resi 10 - 20` | Residue number range | `Index` (`10-20`) |
//! | `resn ALA` | Residue name | `ResidueName` |
//! | `not <predicate>` | Negated predicate | `invert = true` |
//! | `a and b` | Intersection | `And` |
//! | `a or b` | Union | `Or` |
//! | `( ... )` | Grouping | |
//!
//! `and` binds tighter than `or`; both are case-insensitive.
//!
//! ## Pipeline
//!
//! ```text
//! raw string ── normalize ── parse ── classify_tree ── assign_positions ── flatten ── reorder
//!                 "(..)"     ParseTree  PredicateTree    IndexedNode       records    ordered
//! ```
//!
//! Each phase is a pure function and is exported for use on its own.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod ast;
mod classify;
mod config;
mod error;
mod flatten;
mod index;
mod normalize;
mod parser;
mod reorder;
mod resolve;

pub use ast::{
    BoolOp, ParseTree, Predicate, PredicateKind, PredicateTree, SelectionNode, SelectorKind,
    SelectorRecord,
};
pub use classify::{classify, classify_tree};
pub use config::{ResolverConfig, ResolverConfigBuilder, DEFAULT_MAX_DEPTH};
pub use error::{SelectionError, SelectionResult};
pub use flatten::flatten;
pub use index::{assign_positions, position_name, IndexedNode};
pub use normalize::normalize;
pub use parser::{parse, parse_form, parse_with, parse_with_fallback, TermForm};
pub use reorder::{compare_names, reorder, verify_references};
pub use resolve::{resolve, resolve_with, root_names, ResidueSelection};
