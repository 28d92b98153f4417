//! Flattening of an indexed predicate tree into selector records.

use crate::ast::{Predicate, SelectorRecord};
use crate::index::IndexedNode;

/// Flattens an indexed tree into records, operands before their group.
///
/// Every leaf becomes one atomic record. Every group becomes exactly one
/// `And`/`Or` record listing the names of all its operands in source order,
/// so `a and b and c` yields a single `And` over three names.
pub fn flatten(tree: &IndexedNode<'_, Predicate>) -> Vec<SelectorRecord> {
    let mut records = Vec::new();
    flatten_into(tree, &mut records);
    records
}

fn flatten_into(node: &IndexedNode<'_, Predicate>, records: &mut Vec<SelectorRecord>) {
    match node {
        IndexedNode::Leaf { name, value } => {
            records.push(SelectorRecord::atomic(name.as_str(), value));
        }
        IndexedNode::Group { name, op, operands } => {
            for operand in operands {
                flatten_into(operand, records);
            }
            let operand_names: Vec<&str> = operands.iter().map(IndexedNode::name).collect();
            records.push(SelectorRecord::aggregate(*op, name.as_str(), &operand_names));
        }
    }
}
