//! Positional names for tree nodes.
//!
//! A node's key is the concatenation of its offsets in every enclosing
//! sequence, starting from the outer wrapping group where the whole
//! expression sits at offset 0. Operands of a boolean group occupy the even
//! offsets 0, 2, 4, … because the operator tokens sit between them. The name
//! is the key followed by `0`, the offset of the node's first token.
//!
//! ```text
//! chain A and resn ALA or chain B
//!
//! Or  "00"
//! ├── And "000"
//! │   ├── chain A  "0000"
//! │   └── resn ALA "0020"
//! └── chain B "020"
//! ```

use crate::ast::{BoolOp, SelectionNode};

/// A tree node annotated with its positional name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexedNode<'a, T> {
    /// An atomic term.
    Leaf {
        /// Positional name.
        name: String,
        /// The leaf payload of the source tree.
        value: &'a T,
    },

    /// A boolean group.
    Group {
        /// Positional name.
        name: String,
        /// Operator shared by the operands.
        op: BoolOp,
        /// Operands in source order.
        operands: Vec<IndexedNode<'a, T>>,
    },
}

impl<'a, T> IndexedNode<'a, T> {
    /// The positional name of this node.
    pub fn name(&self) -> &str {
        match self {
            IndexedNode::Leaf { name, .. } | IndexedNode::Group { name, .. } => name,
        }
    }
}

/// Assigns a positional name to every leaf and group of `tree`.
///
/// A pure function of the tree shape: the same position always gets the same
/// name.
pub fn assign_positions<T>(tree: &SelectionNode<T>) -> IndexedNode<'_, T> {
    let mut offsets = vec![0];
    walk(tree, &mut offsets)
}

fn walk<'a, T>(node: &'a SelectionNode<T>, offsets: &mut Vec<usize>) -> IndexedNode<'a, T> {
    let name = position_name(offsets);
    match node {
        SelectionNode::Leaf(value) => IndexedNode::Leaf { name, value },
        SelectionNode::Group { op, operands } => {
            let mut indexed = Vec::with_capacity(operands.len());
            for (i, operand) in operands.iter().enumerate() {
                offsets.push(i * 2);
                indexed.push(walk(operand, offsets));
                offsets.pop();
            }
            IndexedNode::Group {
                name,
                op: *op,
                operands: indexed,
            }
        }
    }
}

/// Name of the node whose offsets from the root are `offsets`.
pub fn position_name(offsets: &[usize]) -> String {
    let mut name: String = offsets.iter().map(|o| o.to_string()).collect();
    name.push('0');
    name
}
