use std::collections::BTreeMap;

use crate::ast::{ExprKind, ExprTree, Indice};

/// Which side of the name/coordinate mapping a tree is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Keyed by identifier: where does each name live?
    Input,
    /// Keyed by coordinate: which name lives at each position?
    Output,
}

/// Identifier to coordinate, for input-direction trees.
pub type InIndex = BTreeMap<String, Indice>;

/// Coordinate to identifier, for output-direction trees.
pub type OutIndex = BTreeMap<Indice, String>;

/// Map every leaf's identifier to its coordinate. A duplicate identifier
/// silently takes the coordinate of its last occurrence in source order;
/// that is accepted input, not an error.
pub fn extract_in_index(tree: &ExprTree) -> InIndex {
    let mut index = InIndex::new();
    for id in tree.leaves() {
        if let ExprKind::Leaf { identifier, .. } = &tree.node(id).kind {
            index.insert(identifier.clone(), tree.indice(id));
        }
    }
    index
}

/// Map every leaf's coordinate to its identifier. Coordinates are unique by
/// construction, so no entry is ever overwritten.
pub fn extract_out_index(tree: &ExprTree) -> OutIndex {
    let mut index = OutIndex::new();
    for id in tree.leaves() {
        if let ExprKind::Leaf { identifier, .. } = &tree.node(id).kind {
            index.insert(tree.indice(id), identifier.clone());
        }
    }
    index
}
