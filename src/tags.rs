use std::collections::BTreeMap;

use crate::ast::{ExprKind, ExprTree, Indice};
use crate::index::OutIndex;

/// Per-tag membership over every coordinate of the out-index: true where the
/// leaf at that coordinate carries the tag, false everywhere else.
pub type TagPresenceMap = BTreeMap<Indice, bool>;

/// Collect, per tag, the coordinates whose leaves carry it, then expand each
/// tag into a presence map covering the whole out-index. A literal without
/// tags yields an empty result.
pub fn aggregate_tags(
    tree: &ExprTree,
    out_index: &OutIndex,
) -> BTreeMap<String, TagPresenceMap> {
    let mut tagged: BTreeMap<String, Vec<Indice>> = BTreeMap::new();
    for id in tree.leaves() {
        if let ExprKind::Leaf { tag: Some(tag), .. } = &tree.node(id).kind {
            tagged.entry(tag.clone()).or_default().push(tree.indice(id));
        }
    }

    let mut result = BTreeMap::new();
    for (tag, indices) in tagged {
        let presence: TagPresenceMap = out_index
            .keys()
            .map(|indice| (indice.clone(), indices.contains(indice)))
            .collect();
        result.insert(tag, presence);
    }
    result
}
