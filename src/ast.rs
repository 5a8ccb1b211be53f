//! Expression tree produced by the parser.
//!
//! Nodes live in an arena owned by [`ExprTree`]; parent links are plain arena
//! indices rather than ownership edges, so the root-to-leaf coordinate of any
//! node can be reconstructed without reference cycles.

/// A root-first path of positions identifying a node's coordinate.
pub type Indice = Vec<usize>;

/// An index into the tree's node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(pub usize);

/// A leaf (named scalar position) or a bracketed list.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Leaf {
        /// A raw name, the decimal rendering of a number, or a dotted path.
        identifier: String,
        /// Name of the enclosing single-argument call, if any.
        tag: Option<String>,
    },
    List {
        children: Vec<NodeId>,
        /// Child count, or -1 when the source list ended with `...`.
        length: i64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprNode {
    pub kind: ExprKind,
    /// Enclosing list, absent for the root.
    pub parent: Option<NodeId>,
    /// Index within the parent's children, absent for the root.
    pub position: Option<usize>,
}

/// The parsed literal. Immutable once the parser returns it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprTree {
    nodes: Vec<ExprNode>,
    root: NodeId,
}

impl ExprTree {
    pub(crate) fn new() -> Self {
        ExprTree {
            nodes: Vec::new(),
            root: NodeId(0),
        }
    }

    pub(crate) fn push(&mut self, kind: ExprKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(ExprNode {
            kind,
            parent: None,
            position: None,
        });
        id
    }

    pub(crate) fn link(&mut self, child: NodeId, parent: NodeId, position: usize) {
        let node = &mut self.nodes[child.0];
        node.parent = Some(parent);
        node.position = Some(position);
    }

    pub(crate) fn set_tag(&mut self, id: NodeId, name: String) {
        if let ExprKind::Leaf { tag, .. } = &mut self.nodes[id.0].kind {
            *tag = Some(name);
        }
    }

    pub(crate) fn set_root(&mut self, id: NodeId) {
        self.root = id;
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &ExprNode {
        &self.nodes[id.0]
    }

    /// All leaf nodes in source order (the arena is filled left to right,
    /// children before their enclosing list, so leaves come out in the order
    /// they appeared in the literal).
    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| matches!(n.kind, ExprKind::Leaf { .. }))
            .map(|(i, _)| NodeId(i))
    }

    /// The root-first coordinate of `id`: positions collected by walking the
    /// parent chain, then reversed. The root's indice is empty.
    pub fn indice(&self, id: NodeId) -> Indice {
        let mut path = Vec::new();
        let mut cursor = id;
        loop {
            let node = &self.nodes[cursor.0];
            match node.parent {
                Some(parent) => {
                    debug_assert!(node.position.is_some(), "linked node missing position");
                    if let Some(pos) = node.position {
                        path.push(pos);
                    }
                    cursor = parent;
                }
                None => break,
            }
        }
        path.reverse();
        path
    }
}
