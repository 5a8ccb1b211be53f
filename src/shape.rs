use crate::ast::{ExprKind, ExprTree, NodeId};
use crate::error::ShapeError;

/// Dimension sizes of the literal, outermost first. A trailing open dimension
/// (a list ending in `...`) is reported as -1.
pub type Shape = Vec<i64>;

/// Compute the literal's shape, rejecting non-rectangular structure.
///
/// A leaf reports the shape accumulated on the path down to it; a list appends
/// its own length and recurses, and every child must report the same shape.
pub fn infer_shape(tree: &ExprTree) -> Result<Shape, ShapeError> {
    shape_at(tree, Vec::new(), tree.root())
}

fn shape_at(tree: &ExprTree, outer: Shape, id: NodeId) -> Result<Shape, ShapeError> {
    match &tree.node(id).kind {
        ExprKind::Leaf { .. } => Ok(outer),
        ExprKind::List { children, length } => {
            let mut inner = outer;
            inner.push(*length);

            // A list holding only an ellipsis marker has no children to
            // report for it, so the extended shape stands on its own.
            let mut result: Option<Shape> = None;
            for child in children {
                let shape = shape_at(tree, inner.clone(), *child)?;
                match &result {
                    None => result = Some(shape),
                    Some(first) if *first == shape => {}
                    Some(first) => {
                        return Err(ShapeError {
                            left: first.clone(),
                            right: shape,
                        })
                    }
                }
            }
            Ok(result.unwrap_or(inner))
        }
    }
}
