// SPDX-FileCopyrightText: The mut-pathtree authors
// SPDX-License-Identifier: MPL-2.0

use indexmap::IndexMap;

use crate::{HalfEdgeRef, NodeId, PathTree, PathTreeTypes};

/// Intrinsic data of a node.
///
/// The value is independent of the children, i.e. an inner node may
/// carry a value and a leaf node may have none.
#[derive(Debug, Clone)]
pub struct Node<T>
where
    T: PathTreeTypes,
{
    /// Children in insertion order.
    pub(crate) children: IndexMap<T::PathSegment, NodeId>,
    pub(crate) value: Option<T::Value>,
}

impl<T> Default for Node<T>
where
    T: PathTreeTypes,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Node<T>
where
    T: PathTreeTypes,
{
    /// Construct an empty node with neither children nor a value
    #[must_use]
    pub fn new() -> Self {
        Self {
            children: IndexMap::new(),
            value: None,
        }
    }

    #[must_use]
    pub const fn value(&self) -> Option<&T::Value> {
        self.value.as_ref()
    }

    /// A node without children, no matter if it holds a value.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    #[must_use]
    pub fn child_node_id(&self, path_segment: &T::PathSegmentRef) -> Option<NodeId> {
        self.children.get(path_segment).copied()
    }

    /// Returns an iterator over all children of this node
    ///
    /// Only includes direct children in insertion order, not grandchildren
    /// or other descendants.
    pub fn children(&self) -> impl Iterator<Item = HalfEdgeRef<'_, T>> + '_ {
        self.children
            .iter()
            .map(|(path_segment, node_id)| HalfEdgeRef {
                node_id: *node_id,
                path_segment,
            })
    }

    /// Returns an iterator over all descendants of this node
    ///
    /// Traverses the subtree in depth-first, pre-order. The pending children
    /// of each level are kept on an explicit stack, i.e. the depth of the
    /// subtree is not limited by the call stack.
    pub fn descendants<'a>(
        &'a self,
        tree: &'a PathTree<T>,
    ) -> impl Iterator<Item = HalfEdgeRef<'a, T>> + 'a {
        let mut stack = vec![self.children()];
        std::iter::from_fn(move || loop {
            let children = stack.last_mut()?;
            let Some(half_edge_to_child) = children.next() else {
                stack.pop();
                continue;
            };
            if let Some(child_node) = tree.lookup_node(half_edge_to_child.node_id) {
                stack.push(child_node.node.children());
            }
            return Some(half_edge_to_child);
        })
    }

    #[must_use]
    pub fn count_descendants(&self, tree: &PathTree<T>) -> usize {
        self.descendants(tree).count()
    }
}
