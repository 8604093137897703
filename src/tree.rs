// SPDX-FileCopyrightText: The mut-pathtree authors
// SPDX-License-Identifier: MPL-2.0

use std::{borrow::Borrow, fmt};

use thiserror::Error;

use crate::{
    HalfEdgeRef, HashMap, Node, NodeId, PathSegment, PathSegmentRef, SegmentedPath, Visit,
    VisitResult,
};

/// Type system for [`PathTree`].
pub trait PathTreeTypes: Clone + Default + fmt::Debug {
    type Value: Clone + fmt::Debug;
    type PathSegment: PathSegment + Borrow<Self::PathSegmentRef>;
    type PathSegmentRef: PathSegmentRef<Self::PathSegment> + ?Sized + 'static;
}

/// No node exists at the requested path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no node found at path {path:?}")]
pub struct NodeNotFoundError<S: fmt::Debug> {
    pub path: Vec<S>,
}

/// Mutable, path-addressable tree.
///
/// Nodes are created on demand when setting values and are owned by the tree.
/// Parents are referenced by their [`NodeId`] and never own their children
/// directly.
///
/// Not synchronized internally. All mutating operations require exclusive
/// access, i.e. concurrent writers need external synchronization.
///
/// Cloning is cheap when the `im` feature is enabled and creates an
/// independent snapshot.
#[derive(Debug, Clone)]
pub struct PathTree<T>
where
    T: PathTreeTypes,
{
    root_node_id: NodeId,
    nodes: HashMap<NodeId, TreeNode<T>>,
}

impl<T: PathTreeTypes> Default for PathTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PathTreeTypes> PathTree<T> {
    /// Create an empty tree that only consists of the root node.
    #[must_use]
    pub fn new() -> Self {
        let root_node_id = NodeId::new();
        let root_node = TreeNode {
            id: root_node_id,
            parent: None,
            node: Node::new(),
        };
        let mut nodes = HashMap::new();
        nodes.insert(root_node_id, root_node);
        Self {
            root_node_id,
            nodes,
        }
    }

    /// Create a tree by setting all values in order.
    ///
    /// Later entries overwrite the values of earlier entries with the same path.
    #[must_use]
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Vec<T::PathSegment>, T::Value)>,
    {
        let mut tree = Self::new();
        tree.extend(entries);
        tree
    }

    #[must_use]
    pub const fn root_node_id(&self) -> NodeId {
        self.root_node_id
    }

    #[must_use]
    pub fn root_node(&self) -> &TreeNode<T> {
        self.resolve_node(self.root_node_id)
    }

    #[must_use]
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    #[must_use]
    pub fn lookup_node(&self, id: NodeId) -> Option<&TreeNode<T>> {
        self.nodes.get(&id)
    }

    /// Resolve an existing node by its id.
    ///
    /// Only used internally for node ids that must exist. If the node does not exist
    /// the tree is probably in an inconsistent state!
    ///
    /// # Panics
    ///
    /// Panics if the node does not exist.
    #[must_use]
    fn resolve_node(&self, id: NodeId) -> &TreeNode<T> {
        self.nodes.get(&id).expect("node exists")
    }

    /// Mutable counterpart of [`Self::resolve_node()`].
    ///
    /// # Panics
    ///
    /// Panics if the node does not exist.
    #[must_use]
    fn resolve_node_mut(&mut self, id: NodeId) -> &mut TreeNode<T> {
        self.nodes.get_mut(&id).expect("node exists")
    }

    /// Find the node at the given path.
    ///
    /// The empty path resolves to the root node.
    #[must_use]
    pub fn find_node<'a>(
        &self,
        path: impl IntoIterator<Item = &'a T::PathSegmentRef>,
    ) -> Option<&TreeNode<T>> {
        let mut last_visited_node = self.root_node();
        for path_segment in path {
            let child_node_id = last_visited_node.node.child_node_id(path_segment)?;
            last_visited_node = self.resolve_node(child_node_id);
            debug_assert_eq!(
                Some(path_segment),
                last_visited_node
                    .key()
                    .map(Borrow::<T::PathSegmentRef>::borrow)
            );
        }
        Some(last_visited_node)
    }

    #[must_use]
    pub fn find_node_id<'a>(
        &self,
        path: impl IntoIterator<Item = &'a T::PathSegmentRef>,
    ) -> Option<NodeId> {
        self.find_node(path).map(|node| node.id)
    }

    /// Set the value of the node at the given path.
    ///
    /// All missing nodes along the path are created without a value. An existing
    /// value is overwritten unconditionally and returned.
    ///
    /// Setting a value for the empty path has no effect.
    #[allow(clippy::missing_panics_doc)] // Never panics
    pub fn set<'a>(
        &mut self,
        path: impl IntoIterator<Item = &'a T::PathSegmentRef>,
        value: T::Value,
    ) -> Option<T::Value> {
        let mut node_id = self.root_node_id;
        for path_segment in path {
            let parent_node = &self.resolve_node(node_id).node;
            if let Some(child_node_id) = parent_node.child_node_id(path_segment) {
                node_id = child_node_id;
                continue;
            }
            let parent_node_id = node_id;
            let child_node_id = NodeId::new();
            debug_assert_ne!(parent_node_id, child_node_id);
            let child_node = TreeNode {
                id: child_node_id,
                parent: Some(TreeNodeParent {
                    id: parent_node_id,
                    path_segment: path_segment.to_owned(),
                }),
                node: Node::new(),
            };
            log::debug!(
                "Inserting new child node {child_node:?} for path segment {path_segment:?}"
            );
            let old_child_node = self.nodes.insert(child_node_id, child_node);
            debug_assert!(old_child_node.is_none());
            let old_child_node_id = self
                .resolve_node_mut(parent_node_id)
                .node
                .children
                .insert(path_segment.to_owned(), child_node_id);
            debug_assert!(old_child_node_id.is_none());
            node_id = child_node_id;
        }
        if node_id == self.root_node_id {
            log::debug!("Ignoring value {value:?} for the empty path");
            return None;
        }
        self.resolve_node_mut(node_id).node.value.replace(value)
    }

    /// Set the value of the node at the given path.
    ///
    /// See also: [`Self::set()`]
    pub fn set_path<P>(&mut self, path: &P, value: T::Value) -> Option<T::Value>
    where
        P: SegmentedPath<T::PathSegment, T::PathSegmentRef>,
    {
        self.set(path.segments(), value)
    }

    /// The value of the node at the given path.
    ///
    /// Returns `None` if either the node does not exist or if it has no value.
    #[must_use]
    pub fn get<'a>(
        &self,
        path: impl IntoIterator<Item = &'a T::PathSegmentRef>,
    ) -> Option<&T::Value> {
        self.find_node(path).and_then(|node| node.node.value())
    }

    /// See also: [`Self::get()`]
    #[must_use]
    pub fn get_path<P>(&self, path: &P) -> Option<&T::Value>
    where
        P: SegmentedPath<T::PathSegment, T::PathSegmentRef>,
    {
        self.get(path.segments())
    }

    /// Mutable access to the value of the node at the given path.
    #[must_use]
    pub fn get_mut<'a>(
        &mut self,
        path: impl IntoIterator<Item = &'a T::PathSegmentRef>,
    ) -> Option<&mut T::Value> {
        let node_id = self.find_node_id(path)?;
        self.resolve_node_mut(node_id).node.value.as_mut()
    }

    /// Check if a node exists at the given path, no matter if it holds a value.
    ///
    /// The root node at the empty path always exists.
    #[must_use]
    pub fn has<'a>(&self, path: impl IntoIterator<Item = &'a T::PathSegmentRef>) -> bool {
        self.find_node(path).is_some()
    }

    /// See also: [`Self::has()`]
    #[must_use]
    pub fn has_path<P>(&self, path: &P) -> bool
    where
        P: SegmentedPath<T::PathSegment, T::PathSegmentRef>,
    {
        self.has(path.segments())
    }

    /// Visit all descendants of the node at the given path.
    ///
    /// The empty path visits the whole tree. Nodes are visited depth-first
    /// in pre-order and siblings in insertion order.
    ///
    /// If the visitor requests a break the remaining siblings of the current
    /// node and its own descendants are skipped. The traversal of enclosing
    /// levels continues.
    ///
    /// # Errors
    ///
    /// Returns [`NodeNotFoundError`] if no node exists at the given path.
    pub fn each<'a, F, R>(
        &self,
        path: impl IntoIterator<Item = &'a T::PathSegmentRef>,
        mut visitor: F,
    ) -> Result<(), NodeNotFoundError<T::PathSegment>>
    where
        F: FnMut(Visit<'_, T>) -> R,
        R: VisitResult,
    {
        let mut path = path
            .into_iter()
            .map(|path_segment| path_segment.to_owned())
            .collect::<Vec<_>>();
        let Some(node) = self.find_node(path.iter().map(Borrow::<T::PathSegmentRef>::borrow))
        else {
            return Err(NodeNotFoundError { path });
        };
        self.visit_children(&node.node, &mut path, &mut visitor);
        Ok(())
    }

    /// See also: [`Self::each()`]
    ///
    /// # Errors
    ///
    /// Returns [`NodeNotFoundError`] if no node exists at the given path.
    pub fn each_path<P, F, R>(
        &self,
        path: &P,
        visitor: F,
    ) -> Result<(), NodeNotFoundError<T::PathSegment>>
    where
        P: SegmentedPath<T::PathSegment, T::PathSegmentRef>,
        F: FnMut(Visit<'_, T>) -> R,
        R: VisitResult,
    {
        self.each(path.segments(), visitor)
    }

    /// Pre-order traversal without recursion.
    ///
    /// Each stack frame holds the remaining children of a level and the
    /// length of the path up to their parent.
    fn visit_children<F, R>(
        &self,
        parent_node: &Node<T>,
        path: &mut Vec<T::PathSegment>,
        visitor: &mut F,
    ) where
        F: FnMut(Visit<'_, T>) -> R,
        R: VisitResult,
    {
        let parent_path_len = path.len();
        let mut stack = vec![(parent_node.children(), parent_path_len)];
        while let Some((children, path_len)) = stack.last_mut() {
            let path_len = *path_len;
            let Some(HalfEdgeRef {
                node_id,
                path_segment,
            }) = children.next()
            else {
                stack.pop();
                continue;
            };
            let child_node = &self.resolve_node(node_id).node;
            path.truncate(path_len);
            path.push(path_segment.clone());
            let visit = Visit {
                node_id,
                key: path_segment,
                value: child_node.value(),
                path: path.as_slice(),
                is_leaf: child_node.is_leaf(),
            };
            if visitor(visit).is_break() {
                log::debug!("Traversal stopped at {path:?}");
                stack.pop();
                continue;
            }
            if !child_node.is_leaf() {
                stack.push((child_node.children(), path_len + 1));
            }
        }
        path.truncate(parent_path_len);
    }

    /// Remove the value of the node at the given path.
    ///
    /// A node without children is removed from the tree. A node with children
    /// is kept and only its value is removed. Ancestors are never removed, even
    /// if they become empty.
    ///
    /// Returns the removed value, if any. Removing the empty path has no effect.
    pub fn remove<'a>(
        &mut self,
        path: impl IntoIterator<Item = &'a T::PathSegmentRef>,
    ) -> Option<T::Value> {
        let node_id = self.find_node_id(path)?;
        if node_id == self.root_node_id {
            log::debug!("Ignoring removal of the root node");
            return None;
        }
        self.remove_value_or_prune_node(node_id)
    }

    /// See also: [`Self::remove()`]
    pub fn remove_path<P>(&mut self, path: &P) -> Option<T::Value>
    where
        P: SegmentedPath<T::PathSegment, T::PathSegmentRef>,
    {
        self.remove(path.segments())
    }

    /// Like [`Self::remove()`], but also prunes all ancestors that have
    /// become empty, i.e. have neither children nor a value.
    ///
    /// The root node is never removed.
    pub fn remove_cascading<'a>(
        &mut self,
        path: impl IntoIterator<Item = &'a T::PathSegmentRef>,
    ) -> Option<T::Value> {
        let node_id = self.find_node_id(path)?;
        if node_id == self.root_node_id {
            log::debug!("Ignoring removal of the root node");
            return None;
        }
        let parent_node_id = self
            .resolve_node(node_id)
            .parent
            .as_ref()
            .map(|parent| parent.id);
        let removed_value = self.remove_value_or_prune_node(node_id);
        if self.contains_node(node_id) {
            // The node still has children
            return removed_value;
        }
        let mut next_node_id = parent_node_id;
        while let Some(node_id) = next_node_id {
            if node_id == self.root_node_id {
                break;
            }
            let tree_node = self.resolve_node(node_id);
            if !tree_node.node.is_leaf() || tree_node.node.value().is_some() {
                break;
            }
            next_node_id = tree_node.parent.as_ref().map(|parent| parent.id);
            self.prune_leaf_node(node_id);
        }
        removed_value
    }

    fn remove_value_or_prune_node(&mut self, node_id: NodeId) -> Option<T::Value> {
        let tree_node = self.resolve_node_mut(node_id);
        if tree_node.node.is_leaf() {
            return self.prune_leaf_node(node_id).node.value;
        }
        log::debug!("Removing value of inner node {node_id}");
        tree_node.node.value.take()
    }

    /// Detach a non-root node without children from its parent.
    fn prune_leaf_node(&mut self, node_id: NodeId) -> TreeNode<T> {
        debug_assert_ne!(node_id, self.root_node_id);
        let tree_node = self.nodes.remove(&node_id).expect("node exists");
        debug_assert!(tree_node.node.is_leaf());
        let parent = tree_node.parent.as_ref().expect("has parent");
        let removed_child_node_id = self
            .resolve_node_mut(parent.id)
            .node
            .children
            .shift_remove(&parent.path_segment);
        debug_assert_eq!(Some(node_id), removed_child_node_id);
        log::debug!("Pruned leaf node {tree_node:?}");
        tree_node
    }

    /// Remove a node and all its descendants from the tree.
    ///
    /// The root node cannot be removed.
    ///
    /// Returns the number of removed nodes.
    #[allow(clippy::missing_panics_doc)] // Never panics
    pub fn remove_subtree<'a>(
        &mut self,
        path: impl IntoIterator<Item = &'a T::PathSegmentRef>,
    ) -> Option<usize> {
        let node = self.find_node(path)?;
        let parent = node.parent.clone()?;
        let removed_node_ids = std::iter::once(node.id)
            .chain(
                node.node
                    .descendants(self)
                    .map(|HalfEdgeRef { node_id, .. }| node_id),
            )
            .collect::<Vec<_>>();
        let removed_child_node_id = self
            .resolve_node_mut(parent.id)
            .node
            .children
            .shift_remove(&parent.path_segment);
        debug_assert_eq!(removed_node_ids.first().copied(), removed_child_node_id);
        for node_id in &removed_node_ids {
            let removed_node = self.nodes.remove(node_id);
            debug_assert!(removed_node.is_some());
        }
        log::debug!(
            "Removed subtree at {path_segment:?} with {count} node(s)",
            path_segment = parent.path_segment,
            count = removed_node_ids.len()
        );
        Some(removed_node_ids.len())
    }

    /// Remove all nodes except the root node.
    ///
    /// Ids of removed nodes become invalid and will never be reused.
    pub fn clear(&mut self) {
        log::debug!("Clearing {count} node(s)", count = self.count());
        let root_node = TreeNode {
            id: self.root_node_id,
            parent: None,
            node: Node::new(),
        };
        self.nodes = HashMap::new();
        self.nodes.insert(self.root_node_id, root_node);
    }

    /// Release all nodes.
    ///
    /// Consumes the tree, i.e. no further operations are possible.
    pub fn destroy(self) {
        log::debug!(
            "Destroying tree with root node {root_node_id} and {count} node(s)",
            root_node_id = self.root_node_id,
            count = self.count()
        );
    }

    /// All nodes in no particular order, including the root node.
    pub fn nodes(&self) -> impl Iterator<Item = &TreeNode<T>> {
        self.nodes.values()
    }

    /// Number of nodes in the tree, excluding the root node.
    ///
    /// Nodes are counted no matter if they hold a value.
    #[must_use]
    pub fn count(&self) -> usize {
        let count = self.nodes.len() - 1;
        // Verify invariants
        debug_assert_eq!(count, self.root_node().node.count_descendants(self));
        count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// All ancestors of the given node up to and including the root node.
    ///
    /// Returns `None` if the given node is not found.
    #[must_use]
    pub fn ancestor_nodes(
        &self,
        node_id: NodeId,
    ) -> Option<impl Iterator<Item = &TreeNode<T>> + '_> {
        let mut next_node = self.lookup_node(node_id)?;
        Some(std::iter::from_fn(move || {
            let parent_node = next_node
                .parent
                .as_ref()
                .map(|parent| self.resolve_node(parent.id))?;
            next_node = parent_node;
            Some(parent_node)
        }))
    }

    /// The full path of the given node, starting at the root.
    ///
    /// Returns `None` if the given node is not found.
    #[must_use]
    pub fn node_path(&self, node_id: NodeId) -> Option<Vec<T::PathSegment>> {
        let node = self.lookup_node(node_id)?;
        let mut path = std::iter::once(node)
            .chain(self.ancestor_nodes(node_id)?)
            .filter_map(|node| node.parent.as_ref())
            .map(|parent| parent.path_segment.clone())
            .collect::<Vec<_>>();
        path.reverse();
        Some(path)
    }
}

impl<T: PathTreeTypes> Extend<(Vec<T::PathSegment>, T::Value)> for PathTree<T> {
    fn extend<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (Vec<T::PathSegment>, T::Value)>,
    {
        for (path, value) in entries {
            self.set(path.iter().map(Borrow::<T::PathSegmentRef>::borrow), value);
        }
    }
}

impl<T: PathTreeTypes> FromIterator<(Vec<T::PathSegment>, T::Value)> for PathTree<T> {
    fn from_iter<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Vec<T::PathSegment>, T::Value)>,
    {
        Self::from_entries(entries)
    }
}

/// Link of non-root node in the tree.
#[derive(Debug, Clone)]
pub struct TreeNodeParent<T: PathTreeTypes> {
    /// The id of the parent node.
    pub id: NodeId,

    /// Path segment for addressing the child from the parent.
    pub path_segment: T::PathSegment,
}

/// Node in the tree.
#[derive(Debug, Clone)]
pub struct TreeNode<T: PathTreeTypes> {
    /// Identifier for direct lookup.
    pub id: NodeId,

    /// Link to the parent node.
    ///
    /// Must be `None` for the root node and `Some` for all other nodes.
    pub parent: Option<TreeNodeParent<T>>,

    /// The actual content of this node.
    pub node: Node<T>,
}

impl<T: PathTreeTypes> TreeNode<T> {
    /// The path segment of this node within its parent.
    ///
    /// `None` for the root node.
    #[must_use]
    pub fn key(&self) -> Option<&T::PathSegment> {
        self.parent.as_ref().map(|parent| &parent.path_segment)
    }
}
