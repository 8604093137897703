// SPDX-FileCopyrightText: The mut-pathtree authors
// SPDX-License-Identifier: MPL-2.0

use std::ops::ControlFlow;

use crate::{NodeId, PathTreeTypes};

/// A node as seen by the visitor of [`PathTree::each()`](crate::PathTree::each).
#[derive(Debug)]
pub struct Visit<'a, T: PathTreeTypes> {
    pub node_id: NodeId,

    /// Path segment of the node within its parent.
    pub key: &'a T::PathSegment,

    pub value: Option<&'a T::Value>,

    /// Full path from the root, ending with [`Self::key`].
    pub path: &'a [T::PathSegment],

    /// `true` if the node has no children.
    pub is_leaf: bool,
}

/// Result of a visitor that decides how the traversal continues.
///
/// Only an explicit break request stops the traversal at the current
/// level. The remaining siblings and the subtree of the current node
/// are skipped, while enclosing levels continue.
pub trait VisitResult {
    #[must_use]
    fn is_break(self) -> bool;
}

/// Never breaks.
impl VisitResult for () {
    fn is_break(self) -> bool {
        false
    }
}

/// Breaks on `false`.
impl VisitResult for bool {
    fn is_break(self) -> bool {
        !self
    }
}

impl<B, C> VisitResult for ControlFlow<B, C> {
    fn is_break(self) -> bool {
        ControlFlow::is_break(&self)
    }
}
