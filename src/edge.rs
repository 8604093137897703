// SPDX-FileCopyrightText: The mut-pathtree authors
// SPDX-License-Identifier: MPL-2.0

use crate::{NodeId, PathTreeTypes};

/// Half-edge from a parent to one of its children.
///
/// Borrows the path segment that is owned by the parent's child map.
#[derive(Debug)]
pub struct HalfEdgeRef<'a, T: PathTreeTypes> {
    /// The id of the target node.
    pub node_id: NodeId,

    /// Path segment from the (implicit) source to the target node.
    pub path_segment: &'a T::PathSegment,
}

// Manual impls: deriving would require `T: Clone + Copy`.
impl<T: PathTreeTypes> Clone for HalfEdgeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: PathTreeTypes> Copy for HalfEdgeRef<'_, T> {}
