// SPDX-FileCopyrightText: The mut-pathtree authors
// SPDX-License-Identifier: MPL-2.0

use std::{
    num::NonZeroUsize,
    sync::atomic::{AtomicUsize, Ordering},
};

static NEXT_NODE_ID_VALUE: AtomicUsize = AtomicUsize::new(1);

/// Ephemeral key of a node in the node arena of a [`PathTree`](crate::PathTree).
///
/// Unique within a single process, even across multiple trees. Ids of
/// removed or cleared nodes are never handed out again, i.e. a stale id
/// never resolves to a different node.
///
/// Must not be stored permanently!
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub struct NodeId(NonZeroUsize);

impl NodeId {
    /// Generate a new, unique identifier.
    ///
    /// Uniqueness is only guaranteed for the first [`usize::MAX`] identifiers.
    ///
    /// ```
    /// # use mut_pathtree::NodeId;
    /// let foo_id = NodeId::new();
    /// let bar_id = NodeId::new();
    /// assert_ne!(foo_id, bar_id);
    /// ```
    #[allow(clippy::new_without_default)] // Prevent unintended generation of new identifiers
    pub fn new() -> Self {
        loop {
            // Relaxed: only uniqueness matters. The counter wraps around
            // on overflow and zero is skipped.
            let value = NEXT_NODE_ID_VALUE.fetch_add(1, Ordering::Relaxed);
            if let Some(value) = NonZeroUsize::new(value) {
                return Self(value);
            }
        }
    }
}
