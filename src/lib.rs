// SPDX-FileCopyrightText: The mut-pathtree authors
// SPDX-License-Identifier: MPL-2.0

//! Mutable, path-addressable tree data structure.
//!
//! Values are addressed by a sequence of path segments. Missing nodes are
//! created on demand and every node may hold a value, no matter if it has
//! children or not.
//!
//! ```
//! use std::ops::ControlFlow;
//!
//! use mut_pathtree::{PathTree, PathTreeTypes, SeparatedPath};
//!
//! #[derive(Debug, Clone, Default)]
//! struct Types;
//!
//! impl PathTreeTypes for Types {
//!     type Value = u32;
//!     type PathSegment = String;
//!     type PathSegmentRef = str;
//! }
//!
//! let mut tree = PathTree::<Types>::new();
//! tree.set(["path", "to"], 123);
//! tree.set_path(&SeparatedPath::new("path/to/leaf"), 456);
//!
//! assert_eq!(Some(&123), tree.get(["path", "to"]));
//! assert_eq!(Some(&456), tree.get_path(&SeparatedPath::new("/path/to/leaf")));
//! assert_eq!(None, tree.get(["path"]));
//! assert!(tree.has(["path"]));
//! assert_eq!(3, tree.count());
//!
//! let mut visited = Vec::new();
//! tree.each(["path"], |visit| {
//!     visited.push(visit.path.join("/"));
//!     ControlFlow::<()>::Continue(())
//! })
//! .unwrap();
//! assert_eq!(vec!["path/to", "path/to/leaf"], visited);
//! ```

// Repetitions of module/type names occur frequently when using many
// modules for keeping the size of the source files handy. Often
// types have the same name as their parent module.
#![allow(clippy::module_name_repetitions)]

mod edge;
pub use self::edge::HalfEdgeRef;

#[cfg(feature = "json")]
mod flatten;
#[cfg(feature = "json")]
pub use self::flatten::{flatten_object, FlattenedEntry, JsonPathTreeTypes};

mod node;
pub use self::node::Node;

mod node_id;
pub use self::node_id::NodeId;

mod path;
pub use self::path::{PathSegment, PathSegmentRef, SegmentedPath, SeparatedPath};

mod tree;
pub use self::tree::{NodeNotFoundError, PathTree, PathTreeTypes, TreeNode, TreeNodeParent};

mod visit;
pub use self::visit::{Visit, VisitResult};

#[cfg(feature = "im")]
type HashMap<K, V> = im::HashMap<K, V>;

#[cfg(not(feature = "im"))]
type HashMap<K, V> = std::collections::HashMap<K, V>;
