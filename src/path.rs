// SPDX-FileCopyrightText: The mut-pathtree authors
// SPDX-License-Identifier: MPL-2.0

use std::{borrow::Cow, fmt, hash::Hash};

/// Owned path segment, i.e. the key of a node within its parent.
pub trait PathSegment: Clone + Eq + Hash + fmt::Debug {}

impl<T> PathSegment for T where T: Clone + Eq + Hash + fmt::Debug {}

/// Borrowed path segment.
pub trait PathSegmentRef<T>: Eq + Hash + fmt::Debug {
    /// Convert the borrowed segment reference to an owned value.
    // TODO: How to use ToOwned for this purpose? The conflicting implementation
    // for Cow<'a, str> currently prevents this.
    #[must_use]
    fn to_owned(&self) -> T;
}

impl PathSegmentRef<String> for str {
    fn to_owned(&self) -> String {
        String::from(self)
    }
}

impl<'a> PathSegmentRef<Cow<'a, str>> for str {
    fn to_owned(&self) -> Cow<'a, str> {
        Cow::Owned(String::from(self))
    }
}

/// Decomposition of a path into segments.
///
/// A path without any segments addresses the root node.
pub trait SegmentedPath<S, R: PathSegmentRef<S> + ?Sized>: Clone + Eq + Hash + fmt::Debug {
    /// Iterate over all path segments, starting at the root.
    // TODO: How to avoid boxing the result?
    #[must_use]
    fn segments(&self) -> Box<dyn Iterator<Item = &R> + '_>;

    /// Check if the path addresses the root node.
    #[must_use]
    fn is_root(&self) -> bool {
        self.segments().next().is_none()
    }
}

/// A textual path with segments delimited by a separator character.
///
/// Leading, trailing, and repeated separators are ignored, i.e. the
/// resulting segments are never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeparatedPath<'a> {
    inner: Cow<'a, str>,
    separator: char,
}

impl<'a> SeparatedPath<'a> {
    pub const DEFAULT_SEPARATOR: char = '/';

    /// Create a path delimited by [`Self::DEFAULT_SEPARATOR`].
    #[must_use]
    pub fn new(inner: impl Into<Cow<'a, str>>) -> Self {
        Self::with_separator(inner, Self::DEFAULT_SEPARATOR)
    }

    #[must_use]
    pub fn with_separator(inner: impl Into<Cow<'a, str>>, separator: char) -> Self {
        Self {
            inner: inner.into(),
            separator,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.inner.as_ref()
    }

    #[must_use]
    pub const fn separator(&self) -> char {
        self.separator
    }

    fn split_segments(&self) -> impl Iterator<Item = &str> + '_ {
        self.as_str()
            .split(self.separator)
            .filter(|segment| !segment.is_empty())
    }
}

impl<S> SegmentedPath<S, str> for SeparatedPath<'_>
where
    str: PathSegmentRef<S>,
{
    fn segments(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.split_segments())
    }
}

impl fmt::Display for SeparatedPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
