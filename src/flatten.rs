// SPDX-FileCopyrightText: The mut-pathtree authors
// SPDX-License-Identifier: MPL-2.0

//! Bulk loading of nested JSON objects.

use serde_json::{Map, Value};

use crate::{PathTree, PathTreeTypes};

/// A single value of a nested object together with its path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenedEntry {
    pub keys: Vec<String>,
    pub value: Value,
}

/// Flatten a nested object into a sequence of entries.
///
/// Entries are emitted depth-first in object order. Only non-empty objects
/// are descended into. All other values including arrays and empty objects
/// become entries.
#[must_use]
pub fn flatten_object(object: &Map<String, Value>) -> Vec<FlattenedEntry> {
    let mut entries = Vec::new();
    let mut keys = Vec::new();
    flatten_object_into(object, &mut keys, &mut entries);
    entries
}

fn flatten_object_into(
    object: &Map<String, Value>,
    keys: &mut Vec<String>,
    entries: &mut Vec<FlattenedEntry>,
) {
    for (key, value) in object {
        keys.push(key.clone());
        match value {
            Value::Object(nested) if !nested.is_empty() => {
                flatten_object_into(nested, keys, entries);
            }
            value => entries.push(FlattenedEntry {
                keys: keys.clone(),
                value: value.clone(),
            }),
        }
        keys.pop();
    }
}

/// Types for trees that are loaded from JSON.
#[derive(Debug, Clone, Default)]
pub struct JsonPathTreeTypes;

impl PathTreeTypes for JsonPathTreeTypes {
    type Value = Value;
    type PathSegment = String;
    type PathSegmentRef = str;
}

impl PathTree<JsonPathTreeTypes> {
    /// Create a tree from a nested JSON object.
    ///
    /// Any value other than an object results in an empty tree.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        let Value::Object(object) = value else {
            log::debug!("Creating empty tree from non-object value {value}");
            return Self::new();
        };
        Self::from_json_object(object)
    }

    #[must_use]
    pub fn from_json_object(object: &Map<String, Value>) -> Self {
        flatten_object(object)
            .into_iter()
            .map(|FlattenedEntry { keys, value }| (keys, value))
            .collect()
    }
}
