// Fanout - Matrix expansion for YAML configuration
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Top-level document structure.

use crate::{Entry, ExpandError, Node, Scalar};

/// A decoded document: the ordered top-level entries of a mapping.
///
/// Top-level keys may repeat. After expansion every variant of a task shows
/// up as its own entry under the original key.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    /// Top-level entries in document order.
    pub entries: Vec<Entry>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from its top-level entries.
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    /// Append a top-level entry.
    pub fn push(&mut self, key: impl Into<Scalar>, value: impl Into<Node>) {
        self.entries.push(Entry::new(key, value));
    }

    /// Number of top-level entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the document has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the top-level entries.
    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// First top-level value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries
            .iter()
            .find(|entry| entry.has_key(key))
            .map(|entry| &entry.value)
    }

    /// Every top-level value stored under `key`, in order.
    pub fn get_all<'a, 'k>(&'a self, key: &'k str) -> impl Iterator<Item = &'a Node> + 'k
    where
        'a: 'k,
    {
        self.entries
            .iter()
            .filter(move |entry| entry.has_key(key))
            .map(|entry| &entry.value)
    }

    /// Convert into a mapping node.
    pub fn into_node(self) -> Node {
        Node::Map(self.entries)
    }
}

impl TryFrom<Node> for Document {
    type Error = ExpandError;

    fn try_from(node: Node) -> Result<Self, Self::Error> {
        match node {
            Node::Map(entries) => Ok(Self { entries }),
            other => Err(ExpandError::NeedMap {
                found: other.kind().to_string(),
            }),
        }
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for Document {
    type Item = Entry;
    type IntoIter = std::vec::IntoIter<Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_from_mapping() {
        let node = Node::Map(vec![Entry::new("a", 1i64)]);
        let doc = Document::try_from(node).unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.get("a"), Some(&Node::from(1i64)));
    }

    #[test]
    fn test_lookup_outlives_key() {
        let mut doc = Document::new();
        doc.push("task", 1i64);
        doc.push("task", 2i64);

        let first = {
            let key = String::from("task");
            doc.get(&key)
        };
        assert_eq!(first, Some(&Node::from(1i64)));

        let all: Vec<&Node> = doc.get_all("task").collect();
        assert_eq!(all, vec![&Node::from(1i64), &Node::from(2i64)]);
    }

    #[test]
    fn test_try_from_sequence_needs_map() {
        let err = Document::try_from(Node::Seq(vec![Node::from("a")])).unwrap_err();
        assert_eq!(
            err,
            ExpandError::NeedMap {
                found: "sequence".to_string()
            }
        );
    }

    #[test]
    fn test_try_from_scalar_needs_map() {
        let err = Document::try_from(Node::from("text")).unwrap_err();
        assert!(matches!(err, ExpandError::NeedMap { found } if found == "string"));
    }

    #[test]
    fn test_duplicate_top_level_keys() {
        let mut doc = Document::new();
        doc.push("task", "first");
        doc.push("other", "x");
        doc.push("task", "second");

        let tasks: Vec<_> = doc.get_all("task").collect();
        assert_eq!(tasks, vec![&Node::from("first"), &Node::from("second")]);
        assert_eq!(doc.get("task"), Some(&Node::from("first")));
    }

    #[test]
    fn test_into_node_round_trip() {
        let mut doc = Document::new();
        doc.push("k", true);
        let node = doc.clone().into_node();
        assert_eq!(Document::try_from(node).unwrap(), doc);
    }
}
