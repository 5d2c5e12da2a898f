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

//! Ordered node model for decoded configuration documents.
//!
//! Mappings are kept as a plain sequence of [`Entry`] values rather than a
//! hash or B-tree map: key order is significant and keys may repeat, which is
//! exactly what matrix expansion produces at the top level.
//!
//! The whole tree is owned. Cloning a [`Node`] recurses into every mapping
//! entry, sequence element and scalar, so a clone never shares mutable
//! structure with its source.

use std::fmt;

/// A scalar leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Null value (`~`, `null` or an empty value).
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed integer value.
    Int(i64),
    /// Unsigned integer too large for `i64`.
    UInt(u64),
    /// Floating-point value.
    Float(f64),
    /// String value.
    String(String),
}

impl Scalar {
    /// Returns the string content if this is a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of the scalar type, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) | Self::UInt(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "~"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(n) => write!(f, "{}", n),
            Self::UInt(n) => write!(f, "{}", n),
            Self::Float(x) => write!(f, "{}", x),
            Self::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for Scalar {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

/// A key/value pair of a mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// The mapping key.
    pub key: Scalar,
    /// The value stored under `key`.
    pub value: Node,
}

impl Entry {
    /// Create a new entry.
    pub fn new(key: impl Into<Scalar>, value: impl Into<Node>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Returns `true` if the key is the string `key`.
    pub fn has_key(&self, key: &str) -> bool {
        self.key.as_str() == Some(key)
    }
}

/// Ordered mapping. Keys may repeat.
pub type Mapping = Vec<Entry>;

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Scalar leaf.
    Scalar(Scalar),
    /// Ordered mapping.
    Map(Mapping),
    /// Ordered sequence.
    Seq(Vec<Node>),
}

impl Node {
    /// The null scalar.
    pub fn null() -> Self {
        Self::Scalar(Scalar::Null)
    }

    /// Returns the entries if this node is a mapping.
    pub fn as_map(&self) -> Option<&Mapping> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Short name of the node shape, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Scalar(s) => s.kind(),
            Self::Map(_) => "mapping",
            Self::Seq(_) => "sequence",
        }
    }

    /// Look up the first value stored under a string key.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_map()?
            .iter()
            .find(|entry| entry.has_key(key))
            .map(|entry| &entry.value)
    }

    /// Collection nesting depth. Scalars are 0, a flat mapping or sequence is 1.
    pub fn depth(&self) -> usize {
        match self {
            Self::Scalar(_) => 0,
            Self::Map(entries) => {
                1 + entries.iter().map(|e| e.value.depth()).max().unwrap_or(0)
            }
            Self::Seq(items) => 1 + items.iter().map(Node::depth).max().unwrap_or(0),
        }
    }

    /// Resolve a structural path relative to this node.
    pub fn get_path(&self, path: &[Step]) -> Option<&Node> {
        path.iter().try_fold(self, |node, step| match (node, *step) {
            (Self::Map(entries), Step::Entry(i)) => entries.get(i).map(|e| &e.value),
            (Self::Seq(items), Step::Element(i)) => items.get(i),
            _ => None,
        })
    }

    /// Resolve a structural path relative to this node, mutably.
    pub fn get_path_mut(&mut self, path: &[Step]) -> Option<&mut Node> {
        let mut node = self;
        for step in path {
            node = match (node, *step) {
                (Self::Map(entries), Step::Entry(i)) => &mut entries.get_mut(i)?.value,
                (Self::Seq(items), Step::Element(i)) => items.get_mut(i)?,
                _ => return None,
            };
        }
        Some(node)
    }
}

impl From<Scalar> for Node {
    fn from(s: Scalar) -> Self {
        Self::Scalar(s)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Self::Scalar(s.into())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Self::Scalar(s.into())
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Self::Scalar(b.into())
    }
}

impl From<i64> for Node {
    fn from(n: i64) -> Self {
        Self::Scalar(n.into())
    }
}

impl From<f64> for Node {
    fn from(x: f64) -> Self {
        Self::Scalar(x.into())
    }
}

impl From<Mapping> for Node {
    fn from(entries: Mapping) -> Self {
        Self::Map(entries)
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Self::Seq(items)
    }
}

/// One step of a structural path through the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// The value of the n-th entry of a mapping.
    Entry(usize),
    /// The n-th element of a sequence.
    Element(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::Map(vec![
            Entry::new("name", "build"),
            Entry::new(
                "steps",
                vec![
                    Node::Map(vec![Entry::new("run", "make")]),
                    Node::Map(vec![Entry::new("run", "make test")]),
                ],
            ),
        ])
    }

    #[test]
    fn test_kind() {
        assert_eq!(Node::null().kind(), "null");
        assert_eq!(Node::from(1i64).kind(), "integer");
        assert_eq!(Node::from("x").kind(), "string");
        assert_eq!(sample().kind(), "mapping");
        assert_eq!(Node::Seq(vec![]).kind(), "sequence");
    }

    #[test]
    fn test_get_first_of_duplicate_keys() {
        let node = Node::Map(vec![Entry::new("a", 1i64), Entry::new("a", 2i64)]);
        assert_eq!(node.get("a"), Some(&Node::from(1i64)));
        assert_eq!(node.get("b"), None);
    }

    #[test]
    fn test_depth() {
        assert_eq!(Node::from(true).depth(), 0);
        assert_eq!(Node::Map(vec![]).depth(), 1);
        assert_eq!(sample().depth(), 3);
    }

    #[test]
    fn test_get_path() {
        let node = sample();
        let path = [Step::Entry(1), Step::Element(1), Step::Entry(0)];
        assert_eq!(node.get_path(&path), Some(&Node::from("make test")));
        assert_eq!(node.get_path(&[]), Some(&node));
        assert_eq!(node.get_path(&[Step::Element(0)]), None);
        assert_eq!(node.get_path(&[Step::Entry(5)]), None);
    }

    #[test]
    fn test_get_path_mut_replaces_in_place() {
        let mut node = sample();
        let path = [Step::Entry(1), Step::Element(0)];
        *node.get_path_mut(&path).unwrap() = Node::from("replaced");

        assert_eq!(node.get_path(&path), Some(&Node::from("replaced")));
        assert_eq!(
            node.get_path(&[Step::Entry(1), Step::Element(1), Step::Entry(0)]),
            Some(&Node::from("make test"))
        );
    }

    #[test]
    fn test_clone_shares_no_structure() {
        let original = sample();
        let mut copy = original.clone();

        let path = [Step::Entry(1), Step::Element(0), Step::Entry(0)];
        *copy.get_path_mut(&path).unwrap() = Node::from("cargo build");
        if let Node::Map(entries) = &mut copy {
            entries.push(Entry::new("extra", Scalar::Null));
        }

        assert_eq!(original, sample());
        assert_ne!(original, copy);
    }

    #[test]
    fn test_scalar_display() {
        assert_eq!(Scalar::Null.to_string(), "~");
        assert_eq!(Scalar::from("matrix").to_string(), "matrix");
        assert_eq!(Scalar::UInt(u64::MAX).to_string(), "18446744073709551615");
    }
}
