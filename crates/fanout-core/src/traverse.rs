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

//! Preorder traversal over the entries of a top-level document entry.
//!
//! # Architecture
//!
//! The visitor pattern separates the walk from what is done at each step.
//! [`traverse`] visits the root entry first, then descends into its value:
//! every entry of a mapping is visited (and then descended into), every
//! element of a sequence is descended into. Scalars are leaves.
//!
//! Visitors are called once per mapping entry, never per sequence element.
//! A mapping that sits directly inside a sequence has its entries visited,
//! but is not itself the value of any visited entry.
//!
//! # Example
//!
//! ```rust
//! use fanout_core::traverse::{traverse, EntryVisitor, VisitorContext};
//! use fanout_core::{Entry, Node};
//! use std::ops::ControlFlow;
//!
//! struct KeyCollector(Vec<String>);
//!
//! impl EntryVisitor for KeyCollector {
//!     type Error = std::convert::Infallible;
//!
//!     fn visit_entry(
//!         &mut self,
//!         _root: &Entry,
//!         _entry: &Entry,
//!         ctx: &VisitorContext,
//!     ) -> Result<ControlFlow<()>, Self::Error> {
//!         self.0.push(ctx.path_string().to_string());
//!         Ok(ControlFlow::Continue(()))
//!     }
//! }
//!
//! let root = Entry::new("task", Node::Map(vec![Entry::new("script", "make")]));
//! let mut keys = KeyCollector(Vec::new());
//! traverse(&root, &mut keys).unwrap();
//! assert_eq!(keys.0, vec!["task", "task.script"]);
//! ```

use crate::{Entry, Node, Scalar, Step};
use std::ops::ControlFlow;

/// Context provided to visitors during traversal.
#[derive(Debug, Clone)]
pub struct VisitorContext {
    /// Current nesting depth (0 = the root entry).
    pub depth: usize,
    /// Structural path from the root entry's value to the visited entry's value.
    pub path: Vec<Step>,
    label: String,
}

impl VisitorContext {
    /// Create the context for the root entry.
    pub fn root(root: &Entry) -> Self {
        Self {
            depth: 0,
            path: Vec::new(),
            label: root.key.to_string(),
        }
    }

    /// Create the context for the `index`-th entry of the current mapping.
    pub fn entry(&self, index: usize, key: &Scalar) -> Self {
        let mut path = self.path.clone();
        path.push(Step::Entry(index));
        Self {
            depth: self.depth + 1,
            path,
            label: format!("{}.{}", self.label, key),
        }
    }

    /// Create the context for the `index`-th element of the current sequence.
    pub fn element(&self, index: usize) -> Self {
        let mut path = self.path.clone();
        path.push(Step::Element(index));
        Self {
            depth: self.depth + 1,
            path,
            label: format!("{}[{}]", self.label, index),
        }
    }

    /// Human-readable path of the visited entry (for error messages).
    pub fn path_string(&self) -> &str {
        &self.label
    }
}

/// Trait for visiting the entries of a document tree.
pub trait EntryVisitor {
    /// Error type returned by the visitor.
    type Error;

    /// Called once per mapping entry, in preorder.
    ///
    /// `root` is the top-level entry the walk started from. Returning
    /// `ControlFlow::Break` stops the walk without descending into `entry`.
    fn visit_entry(
        &mut self,
        root: &Entry,
        entry: &Entry,
        ctx: &VisitorContext,
    ) -> Result<ControlFlow<()>, Self::Error>;
}

/// Walk `root` and everything below it, calling the visitor for each entry.
///
/// Stops at the first `Break` or error; the error is returned as is.
pub fn traverse<V: EntryVisitor>(root: &Entry, visitor: &mut V) -> Result<(), V::Error> {
    let ctx = VisitorContext::root(root);
    traverse_entry(root, root, visitor, &ctx).map(|_| ())
}

fn traverse_entry<V: EntryVisitor>(
    root: &Entry,
    entry: &Entry,
    visitor: &mut V,
    ctx: &VisitorContext,
) -> Result<ControlFlow<()>, V::Error> {
    if visitor.visit_entry(root, entry, ctx)?.is_break() {
        return Ok(ControlFlow::Break(()));
    }
    traverse_node(root, &entry.value, visitor, ctx)
}

fn traverse_node<V: EntryVisitor>(
    root: &Entry,
    node: &Node,
    visitor: &mut V,
    ctx: &VisitorContext,
) -> Result<ControlFlow<()>, V::Error> {
    match node {
        Node::Scalar(_) => {}
        Node::Map(entries) => {
            for (index, entry) in entries.iter().enumerate() {
                let child_ctx = ctx.entry(index, &entry.key);
                if traverse_entry(root, entry, visitor, &child_ctx)?.is_break() {
                    return Ok(ControlFlow::Break(()));
                }
            }
        }
        Node::Seq(items) => {
            for (index, item) in items.iter().enumerate() {
                let child_ctx = ctx.element(index);
                if traverse_node(root, item, visitor, &child_ctx)?.is_break() {
                    return Ok(ControlFlow::Break(()));
                }
            }
        }
    }
    Ok(ControlFlow::Continue(()))
}
