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

//! Matrix modifier detection and parametrization.
//!
//! A mapping holding a `matrix` key is split into one mapping per axis point:
//!
//! - `matrix: {a: ..., b: ...}` gives one parametrization per entry, each being
//!   the non-matrix siblings followed by that single entry;
//! - `matrix: [{...}, {...}]` gives one parametrization per element, each being
//!   the non-matrix siblings followed by all entries of that element.
//!
//! Only the first matrix of a mapping is resolved per visit. Any further
//! matrix entries at the same level are appended after the other siblings and
//! resolved by a later pass.

use crate::traverse::{EntryVisitor, VisitorContext};
use crate::{Document, Entry, ExpandError, ExpandResult, Mapping, Node, Scalar};
use std::ops::ControlFlow;
use tracing::trace;

/// Reserved key that marks a mapping for expansion.
pub const MATRIX_KEY: &str = "matrix";

/// Returns `true` if `key` is the matrix modifier.
pub fn is_matrix_key(key: &Scalar) -> bool {
    key.as_str() == Some(MATRIX_KEY)
}

/// Build the parametrizations of a mapping.
///
/// Returns `Ok(None)` when the mapping holds no matrix modifier. `path` is
/// only used for error messages.
///
/// # Errors
///
/// - [`ExpandError::MatrixNeedsCollection`] if the selected matrix value is a
///   scalar.
/// - [`ExpandError::MatrixNeedsListOfMaps`] if it is a sequence with an element
///   that is not a mapping.
pub fn parametrize(entries: &[Entry], path: &str) -> ExpandResult<Option<Vec<Mapping>>> {
    let (matrices, mut others): (Vec<&Entry>, Vec<&Entry>) =
        entries.iter().partition(|entry| is_matrix_key(&entry.key));

    let Some((selected, deferred)) = matrices.split_first() else {
        return Ok(None);
    };
    others.extend_from_slice(deferred);

    let parametrizations: Vec<Mapping> = match &selected.value {
        Node::Map(axis) => axis
            .iter()
            .map(|point| inherit(&others, std::slice::from_ref(point)))
            .collect(),
        Node::Seq(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                Node::Map(point) => Ok(inherit(&others, point)),
                other => Err(ExpandError::MatrixNeedsListOfMaps {
                    path: path.to_string(),
                    index,
                    found: other.kind().to_string(),
                }),
            })
            .collect::<ExpandResult<Vec<_>>>()?,
        Node::Scalar(scalar) => {
            return Err(ExpandError::MatrixNeedsCollection {
                path: path.to_string(),
                found: scalar.kind().to_string(),
            })
        }
    };

    Ok(Some(parametrizations))
}

/// Siblings first, then the axis point's own entries.
fn inherit(others: &[&Entry], point: &[Entry]) -> Mapping {
    others
        .iter()
        .copied()
        .chain(point)
        .cloned()
        .collect()
}

/// Visitor resolving the first matrix modifier found below a top-level entry.
///
/// Each parametrization becomes a copy of the whole top-level entry with the
/// visited mapping swapped for that parametrization. The entry being walked is
/// never modified.
#[derive(Debug, Default)]
pub struct MatrixExpander {
    diverged: Vec<Entry>,
}

impl MatrixExpander {
    /// Create an expander with no output yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The top-level entries produced by the expansion, in axis order.
    ///
    /// Empty if the walk met no matrix (or only empty ones).
    pub fn into_diverged(self) -> Vec<Entry> {
        self.diverged
    }
}

impl EntryVisitor for MatrixExpander {
    type Error = ExpandError;

    fn visit_entry(
        &mut self,
        root: &Entry,
        entry: &Entry,
        ctx: &VisitorContext,
    ) -> ExpandResult<ControlFlow<()>> {
        let Node::Map(entries) = &entry.value else {
            return Ok(ControlFlow::Continue(()));
        };
        let Some(parametrizations) = parametrize(entries, ctx.path_string())? else {
            return Ok(ControlFlow::Continue(()));
        };
        if parametrizations.is_empty() {
            trace!(path = ctx.path_string(), "skipping empty matrix");
            return Ok(ControlFlow::Continue(()));
        }

        trace!(
            path = ctx.path_string(),
            variants = parametrizations.len(),
            "expanding matrix"
        );

        for mapping in parametrizations {
            let mut variant = root.clone();
            let slot = variant.value.get_path_mut(&ctx.path).ok_or_else(|| {
                ExpandError::UnresolvedPath {
                    path: ctx.path_string().to_string(),
                }
            })?;
            *slot = Node::Map(mapping);
            self.diverged.push(variant);
        }

        Ok(ControlFlow::Break(()))
    }
}

/// Visitor counting matrix modifiers.
#[derive(Debug, Default)]
pub struct MatrixCounter {
    /// Number of `matrix` entries seen.
    pub count: usize,
}

impl EntryVisitor for MatrixCounter {
    type Error = std::convert::Infallible;

    fn visit_entry(
        &mut self,
        _root: &Entry,
        entry: &Entry,
        _ctx: &VisitorContext,
    ) -> Result<ControlFlow<()>, Self::Error> {
        if is_matrix_key(&entry.key) {
            self.count += 1;
        }
        Ok(ControlFlow::Continue(()))
    }
}

/// Count the matrix modifiers anywhere in a document.
///
/// After a completed expansion the only ones left are empty matrices and
/// matrices held directly by a sequence element, which are never expanded.
pub fn count_matrices(document: &Document) -> usize {
    let mut counter = MatrixCounter::default();
    for entry in document {
        match crate::traverse::traverse(entry, &mut counter) {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }
    counter.count
}
