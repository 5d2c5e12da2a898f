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

//! Fixpoint driver: repeated expansion passes over a whole document.
//!
//! A pass walks every top-level entry in order and resolves at most one matrix
//! per entry, splicing the produced variants in place of the entry. Passes are
//! repeated until one of them expands nothing.

use crate::matrix::MatrixExpander;
use crate::traverse::traverse;
use crate::{Document, ExpandError, ExpandResult};
use tracing::debug;

/// Options for [`expand_with_options`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandOptions {
    /// Maximum number of expanding passes (default: unbounded).
    ///
    /// A matrix construction that regenerates itself never reaches a
    /// fixpoint; set this to turn that into [`ExpandError::PassLimitExceeded`].
    pub max_passes: Option<usize>,
}

impl ExpandOptions {
    /// Create a new builder for `ExpandOptions`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fanout_core::ExpandOptions;
    ///
    /// let options = ExpandOptions::builder().max_passes(64).build();
    /// assert_eq!(options.max_passes, Some(64));
    /// ```
    pub fn builder() -> ExpandOptionsBuilder {
        ExpandOptionsBuilder::new()
    }
}

/// Builder for [`ExpandOptions`].
#[derive(Debug, Clone, Default)]
pub struct ExpandOptionsBuilder {
    max_passes: Option<usize>,
}

impl ExpandOptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of expanding passes.
    pub fn max_passes(mut self, passes: usize) -> Self {
        self.max_passes = Some(passes);
        self
    }

    /// Remove the pass ceiling.
    pub fn unbounded(mut self) -> Self {
        self.max_passes = None;
        self
    }

    /// Build the options.
    pub fn build(self) -> ExpandOptions {
        ExpandOptions {
            max_passes: self.max_passes,
        }
    }
}

/// Counters describing a completed expansion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpandStats {
    /// Passes that expanded at least one matrix.
    pub passes: usize,
    /// Matrices resolved across all passes.
    pub expansions: usize,
    /// Top-level entries produced by those resolutions.
    pub variants: usize,
}

/// Result of [`expand_with_options`].
#[derive(Debug, Clone, PartialEq)]
pub struct Expansion {
    /// The fully expanded document.
    pub document: Document,
    /// What it took to get there.
    pub stats: ExpandStats,
}

/// Expand every matrix modifier in `document` until none can be expanded.
///
/// # Examples
///
/// ```rust
/// use fanout_core::{expand, Document, Entry, Node};
///
/// let mut doc = Document::new();
/// doc.push(
///     "task",
///     Node::Map(vec![
///         Entry::new(
///             "matrix",
///             Node::Map(vec![Entry::new("a", 1i64), Entry::new("b", 2i64)]),
///         ),
///         Entry::new("env", "prod"),
///     ]),
/// );
///
/// let expanded = expand(doc).unwrap();
/// assert_eq!(expanded.get_all("task").count(), 2);
/// ```
///
/// # Errors
///
/// Returns the first [`ExpandError`] met; no partial document is returned.
pub fn expand(document: Document) -> ExpandResult<Document> {
    expand_with_options(document, &ExpandOptions::default()).map(|e| e.document)
}

/// Expand with explicit options, reporting statistics.
pub fn expand_with_options(
    mut document: Document,
    options: &ExpandOptions,
) -> ExpandResult<Expansion> {
    let mut stats = ExpandStats::default();

    loop {
        let pass = single_pass(document)?;
        document = pass.document;

        if pass.expansions == 0 {
            debug!(
                passes = stats.passes,
                expansions = stats.expansions,
                entries = document.len(),
                "fixpoint reached"
            );
            return Ok(Expansion { document, stats });
        }

        stats.passes += 1;
        stats.expansions += pass.expansions;
        stats.variants += pass.variants;
        debug!(
            pass = stats.passes,
            expansions = pass.expansions,
            entries = document.len(),
            "expansion pass complete"
        );

        if let Some(limit) = options.max_passes {
            if stats.passes > limit {
                return Err(ExpandError::PassLimitExceeded { limit });
            }
        }
    }
}

struct PassOutcome {
    document: Document,
    expansions: usize,
    variants: usize,
}

/// One pass over all top-level entries.
///
/// Entries are consumed: an entry without a matrix moves into the output
/// unchanged, an entry with one is replaced by its variants.
fn single_pass(document: Document) -> ExpandResult<PassOutcome> {
    let mut entries = Vec::with_capacity(document.len());
    let mut expansions = 0;
    let mut variants = 0;

    for entry in document {
        let mut expander = MatrixExpander::new();
        traverse(&entry, &mut expander)?;

        let diverged = expander.into_diverged();
        if diverged.is_empty() {
            entries.push(entry);
        } else {
            expansions += 1;
            variants += diverged.len();
            entries.extend(diverged);
        }
    }

    Ok(PassOutcome {
        document: Document::from_entries(entries),
        expansions,
        variants,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{count_matrices, Entry, Node};

    fn map(entries: Vec<(&str, Node)>) -> Node {
        Node::Map(entries.into_iter().map(|(k, v)| Entry::new(k, v)).collect())
    }

    fn list(items: Vec<Node>) -> Node {
        Node::Seq(items)
    }

    fn doc(entries: Vec<(&str, Node)>) -> Document {
        Document::from_entries(entries.into_iter().map(|(k, v)| Entry::new(k, v)).collect())
    }

    #[test]
    fn test_empty_document() {
        let expansion = expand_with_options(Document::new(), &ExpandOptions::default()).unwrap();
        assert!(expansion.document.is_empty());
        assert_eq!(expansion.stats, ExpandStats::default());
    }

    #[test]
    fn test_no_matrix_is_identity() {
        let input = doc(vec![
            ("image", "rust:latest".into()),
            ("task", map(vec![("script", list(vec!["a".into(), "b".into()]))])),
        ]);
        assert_eq!(expand(input.clone()).unwrap(), input);
    }

    #[test]
    fn test_map_matrix_arity() {
        let input = doc(vec![(
            "task",
            map(vec![
                (
                    "matrix",
                    map(vec![
                        ("a", map(vec![("x", 1i64.into())])),
                        ("b", map(vec![("x", 2i64.into())])),
                    ]),
                ),
                ("env", "prod".into()),
            ]),
        )]);

        let expected = doc(vec![
            (
                "task",
                map(vec![("env", "prod".into()), ("a", map(vec![("x", 1i64.into())]))]),
            ),
            (
                "task",
                map(vec![("env", "prod".into()), ("b", map(vec![("x", 2i64.into())]))]),
            ),
        ]);

        assert_eq!(expand(input).unwrap(), expected);
    }

    #[test]
    fn test_splices_in_place_and_keeps_neighbours() {
        let input = doc(vec![
            ("first", 1i64.into()),
            (
                "task",
                map(vec![(
                    "matrix",
                    list(vec![map(vec![("n", 1i64.into())]), map(vec![("n", 2i64.into())])]),
                )]),
            ),
            ("last", 2i64.into()),
        ]);

        let out = expand(input).unwrap();
        let keys: Vec<_> = out.iter().map(|e| e.key.to_string()).collect();
        assert_eq!(keys, vec!["first", "task", "task", "last"]);
        assert_eq!(out.entries[2].value, map(vec![("n", 2i64.into())]));
    }

    #[test]
    fn test_nested_matrices_multiply() {
        let inner = |tag: &str| {
            map(vec![(
                "matrix",
                list(vec![
                    map(vec![("v", format!("{}1", tag).into())]),
                    map(vec![("v", format!("{}2", tag).into())]),
                    map(vec![("v", format!("{}3", tag).into())]),
                ]),
            )])
        };
        let input = doc(vec![(
            "task",
            map(vec![(
                "matrix",
                list(vec![
                    map(vec![("env", inner("a"))]),
                    map(vec![("env", inner("b"))]),
                ]),
            )]),
        )]);

        let expansion = expand_with_options(input, &ExpandOptions::default()).unwrap();
        assert_eq!(expansion.document.len(), 6);
        assert_eq!(
            expansion.stats,
            ExpandStats {
                passes: 2,
                expansions: 3,
                variants: 8,
            }
        );
        let values: Vec<_> = expansion
            .document
            .iter()
            .map(|e| e.value.get("env").and_then(|env| env.get("v")).cloned())
            .collect();
        assert_eq!(
            values,
            ["a1", "a2", "a3", "b1", "b2", "b3"]
                .iter()
                .map(|v| Some(Node::from(*v)))
                .collect::<Vec<_>>()
        );
        assert_eq!(count_matrices(&expansion.document), 0);
    }

    #[test]
    fn test_multiple_matrices_same_level_combine() {
        let input = doc(vec![(
            "task",
            map(vec![
                (
                    "matrix",
                    list(vec![map(vec![("A", 1i64.into())]), map(vec![("A", 2i64.into())])]),
                ),
                ("name", "t".into()),
                (
                    "matrix",
                    list(vec![map(vec![("B", 1i64.into())]), map(vec![("B", 2i64.into())])]),
                ),
            ]),
        )]);

        let out = expand(input).unwrap();
        let combos: Vec<_> = out
            .iter()
            .map(|e| (e.value.get("A").cloned(), e.value.get("B").cloned()))
            .collect();
        assert_eq!(
            combos,
            [(1, 1), (1, 2), (2, 1), (2, 2)]
                .iter()
                .map(|&(a, b): &(i64, i64)| (Some(Node::from(a)), Some(Node::from(b))))
                .collect::<Vec<_>>()
        );
        let keys: Vec<_> = out.entries[0]
            .value
            .as_map()
            .unwrap()
            .iter()
            .map(|e| e.key.to_string())
            .collect();
        assert_eq!(keys, vec!["name", "A", "B"]);
    }

    #[test]
    fn test_second_run_is_noop() {
        let input = doc(vec![(
            "task",
            map(vec![(
                "matrix",
                map(vec![("a", 1i64.into()), ("b", 2i64.into())]),
            )]),
        )]);

        let once = expand(input).unwrap();
        let twice = expand_with_options(once.clone(), &ExpandOptions::default()).unwrap();
        assert_eq!(twice.document, once);
        assert_eq!(twice.stats.passes, 0);
    }

    #[test]
    fn test_error_aborts_run() {
        let input = doc(vec![
            ("ok", map(vec![("matrix", map(vec![("a", 1i64.into())]))])),
            ("bad", map(vec![("matrix", 7i64.into())])),
        ]);
        assert_eq!(
            expand(input).unwrap_err(),
            ExpandError::MatrixNeedsCollection {
                path: "bad".to_string(),
                found: "integer".to_string(),
            }
        );
    }

    #[test]
    fn test_pass_limit() {
        let input = doc(vec![(
            "task",
            map(vec![(
                "matrix",
                list(vec![map(vec![(
                    "matrix",
                    list(vec![map(vec![("x", 1i64.into())])]),
                )])]),
            )]),
        )]);

        let limited = ExpandOptions::builder().max_passes(1).build();
        assert_eq!(
            expand_with_options(input.clone(), &limited).unwrap_err(),
            ExpandError::PassLimitExceeded { limit: 1 }
        );

        let enough = ExpandOptions::builder().max_passes(2).build();
        let expansion = expand_with_options(input, &enough).unwrap();
        assert_eq!(expansion.stats.passes, 2);
        assert_eq!(
            expansion.document,
            doc(vec![("task", map(vec![("x", 1i64.into())]))])
        );
    }

    #[test]
    fn test_builder_defaults() {
        assert_eq!(ExpandOptions::builder().build(), ExpandOptions::default());
        assert_eq!(
            ExpandOptions::builder().max_passes(3).unbounded().build().max_passes,
            None
        );
    }
}
