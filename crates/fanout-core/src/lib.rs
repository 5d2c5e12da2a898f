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

//! Ordered document model and matrix expansion engine.
//!
//! A configuration document may mark any mapping with a `matrix` key. Fanout
//! replaces the top-level entry owning that mapping with one copy per axis
//! point of the matrix, and keeps doing so until a whole pass over the
//! document finds nothing left to expand.
//!
//! ```text
//! task:                        task:
//!   matrix:                      env: prod
//!     a: {x: 1}        ==>       a: {x: 1}
//!     b: {x: 2}                task:
//!   env: prod                    env: prod
//!                                b: {x: 2}
//! ```
//!
//! # Modules
//!
//! - [`traverse`]: preorder entry walker with early termination
//! - [`matrix`]: matrix detection, parametrization and the expanding visitor
//! - [`expand`]: the fixpoint driver and its options
//!
//! Encoding and decoding live in `fanout-yaml`; enable the `serde` feature to
//! get `Serialize`/`Deserialize` for [`Node`] and [`Document`].

mod document;
mod error;
pub mod expand;
pub mod matrix;
mod node;
#[cfg(feature = "serde")]
mod serde_impl;
pub mod traverse;

pub use document::Document;
pub use error::{ExpandError, ExpandResult};
pub use expand::{expand, expand_with_options, ExpandOptions, ExpandOptionsBuilder, ExpandStats, Expansion};
pub use matrix::{count_matrices, MatrixExpander, MATRIX_KEY};
pub use node::{Entry, Mapping, Node, Scalar, Step};
pub use traverse::{traverse, EntryVisitor, VisitorContext};
