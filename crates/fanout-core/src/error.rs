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

//! Error types for matrix expansion.

use thiserror::Error;

/// Errors that abort a matrix expansion run.
///
/// All variants are terminal: the run stops at the first one and no partial
/// document is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpandError {
    /// The outermost value of the input is not a mapping.
    #[error("first document should be a map, found {found}")]
    NeedMap { found: String },

    /// A matrix modifier holds something other than a mapping or a sequence.
    #[error("matrix at {path} should contain a collection, found {found}")]
    MatrixNeedsCollection { path: String, found: String },

    /// A matrix modifier holds a sequence with a non-mapping element.
    #[error(
        "matrix with a list at {path} can only contain maps as its items, found {found} at index {index}"
    )]
    MatrixNeedsListOfMaps {
        path: String,
        index: usize,
        found: String,
    },

    /// The configured pass ceiling was hit before reaching a fixpoint.
    #[error("expansion did not reach a fixpoint within {limit} passes")]
    PassLimitExceeded { limit: usize },

    /// A visited path could not be resolved in a copy of its own document.
    #[error("path {path} does not resolve inside its document")]
    UnresolvedPath { path: String },
}

/// Result type for expansion operations.
pub type ExpandResult<T> = Result<T, ExpandError>;
