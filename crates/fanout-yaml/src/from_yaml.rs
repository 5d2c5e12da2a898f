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

//! YAML to document conversion

use crate::error::YamlError;
use fanout_core::{Document, Node, Scalar};
use serde::Deserialize;
use tracing::debug;

/// Default maximum document size: 500 MB
pub const DEFAULT_MAX_DOCUMENT_SIZE: usize = 500 * 1024 * 1024;

/// Default maximum nesting depth: 100 collection levels
///
/// `serde_yaml` stops recursing at 128 levels on its own; CI configurations
/// rarely go past a dozen.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 100;

/// Configuration for YAML import
///
/// # Examples
///
/// ```rust
/// use fanout_yaml::FromYamlConfig;
///
/// let config = FromYamlConfig::builder()
///     .max_document_size(10 * 1024 * 1024) // 10 MB
///     .max_nesting_depth(32)
///     .build();
/// assert_eq!(config.max_nesting_depth, 32);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FromYamlConfig {
    /// Maximum allowed document size in bytes (default: 500 MB)
    pub max_document_size: usize,
    /// Maximum allowed nesting depth (default: 100 levels)
    pub max_nesting_depth: usize,
}

impl Default for FromYamlConfig {
    fn default() -> Self {
        Self {
            max_document_size: DEFAULT_MAX_DOCUMENT_SIZE,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

impl FromYamlConfig {
    /// Creates a new builder for `FromYamlConfig`.
    pub fn builder() -> FromYamlConfigBuilder {
        FromYamlConfigBuilder::new()
    }
}

/// Builder for `FromYamlConfig`.
#[derive(Debug, Clone)]
pub struct FromYamlConfigBuilder {
    max_document_size: usize,
    max_nesting_depth: usize,
}

impl FromYamlConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self {
            max_document_size: DEFAULT_MAX_DOCUMENT_SIZE,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }

    /// Sets the maximum document size in bytes.
    pub fn max_document_size(mut self, size: usize) -> Self {
        self.max_document_size = size;
        self
    }

    /// Sets the maximum nesting depth.
    pub fn max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    /// Builds the `FromYamlConfig`.
    pub fn build(self) -> FromYamlConfig {
        FromYamlConfig {
            max_document_size: self.max_document_size,
            max_nesting_depth: self.max_nesting_depth,
        }
    }
}

impl Default for FromYamlConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode the first YAML document of `yaml`.
///
/// Any further documents in the stream are ignored. An empty stream, or a
/// first document that is `null`, gives an empty [`Document`].
///
/// # Errors
///
/// - [`YamlError::DocumentTooLarge`] if the input exceeds the size limit
/// - [`YamlError::ParseError`] for malformed YAML, tagged values or
///   non-scalar mapping keys
/// - [`YamlError::MaxDepthExceeded`] if the tree is nested too deeply
/// - [`YamlError::Expand`] with `NeedMap` if the document is not a mapping
pub fn from_yaml(yaml: &str, config: &FromYamlConfig) -> Result<Document, YamlError> {
    if yaml.len() > config.max_document_size {
        return Err(YamlError::DocumentTooLarge {
            size: yaml.len(),
            max_size: config.max_document_size,
        });
    }

    let Some(first) = serde_yaml::Deserializer::from_str(yaml).next() else {
        debug!("empty YAML stream");
        return Ok(Document::new());
    };

    let node = Node::deserialize(first)?;
    from_node(node, config)
}

/// Turn an already decoded node into a document, applying the same checks as
/// [`from_yaml`].
pub fn from_node(node: Node, config: &FromYamlConfig) -> Result<Document, YamlError> {
    let depth = node.depth();
    if depth > config.max_nesting_depth {
        return Err(YamlError::MaxDepthExceeded {
            max_depth: config.max_nesting_depth,
            actual_depth: depth,
        });
    }

    match node {
        Node::Scalar(Scalar::Null) => Ok(Document::new()),
        other => Ok(Document::try_from(other)?),
    }
}
