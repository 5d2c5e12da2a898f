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

//! YAML front end for Fanout.
//!
//! Decodes the first document of a YAML stream into an ordered
//! [`Document`](fanout_core::Document), runs matrix expansion over it and
//! encodes the result back to YAML. Duplicate keys and entry order survive
//! both directions, since expansion emits the same top-level key once per
//! variant.
//!
//! # Examples
//!
//! ```rust
//! use fanout_yaml::expand_yaml;
//!
//! let input = "task:\n  matrix:\n    - os: linux\n    - os: macos\n  script: make\n";
//! let output = expand_yaml(input).unwrap();
//! assert_eq!(output.matches("task:").count(), 2);
//! ```
//!
//! # Limits
//!
//! [`FromYamlConfig`] caps the accepted input size and nesting depth. The
//! number of expansion passes is bounded by
//! [`ExpandOptions`](fanout_core::ExpandOptions).

mod error;
mod from_yaml;
mod to_yaml;

pub use error::YamlError;
pub use from_yaml::{
    from_node, from_yaml, FromYamlConfig, FromYamlConfigBuilder, DEFAULT_MAX_DOCUMENT_SIZE,
    DEFAULT_MAX_NESTING_DEPTH,
};
pub use to_yaml::to_yaml;

use fanout_core::{expand_with_options, Document, ExpandOptions, ExpandStats};
use tracing::debug;

/// Decode YAML into a document using the default limits.
pub fn yaml_to_document(yaml: &str) -> Result<Document, YamlError> {
    from_yaml(yaml, &FromYamlConfig::default())
}

/// Encode a document as YAML.
pub fn document_to_yaml(doc: &Document) -> Result<String, YamlError> {
    to_yaml(doc)
}

/// Decode, expand and re-encode a YAML configuration with default settings.
pub fn expand_yaml(yaml: &str) -> Result<String, YamlError> {
    expand_yaml_with(yaml, &FromYamlConfig::default(), &ExpandOptions::default())
        .map(|(output, _)| output)
}

/// Decode, expand and re-encode a YAML configuration.
///
/// Returns the expanded YAML together with the statistics of the run. Nothing
/// is encoded unless the whole expansion succeeded.
pub fn expand_yaml_with(
    yaml: &str,
    config: &FromYamlConfig,
    options: &ExpandOptions,
) -> Result<(String, ExpandStats), YamlError> {
    let doc = from_yaml(yaml, config)?;
    debug!(entries = doc.len(), "decoded YAML document");

    let expansion = expand_with_options(doc, options)?;
    let output = to_yaml(&expansion.document)?;
    Ok((output, expansion.stats))
}
