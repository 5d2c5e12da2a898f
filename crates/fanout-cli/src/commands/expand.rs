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

//! Expand command - read, expand and write a YAML configuration

use super::{read_file, write_output, DEFAULT_MAX_FILE_SIZE};
use crate::error::CliError;
use fanout_core::{count_matrices, expand_with_options, ExpandOptions, ExpandStats};
use fanout_yaml::{from_yaml, to_yaml, FromYamlConfig};
use std::path::Path;
use tracing::{debug, info, warn};

/// Settings for a single `fanout` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandSettings {
    /// Largest input file accepted, in bytes.
    pub max_file_size: u64,
    /// Options handed to the expansion driver.
    pub options: ExpandOptions,
}

impl Default for ExpandSettings {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            options: ExpandOptions::default(),
        }
    }
}

/// Expand every matrix in `input`, writing the result to `output` or stdout.
///
/// Nothing is written unless reading, decoding, expanding and encoding all
/// succeed.
///
/// # Errors
///
/// Returns the first I/O, YAML or expansion error met.
pub fn expand(
    input: &Path,
    output: Option<&Path>,
    settings: &ExpandSettings,
) -> Result<ExpandStats, CliError> {
    let content = read_file(input, settings.max_file_size)?;
    debug!(path = %input.display(), bytes = content.len(), "read input");

    let config = FromYamlConfig::builder()
        .max_document_size(usize::try_from(settings.max_file_size).unwrap_or(usize::MAX))
        .build();
    let document = from_yaml(&content, &config)?;

    let expansion = expand_with_options(document, &settings.options)?;
    let stats = expansion.stats;
    info!(
        passes = stats.passes,
        expansions = stats.expansions,
        entries = expansion.document.len(),
        "expanded {}",
        input.display()
    );

    let leftover = count_matrices(&expansion.document);
    if leftover > 0 {
        warn!(
            count = leftover,
            "matrix keys left in output (empty or held directly by a list item)"
        );
    }

    let yaml = to_yaml(&expansion.document)?;
    write_output(&yaml, output)?;
    Ok(stats)
}
