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

//! CLI command implementations

mod expand;

pub use expand::{expand, ExpandSettings};

use crate::error::CliError;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Default maximum input file size (1 GB)
/// Can be overridden with `--max-file-size`
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

/// Read a file from disk with size validation.
///
/// The size is checked from metadata before anything is read.
///
/// # Errors
///
/// - [`CliError::Io`] if the metadata or the contents cannot be read, or the
///   file is not valid UTF-8
/// - [`CliError::FileTooLarge`] if the file exceeds `max_size` bytes
pub fn read_file(path: &Path, max_size: u64) -> Result<String, CliError> {
    let metadata = fs::metadata(path).map_err(|e| CliError::io_error(path, e))?;

    if metadata.len() > max_size {
        return Err(CliError::file_too_large(path, metadata.len(), max_size));
    }

    fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))
}

/// Write content to a file or stdout.
///
/// A file target is written to a temporary file in the same directory and
/// renamed over `path` once complete, so a failed write leaves any existing
/// file untouched and never leaves a truncated one behind.
pub fn write_output(content: &str, path: Option<&Path>) -> Result<(), CliError> {
    match path {
        Some(p) => write_file_atomic(content, p),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|e| CliError::io_error("<stdout>", e))
        }
    }
}

fn write_file_atomic(content: &str, path: &Path) -> Result<(), CliError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| CliError::io_error(path, e))?;
    tmp.write_all(content.as_bytes())
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| CliError::io_error(path, e))?;

    // Keep the mode of a file being replaced.
    if let Ok(existing) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(|e| CliError::io_error(path, e))?;
    }

    tmp.persist(path)
        .map(|_| ())
        .map_err(|e| CliError::io_error(path, e.error))
}
