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

//! Fanout CLI library.
//!
//! Backs the `fanout` binary, which reads a YAML configuration, expands every
//! `matrix` modifier in it and writes the result:
//!
//! ```text
//! fanout .ci.yml              # expanded YAML on stdout
//! fanout .ci.yml expanded.yml # expanded YAML written to a file
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use fanout_cli::commands::{expand, ExpandSettings};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), fanout_cli::error::CliError> {
//! let stats = expand(Path::new(".ci.yml"), None, &ExpandSettings::default())?;
//! eprintln!("{} variants", stats.variants);
//! # Ok(())
//! # }
//! ```

pub mod commands;
pub mod error;

pub use error::CliError;
