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

use clap::Parser;
use fanout_cli::commands::{self, ExpandSettings};
use fanout_core::ExpandOptions;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fanout")]
#[command(author, version, about = "Fanout - expand matrix modifiers in YAML configuration", long_about = None)]
struct Cli {
    /// Input YAML file
    input: PathBuf,

    /// Output file (default: stdout)
    output: Option<PathBuf>,

    /// Fail if expansion has not settled after this many passes
    #[arg(long, value_name = "N")]
    max_passes: Option<usize>,

    /// Reject input files larger than this many bytes
    #[arg(long, value_name = "BYTES", default_value_t = commands::DEFAULT_MAX_FILE_SIZE)]
    max_file_size: u64,

    /// Log each expansion pass to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = ExpandSettings {
        max_file_size: cli.max_file_size,
        options: ExpandOptions {
            max_passes: cli.max_passes,
        },
    };

    match commands::expand(&cli.input, cli.output.as_deref(), &settings) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
