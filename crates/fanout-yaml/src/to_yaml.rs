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

//! Document to YAML conversion

use crate::error::YamlError;
use fanout_core::Document;

/// Encode a document as a single YAML document.
///
/// Entries are written in document order and duplicate keys are written as
/// they are. An empty document encodes as `{}`.
pub fn to_yaml(doc: &Document) -> Result<String, YamlError> {
    serde_yaml::to_string(doc).map_err(|e| YamlError::Serialize(e.to_string()))
}
