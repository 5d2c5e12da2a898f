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

//! Error types for YAML conversion operations.

use fanout_core::ExpandError;
use thiserror::Error;

/// Errors that can occur while decoding, expanding or encoding YAML.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum YamlError {
    /// YAML parsing failed
    #[error("YAML parse error: {0}")]
    ParseError(String),

    /// YAML emission failed
    #[error("YAML serialization error: {0}")]
    Serialize(String),

    /// Document too large
    #[error("Document size {size} bytes exceeds maximum of {max_size} bytes")]
    DocumentTooLarge { size: usize, max_size: usize },

    /// Maximum nesting depth exceeded
    #[error("Maximum nesting depth of {max_depth} exceeded at depth {actual_depth}")]
    MaxDepthExceeded {
        max_depth: usize,
        actual_depth: usize,
    },

    /// Root shape or matrix error from the expansion engine
    #[error(transparent)]
    Expand(#[from] ExpandError),
}

impl From<serde_yaml::Error> for YamlError {
    fn from(err: serde_yaml::Error) -> Self {
        YamlError::ParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = YamlError::ParseError("invalid syntax".to_string());
        assert_eq!(err.to_string(), "YAML parse error: invalid syntax");
    }

    #[test]
    fn test_document_too_large_display() {
        let err = YamlError::DocumentTooLarge {
            size: 20_000_000,
            max_size: 10_000_000,
        };
        assert_eq!(
            err.to_string(),
            "Document size 20000000 bytes exceeds maximum of 10000000 bytes"
        );
    }

    #[test]
    fn test_max_depth_exceeded_display() {
        let err = YamlError::MaxDepthExceeded {
            max_depth: 100,
            actual_depth: 150,
        };
        assert_eq!(
            err.to_string(),
            "Maximum nesting depth of 100 exceeded at depth 150"
        );
    }

    #[test]
    fn test_expand_error_is_transparent() {
        let err: YamlError = ExpandError::NeedMap {
            found: "sequence".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "first document should be a map, found sequence");
    }

    #[test]
    fn test_from_serde_yaml_error() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("a: [1, 2").unwrap_err();
        let err: YamlError = yaml_err.into();
        assert!(matches!(err, YamlError::ParseError(_)));
    }
}
