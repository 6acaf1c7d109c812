/*
 * ==========================================================================
 * LANADA - Lua-Flavored Scripting, Straight From Source
 * ==========================================================================
 *
 * Author:   Sam Wilcox
 *
 * License:
 * This file is part of the Lanada scripting language project.
 *
 * Lanada is dual-licensed under the terms of:
 *   - The MIT License
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LanadaError, LanadaResult};
use crate::span::Span;

/// Runtime limits and knobs for one interpreter instance.
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```json
/// { "step_limit": 100000 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum nesting of user function calls before a `LimitError`.
    pub max_call_depth: usize,

    /// Maximum number of statements executed in one run. `None` = unbounded.
    pub step_limit: Option<u64>,

    /// Seed for `math.random`. `None` seeds from the OS.
    pub random_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_call_depth: 200,
            step_limit: None,
            random_seed: None,
        }
    }
}

impl Config {
    pub fn from_json(text: &str) -> LanadaResult<Self> {
        serde_json::from_str(text).map_err(|e| {
            LanadaError::syntax_error(
                format!("invalid configuration: {}", e),
                Span::new(e.line(), e.column().saturating_sub(1)),
            )
        })
    }

    pub fn load(path: impl AsRef<Path>) -> LanadaResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            LanadaError::syntax_error(
                format!("cannot read configuration '{}': {}", path.display(), e),
                Span::default(),
            )
        })?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> String {
        // Plain struct of integers and options; serialization cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
