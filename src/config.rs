//! Parser configuration, loadable from YAML.
//!
//! ```yaml
//! allow_blank_lines: true
//! allow_trailing_spaces: true
//! require_eof: false
//! ```
//!
//! Missing keys take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::diagnostics::{GrammarError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserConfig {
    /// Skip empty or space-only lines before and between rules.
    pub allow_blank_lines: bool,
    /// Accept spaces after a rule's terminal, before the line terminator.
    pub allow_trailing_spaces: bool,
    /// Treat content left after the last rule as a parse error.
    pub require_eof: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            allow_blank_lines: true,
            allow_trailing_spaces: true,
            require_eof: false,
        }
    }
}

impl ParserConfig {
    /// The strictest settings: no blank lines, no trailing spaces, and the
    /// whole input must be rules.
    pub fn strict() -> Self {
        Self {
            allow_blank_lines: false,
            allow_trailing_spaces: false,
            require_eof: true,
        }
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|e| GrammarError::Config {
            message: "invalid parser configuration".to_string(),
            source: Some(Box::new(e)),
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| GrammarError::Config {
            message: format!("failed to read configuration '{}'", path.display()),
            source: Some(Box::new(e)),
        })?;
        Self::from_yaml_str(&text)
    }
}
