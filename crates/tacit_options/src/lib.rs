//! tacit_options: `tacit.json` parsing and parser options.
//!
//! ```json
//! { "parseOptions": { "allowTrailingTokens": false, "maxNestingDepth": 256 } }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in the working directory when no config path is given.
pub const CONFIG_FILE_NAME: &str = "tacit.json";

/// Options controlling one parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseOptions {
    /// Accept input whose trailing tokens are not consumed by the top-level
    /// program; otherwise they are a parse error.
    pub allow_trailing_tokens: bool,
    /// Deepest permitted nesting of grammar rule activations before the
    /// parse is aborted. This is not a bracket depth: each level of
    /// parentheses activates both a parenthesized and an expression rule,
    /// and the program adds a few more, so the default of 256 admits at
    /// most 126 nested parentheses.
    pub max_nesting_depth: u32,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            allow_trailing_tokens: false,
            max_nesting_depth: 256,
        }
    }
}

impl ParseOptions {
    pub fn with_trailing_tokens(mut self, allow: bool) -> Self {
        self.allow_trailing_tokens = allow;
        self
    }

    pub fn with_max_nesting_depth(mut self, depth: u32) -> Self {
        self.max_nesting_depth = depth;
        self
    }
}

/// The `tacit.json` file structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TacitConfig {
    pub parse_options: ParseOptions,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Parse a `tacit.json` file from a string.
pub fn parse_config(content: &str) -> Result<TacitConfig, serde_json::Error> {
    serde_json::from_str(content)
}

/// Parse a `tacit.json` file from a path.
pub fn parse_config_file(path: impl AsRef<Path>) -> Result<TacitConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load `tacit.json` from `dir` if it exists, the defaults otherwise.
pub fn load_config_in(dir: impl AsRef<Path>) -> Result<TacitConfig, ConfigError> {
    let candidate = dir.as_ref().join(CONFIG_FILE_NAME);
    if candidate.is_file() {
        parse_config_file(candidate)
    } else {
        Ok(TacitConfig::default())
    }
}
