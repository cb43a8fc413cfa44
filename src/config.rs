//! Configuration loading and management.
//!
//! Configuration is loaded from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. `.tforge.toml` in current directory
//! 4. `~/.config/tforge/config.toml`
//! 5. Default values
//!
//! # Configuration File Format
//!
//! ```toml
//! [compile]
//! dialect = "snowflake_sql"   # any name listed by `tforge dialects`
//! catalog = "analytics"       # optional source catalog prefix
//! target = "sql"              # sql, dbt, all
//!
//! [output]
//! colored = true
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `TFORGE_DIALECT` | Default target dialect |
//! | `TFORGE_CATALOG` | Source catalog prefix |
//! | `TFORGE_TARGET` | Default output target |

use std::{
    env, fs,
    path::{Path, PathBuf}
};

use serde::Deserialize;
use tracing::debug;

use crate::{
    dialect::Dialect,
    error::{AppResult, config_error},
    render::Target
};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub compile: CompileConfig,
    #[serde(default)]
    pub output:  OutputConfig
}

/// Compilation defaults
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CompileConfig {
    pub dialect: Option<String>,
    pub catalog: Option<String>,
    pub target:  Option<String>
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_colored")]
    pub colored: bool
}

fn default_colored() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            colored: true
        }
    }
}

impl Config {
    /// Load configuration from file and environment
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file in current directory (.tforge.toml)
    /// 3. Config file in home directory (~/.config/tforge/config.toml)
    /// 4. Default values
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(home) = env::var_os("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("tforge")
                .join("config.toml");

            if home_config.exists() {
                config = Self::from_file(&home_config)?;
            }
        }

        // Current directory config replaces the home config
        let local_config = PathBuf::from(".tforge.toml");
        if local_config.exists() {
            config = Self::from_file(&local_config)?;
        }

        if let Ok(dialect) = env::var("TFORGE_DIALECT") {
            config.compile.dialect = Some(dialect);
        }

        if let Ok(catalog) = env::var("TFORGE_CATALOG") {
            config.compile.catalog = Some(catalog);
        }

        if let Ok(target) = env::var("TFORGE_TARGET") {
            config.compile.target = Some(target);
        }

        Ok(config)
    }

    /// Load a single configuration file
    pub fn from_file(path: &Path) -> AppResult<Self> {
        debug!(path = %path.display(), "loading config file");
        let content = fs::read_to_string(path)
            .map_err(|e| config_error(format!("Failed to read config file: {}", e)))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|e| config_error(format!("Invalid config file: {}", e)))
    }

    /// Configured default dialect, if any
    pub fn dialect(&self) -> AppResult<Option<Dialect>> {
        self.compile
            .dialect
            .as_deref()
            .map(|name| {
                name.parse::<Dialect>()
                    .map_err(|_| config_error(format!("Unknown dialect '{}' in config", name)))
            })
            .transpose()
    }

    /// Configured default target, if any
    pub fn target(&self) -> AppResult<Option<Target>> {
        self.compile
            .target
            .as_deref()
            .map(str::parse::<Target>)
            .transpose()
    }
}
