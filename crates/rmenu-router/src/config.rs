// File: src/config.rs
// Purpose: Compiler configuration parsing from rmenu.toml

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::route::{DEFAULT_MAX_PARTS, MAX_PARTS_LIMIT};

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub compiler: CompilerOptions,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Options affecting how routes are compiled
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompilerOptions {
    /// Parts beyond this count are folded into the last part
    #[serde(default = "default_max_parts")]
    pub max_parts: usize,

    /// Access callback used when only access arguments are declared
    #[serde(default = "default_permission_callback")]
    pub permission_callback: String,

    /// Title callback of routes that declare none
    #[serde(default = "default_title_callback")]
    pub default_title_callback: String,
}

/// Where and how the compiled table is written
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: String,

    /// Pretty-print emitted JSON
    #[serde(default = "default_true")]
    pub pretty: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// One of trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default values
fn default_max_parts() -> usize {
    DEFAULT_MAX_PARTS
}

fn default_permission_callback() -> String {
    "user_access".to_string()
}

fn default_title_callback() -> String {
    "t".to_string()
}

fn default_output_dir() -> String {
    "router".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

// Default implementations
impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            max_parts: default_max_parts(),
            permission_callback: default_permission_callback(),
            default_title_callback: default_title_callback(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            pretty: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// A missing or empty file yields the default configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from default path (./rmenu.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("rmenu.toml")
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values the compiler cannot honor
    pub fn validate(&self) -> Result<()> {
        let max_parts = self.compiler.max_parts;
        if max_parts == 0 || max_parts > MAX_PARTS_LIMIT {
            bail!(
                "compiler.max_parts must be between 1 and {}, got {}",
                MAX_PARTS_LIMIT,
                max_parts
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.compiler.max_parts, 9);
        assert_eq!(config.compiler.permission_callback, "user_access");
        assert_eq!(config.compiler.default_title_callback, "t");
        assert_eq!(config.output.dir, "router");
        assert!(config.output.pretty);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_toml("   \n").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [compiler]
            max_parts = 12

            [output]
            dir = "build/router"
            pretty = false
        "#;
        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.compiler.max_parts, 12);
        assert_eq!(config.compiler.permission_callback, "user_access");
        assert_eq!(config.output.dir, "build/router");
        assert!(!config.output.pretty);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_file_is_default() {
        let config = Config::load("/nonexistent/rmenu.toml").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_max_parts_out_of_range() {
        let err = Config::from_toml("[compiler]\nmax_parts = 33").unwrap_err();
        assert!(err.to_string().contains("compiler.max_parts"));
        assert!(Config::from_toml("[compiler]\nmax_parts = 0").is_err());

        let config = Config::from_toml("[compiler]\nmax_parts = 32").unwrap();
        assert_eq!(config.compiler.max_parts, 32);
    }

    #[test]
    fn test_invalid_config_errors() {
        assert!(Config::from_toml("[compiler]\nmax_parts = \"many\"").is_err());
    }
}
