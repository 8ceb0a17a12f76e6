//! Organizer configuration.
//!
//! Configuration is fixed at startup and handed to the organizer as a value.
//! It can be read from a TOML file:
//!
//! ```toml
//! [organize]
//! use_category_subfolders = true
//! sanitize_filenames = true
//! collision_policy = "time-prefix"
//!
//! [media]
//! pictures = [".tiff"]
//! videos = [".m4v"]
//!
//! [filters]
//! enable_hidden_files = false
//!
//! [filters.exclude]
//! filenames = ["Thumbs.db"]
//! patterns = ["*_draft.*"]
//! regex = []
//! ```
//!
//! Every section and key is optional; missing values take the defaults shown.

use crate::file_category::{MediaCategory, MediaTable};
use glob::Pattern;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading or compiling configuration.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    #[error("Configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),
    /// Invalid glob pattern provided.
    #[error("Invalid glob pattern '{pattern}': {reason}")]
    InvalidGlobPattern { pattern: String, reason: String },
    /// Invalid regex pattern provided.
    #[error("Invalid regex pattern '{pattern}': {reason}")]
    InvalidRegexPattern { pattern: String, reason: String },
    /// IO error while reading configuration.
    #[error("IO error reading configuration: {0}")]
    IoError(String),
}

/// What to do when the time-prefixed name is also taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// Prefix `HHMMSS_` once. A second clash fails that file instead of overwriting.
    #[default]
    TimePrefix,
    /// Prefix `HHMMSS_`, then append `_2`, `_3`, ... to the stem until a name is free.
    #[value(name = "counter")]
    TimePrefixThenCounter,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub organize: OrganizeOptions,
    #[serde(default)]
    pub media: MediaExtensions,
    #[serde(default)]
    pub filters: FilterRules,
}

/// Layout and naming options.
#[derive(Debug, Clone, Deserialize)]
pub struct OrganizeOptions {
    /// Put files under `pictures/` or `videos/` before the date folder.
    #[serde(default = "default_true")]
    pub use_category_subfolders: bool,
    /// Rewrite names to lowercase ASCII snake case.
    #[serde(default = "default_true")]
    pub sanitize_filenames: bool,
    #[serde(default)]
    pub collision_policy: CollisionPolicy,
}

impl Default for OrganizeOptions {
    fn default() -> Self {
        Self {
            use_category_subfolders: true,
            sanitize_filenames: true,
            collision_policy: CollisionPolicy::default(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Extensions added to the built-in media table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaExtensions {
    #[serde(default)]
    pub pictures: Vec<String>,
    #[serde(default)]
    pub videos: Vec<String>,
}

impl MediaExtensions {
    /// Builds the media table: built-in entries plus configured extras.
    pub fn build_table(&self) -> MediaTable {
        let mut table = MediaTable::default();
        for ext in &self.pictures {
            table.add_extension(ext, MediaCategory::Picture);
        }
        for ext in &self.videos {
            table.add_extension(ext, MediaCategory::Video);
        }
        table
    }
}

/// Rules for leaving files alone even if they are media.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterRules {
    /// Whether to include hidden files (starting with "."). Defaults to false.
    #[serde(default)]
    pub enable_hidden_files: bool,

    #[serde(default)]
    pub exclude: ExcludeRules,
}

/// Rules for excluding files from organization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExcludeRules {
    /// Exact filenames to exclude.
    #[serde(default)]
    pub filenames: Vec<String>,

    /// Glob patterns matched against the file name.
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Regex patterns matched against the file name.
    #[serde(default)]
    pub regex: Vec<String>,
}

impl Config {
    /// Load configuration from a file, with fallback to defaults.
    ///
    /// Attempts to load configuration in the following order:
    /// 1. If `config_path` is provided, load from that file
    /// 2. Look for `.mediatidyrc.toml` in the current directory
    /// 3. Look for `~/.config/mediatidy/config.toml` in home directory
    /// 4. Fall back to default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is explicitly provided but cannot be read,
    /// or if any discovered file is malformed.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(".mediatidyrc.toml");
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("mediatidy")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }
}

impl FilterRules {
    /// Compile rules into matchers.
    ///
    /// # Errors
    ///
    /// Returns an error if any regex or glob patterns are invalid.
    pub fn compile(&self) -> Result<CompiledFilters, ConfigError> {
        CompiledFilters::new(self)
    }
}

/// Pre-compiled filter rules.
#[derive(Debug, Clone)]
pub struct CompiledFilters {
    enable_hidden_files: bool,
    exclude_filenames: HashSet<String>,
    exclude_patterns: Vec<Pattern>,
    exclude_regexes: Vec<Regex>,
}

impl CompiledFilters {
    fn new(rules: &FilterRules) -> Result<Self, ConfigError> {
        let exclude_patterns = rules
            .exclude
            .patterns
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|e| ConfigError::InvalidGlobPattern {
                    pattern: pattern.clone(),
                    reason: e.msg.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let exclude_regexes = rules
            .exclude
            .regex
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ConfigError::InvalidRegexPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            enable_hidden_files: rules.enable_hidden_files,
            exclude_filenames: rules.exclude.filenames.iter().cloned().collect(),
            exclude_patterns,
            exclude_regexes,
        })
    }

    /// Returns true if a file with this name may be organized.
    ///
    /// Checks, in order: hidden files, exact names, glob patterns, regexes.
    pub fn should_include(&self, file_name: &str) -> bool {
        if !self.enable_hidden_files && file_name.starts_with('.') {
            return false;
        }

        if self.exclude_filenames.contains(file_name) {
            return false;
        }

        if self
            .exclude_patterns
            .iter()
            .any(|pattern| pattern.matches(file_name))
        {
            return false;
        }

        !self
            .exclude_regexes
            .iter()
            .any(|regex| regex.is_match(file_name))
    }
}
