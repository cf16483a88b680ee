//! Configuration model for classdiff.
//!
//! This module defines the Config struct that represents an optional
//! `classdiff.yaml` in the working directory. It supports forward-compatible
//! YAML parsing (unknown fields are ignored), sensible defaults for every
//! field, and validation of config values. With no file present, the
//! defaults match the conventional Maven Java project layout.

use crate::error::{ClassDiffError, Result};
use crate::extension::DIFF_CLASSES_PROPERTY;
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the optional config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "classdiff.yaml";

/// Configuration for the diff resolver.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source file extension to keep, with leading dot (default: ".java").
    pub source_extension: String,

    /// Compiled-artifact extension substituted for the source extension
    /// (default: ".class").
    pub class_extension: String,

    /// Production-source root segment stripped from matched paths
    /// (default: "src/main/java/").
    pub source_root: String,

    /// Test-source root segment; paths containing it are dropped
    /// (default: "src/test/java").
    pub test_root: String,

    /// Property key the joined class list is published under
    /// (default: "git.diff.classes").
    pub property_key: String,

    /// Symbolic ref resolved to find the default branch
    /// (default: "refs/remotes/origin/HEAD").
    pub remote_head_ref: String,

    /// Paths matching any of these globs are dropped from the diff
    /// (default: none).
    pub exclude_globs: Vec<String>,

    /// Wall-clock limit for git subprocesses, in seconds. Unset means no
    /// limit: a hung subprocess hangs the invocation.
    pub command_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_extension: ".java".to_string(),
            class_extension: ".class".to_string(),
            source_root: "src/main/java/".to_string(),
            test_root: "src/test/java".to_string(),
            property_key: DIFF_CLASSES_PROPERTY.to_string(),
            remote_head_ref: "refs/remotes/origin/HEAD".to_string(),
            exclude_globs: Vec::new(),
            command_timeout_secs: None,
        }
    }
}

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(ClassDiffError::User)` - Read error, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            ClassDiffError::User(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| ClassDiffError::User(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load `classdiff.yaml` from `dir` when present, defaults otherwise.
    pub fn load_or_default<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let path = dir.as_ref().join(CONFIG_FILE_NAME);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate config values and return an error on invalid values.
    ///
    /// Validation rules:
    /// - extensions must start with a dot and have a non-empty stem
    /// - root segments, property key, and remote head ref must be non-empty
    /// - exclude globs must compile
    /// - `command_timeout_secs` must be positive when present
    pub fn validate(&self) -> Result<()> {
        validate_extension("source_extension", &self.source_extension)?;
        validate_extension("class_extension", &self.class_extension)?;
        validate_non_empty("source_root", &self.source_root)?;
        validate_non_empty("test_root", &self.test_root)?;
        validate_non_empty("property_key", &self.property_key)?;
        validate_non_empty("remote_head_ref", &self.remote_head_ref)?;

        if self.command_timeout_secs == Some(0) {
            return Err(ClassDiffError::User(
                "config validation failed: command_timeout_secs must be greater than 0"
                    .to_string(),
            ));
        }

        self.exclude_globset()?;
        Ok(())
    }

    /// Compile the exclude globs into a matcher.
    pub fn exclude_globset(&self) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude_globs {
            let glob = Glob::new(pattern).map_err(|e| {
                ClassDiffError::User(format!(
                    "config validation failed: invalid exclude glob '{}': {}",
                    pattern, e
                ))
            })?;
            builder.add(glob);
        }
        builder
            .build()
            .map_err(|e| ClassDiffError::User(format!("failed to build exclude glob set: {}", e)))
    }
}

fn validate_extension(field: &str, value: &str) -> Result<()> {
    if !value.starts_with('.') || value.len() < 2 {
        return Err(ClassDiffError::User(format!(
            "config validation failed: {} must be a dotted extension like \".java\" (got '{}')",
            field, value
        )));
    }
    Ok(())
}

fn validate_non_empty(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ClassDiffError::User(format!(
            "config validation failed: {} must be non-empty",
            field
        )));
    }
    Ok(())
}
