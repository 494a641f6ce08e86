// orchestrator-trigger: Orchestrator Build Trigger
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Settings loading from multiple sources.
//!
//! # Loader Pipeline
//!
//! ```text
//! SettingsLoader::new()
//!   .add_toml_file(req)
//!   .add_toml_file_optional(opt)
//!   .add_toml_str()
//!   .with_env_prefix()
//!   .set()
//!        |
//!        v
//!    build() --> Settings (validated)
//! ```

use std::path::{Path, PathBuf};

use super::Settings;
use crate::error::{ConfigError, Result};

/// Builder for loading settings from multiple sources.
pub struct SettingsLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: Option<String>,
    env_source: Option<config::Map<String, String>>,
    overrides: Vec<(String, String)>,
    files: Vec<(String, PathBuf)>,
}

impl SettingsLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            env_source: None,
            overrides: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Adds a TOML settings file to the loader.
    ///
    /// The file will be read when `build()` is called. If the file doesn't exist
    /// or contains invalid TOML, `build()` will return an error.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        use config::{File, FileFormat};
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Toml).required(true));
        self.files.push(("file".to_string(), p.to_path_buf()));
        self
    }

    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(mut self, path: P) -> Self {
        use config::{File, FileFormat};
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Toml).required(false));
        if p.exists() {
            self.files.push(("optional".to_string(), p.to_path_buf()));
        }
        self
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        use config::{File, FileFormat};
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.files
            .push(("string".to_string(), PathBuf::from("<string>")));
        self
    }

    /// Reads `<PREFIX>_*` variables as settings, e.g. `TRIGGER_REGION`.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Replaces the process environment as the source of prefixed variables.
    #[must_use]
    pub fn with_env_source(mut self, vars: config::Map<String, String>) -> Self {
        self.env_source = Some(vars);
        self
    }

    /// Sets a settings override from a `key=value` string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParseError` if the string has no `=` or an empty key.
    pub fn set_pair(mut self, pair: &str) -> Result<Self> {
        let (key, value) = pair
            .split_once('=')
            .filter(|(key, _)| !key.trim().is_empty())
            .ok_or_else(|| {
                ConfigError::ParseError(format!("expected key=value override, got '{pair}'"))
            })?;
        self.overrides
            .push((key.trim().to_string(), value.to_string()));
        Ok(self)
    }

    /// Builds the settings from all added sources.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required settings files are missing.
    /// - Settings files have invalid TOML syntax.
    /// - An override or environment variable names an unknown key.
    /// - The merged settings fail validation.
    pub fn build(self) -> Result<Settings> {
        let mut builder = match self.env_prefix {
            Some(prefix) => self.builder.add_source(
                config::Environment::with_prefix(&prefix)
                    .list_separator(",")
                    .with_list_parse_key("allowed_envs")
                    .try_parsing(true)
                    .source(self.env_source),
            ),
            None => self.builder,
        };
        for (key, value) in self.overrides {
            builder = builder
                .set_override(key.as_str(), value)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        }
        let cfg = builder
            .build()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        let settings: Settings = cfg
            .try_deserialize()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Numbered `[kind] path` lines for every file source that will be read.
    #[must_use]
    pub fn format_loaded_files(&self) -> Vec<String> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, (source, path))| format!("{}. [{}] {}", i + 1, source, path.display()))
            .collect()
    }
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}
