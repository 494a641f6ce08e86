// orchestrator-trigger: Orchestrator Build Trigger
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Trigger settings.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. trigger.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. TRIGGER_* env vars
//! 5. --set key=value
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! TRIGGER_PROJECT_NAME=orchestrator  → project_name
//! TRIGGER_REGION=eu-west-1           → region
//! TRIGGER_ALLOWED_ENVS=dev,qa        → allowed_envs = ["dev", "qa"]
//! ```
//!
//! These are settings of the trigger itself. The CI inputs (`GITHUB_*`,
//! `RUN_ENV`, ...) live in [`crate::context::EnvironmentContext`].

pub mod loader;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::context::DEFAULT_ALLOWED_ENVS;
use crate::error::{ConfigError, TriggerResult};

use loader::SettingsLoader;

/// Default settings file looked up in the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "trigger.toml";

/// Complete trigger settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Build service project every request targets.
    pub project_name: String,
    /// AWS region for the clients and the console link.
    pub region: String,
    /// Directory containing the checkout; the scan root is `<this>/<repo name>`.
    ///
    /// The default is the runner's work directory, one level above the
    /// `actions/checkout` default of `/home/runner/work/<repo>/<repo>`. With it,
    /// a manifest at `<checkout>/svcA/config.json` is reported as
    /// `<repo>/<repo>/svcA`. Point this at `/home/runner/work/<repo>` (or pass
    /// `--root`) to scan the checkout itself.
    pub workspace_root: PathBuf,
    /// File name marking a sub-project.
    pub manifest_name: String,
    /// Deployment environments allowed to dispatch.
    pub allowed_envs: Vec<String>,
    /// Identifier of the secondary source carrying the triggering repository.
    pub source_identifier: String,
    /// `RELEASE_CHANNEL` value when the environment leaves it empty.
    pub default_release_channel: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            project_name: "orchestrator".to_string(),
            region: "us-east-1".to_string(),
            workspace_root: PathBuf::from("/home/runner/work"),
            manifest_name: "config.json".to_string(),
            allowed_envs: DEFAULT_ALLOWED_ENVS.iter().map(ToString::to_string).collect(),
            source_identifier: "git_project".to_string(),
            default_release_channel: "master".to_string(),
        }
    }
}

impl Settings {
    /// Create a new settings loader.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use orchestrator_trigger::config::Settings;
    ///
    /// let settings = Settings::builder()
    ///     .add_toml_file_optional("trigger.toml")
    ///     .with_env_prefix("TRIGGER")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> SettingsLoader {
        SettingsLoader::new()
    }

    /// Load settings from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML, does not match the
    /// `Settings` structure, or fails validation.
    pub fn parse(content: &str) -> crate::error::Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Directory scanned for manifests of `repo_name`.
    #[must_use]
    pub fn scan_root(&self, repo_name: &str) -> PathBuf {
        self.workspace_root.join(repo_name)
    }

    /// Validate settings after all sources are merged.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParseError` when a key the trigger cannot work
    /// without is empty.
    pub fn validate(&self) -> TriggerResult<()> {
        let required = [
            ("project_name", self.project_name.as_str()),
            ("region", self.region.as_str()),
            ("manifest_name", self.manifest_name.as_str()),
            ("source_identifier", self.source_identifier.as_str()),
            ("default_release_channel", self.default_release_channel.as_str()),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::ParseError(format!("'{key}' must not be empty")).into());
            }
        }
        if self.manifest_name.contains(['/', '\\']) {
            return Err(ConfigError::ParseError(format!(
                "'manifest_name' must be a file name, got '{}'",
                self.manifest_name
            ))
            .into());
        }
        if self.workspace_root.as_os_str().is_empty() {
            return Err(ConfigError::ParseError("'workspace_root' must not be empty".into()).into());
        }
        Ok(())
    }

    /// Format settings for display, one `key = value` line each.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        options.insert("project_name", self.project_name.clone());
        options.insert("region", self.region.clone());
        options.insert("workspace_root", self.workspace_root.display().to_string());
        options.insert("manifest_name", self.manifest_name.clone());
        options.insert("allowed_envs", self.allowed_envs.join(","));
        options.insert("source_identifier", self.source_identifier.clone());
        options.insert(
            "default_release_channel",
            self.default_release_channel.clone(),
        );

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
