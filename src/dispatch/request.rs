// orchestrator-trigger: Orchestrator Build Trigger
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Build request assembly.
//!
//! ```text
//! EnvironmentContext + Settings + [ProjectPath]
//!            |
//!            v
//!      OverrideTable   (name, slot) in fixed order
//!            |  into_overrides(): drop absent optionals
//!            v
//!      BuildRequest    serializable, handed to BuildService
//! ```

use serde::Serialize;

use crate::config::Settings;
use crate::context::EnvironmentContext;
use crate::discovery::{ProjectPath, join_paths};

/// Name of the override carrying the project path list.
pub const PROJECT_PATH_LIST: &str = "PROJECT_PATH_LIST";

/// One plaintext environment variable injected into the triggered build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvOverride {
    name: String,
    value: String,
}

impl EnvOverride {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Ordered table of candidate overrides.
///
/// Optional entries with no value or an empty value are dropped when the
/// table is serialized, never sent as empty strings. Required entries are
/// always sent, even when empty.
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    entries: Vec<(&'static str, Slot)>,
}

#[derive(Debug, Clone)]
enum Slot {
    Always(String),
    IfPresent(Option<String>),
}

impl OverrideTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry that is always sent.
    #[must_use]
    pub fn required(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.entries.push((name, Slot::Always(value.into())));
        self
    }

    /// Adds an entry that is only sent when `value` is present and non-empty.
    #[must_use]
    pub fn optional(mut self, name: &'static str, value: Option<&str>) -> Self {
        self.entries
            .push((name, Slot::IfPresent(value.map(str::to_string))));
        self
    }

    /// Serializes the table, skipping absent optional entries.
    #[must_use]
    pub fn into_overrides(self) -> Vec<EnvOverride> {
        self.entries
            .into_iter()
            .filter_map(|(name, slot)| {
                let value = match slot {
                    Slot::Always(value) => Some(value),
                    Slot::IfPresent(value) => value.filter(|value| !value.is_empty()),
                };
                value.map(|value| EnvOverride::new(name, value))
            })
            .collect()
    }
}

/// Request to start one build of the orchestrator project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildRequest {
    project_name: String,
    source_location: String,
    source_identifier: String,
    source_version: String,
    environment_variables: Vec<EnvOverride>,
    debug_session_enabled: bool,
    #[serde(skip)]
    project_paths: Vec<ProjectPath>,
}

impl BuildRequest {
    /// Builds the request covering `paths`.
    ///
    /// `paths` holds one entry in per-project mode and every discovered
    /// project in batch mode; it may be empty.
    #[must_use]
    pub fn new(ctx: &EnvironmentContext, settings: &Settings, paths: &[ProjectPath]) -> Self {
        let release_channel = ctx
            .release_channel()
            .unwrap_or(settings.default_release_channel.as_str());

        let environment_variables = OverrideTable::new()
            .required("GIT_REF", ctx.git_ref())
            .required("RUN_NUMBER", ctx.run_number())
            .required("GIT_ACTOR", ctx.actor())
            .required("GIT_REPOSITORY", ctx.repository())
            .required("GIT_COMMIT_SHA", ctx.sha())
            .required("RUN_ENV", ctx.run_env())
            .required(PROJECT_PATH_LIST, join_paths(paths))
            .required("RELEASE_CHANNEL", release_channel)
            .optional("SLACK_WEBHOOK", ctx.slack_webhook())
            .optional("DEBUG", ctx.debug())
            .optional("GEMFURY_TOKEN", ctx.gemfury_token())
            .optional("ARGO_SKIP_ENVS", ctx.argo_skip_envs())
            .optional("ARGO_NOTIFICATION_WEBHOOK", ctx.argo_notification_webhook())
            .into_overrides();

        Self {
            project_name: settings.project_name.clone(),
            source_location: format!("https://github.com/{}", ctx.repository()),
            source_identifier: settings.source_identifier.clone(),
            source_version: ctx.sha().to_string(),
            environment_variables,
            debug_session_enabled: ctx.debug().is_some(),
            project_paths: paths.to_vec(),
        }
    }

    /// Build service project the request targets.
    #[must_use]
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Repository URL attached as secondary source.
    #[must_use]
    pub fn source_location(&self) -> &str {
        &self.source_location
    }

    #[must_use]
    pub fn source_identifier(&self) -> &str {
        &self.source_identifier
    }

    /// Revision the secondary source is pinned to.
    #[must_use]
    pub fn source_version(&self) -> &str {
        &self.source_version
    }

    #[must_use]
    pub fn environment_variables(&self) -> &[EnvOverride] {
        &self.environment_variables
    }

    #[must_use]
    pub const fn debug_session_enabled(&self) -> bool {
        self.debug_session_enabled
    }

    /// Projects covered by this request.
    #[must_use]
    pub fn project_paths(&self) -> &[ProjectPath] {
        &self.project_paths
    }

    /// Value of the named override, if it is sent.
    #[must_use]
    pub fn override_value(&self, name: &str) -> Option<&str> {
        self.environment_variables
            .iter()
            .find(|o| o.name() == name)
            .map(EnvOverride::value)
    }
}
