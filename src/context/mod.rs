// orchestrator-trigger: Orchestrator Build Trigger
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CI environment captured once at startup.
//!
//! ```text
//! process env / map --> EnvironmentContext::from_lookup()
//!                           |
//!        +------------------+------------------+
//!        v                  v                  v
//!   required (6)       optional (7)      derived
//!   GITHUB_*, RUN_ENV  DEBUG, tokens..   repo_name, DispatchMode
//! ```
//!
//! Empty strings are treated exactly like unset variables: a required
//! variable that is empty is missing, an optional one is `None`.

use std::collections::HashMap;
use std::fmt;

use crate::error::{ConfigError, TriggerResult};

/// Environments a build may be dispatched for when no allow-list is configured.
pub const DEFAULT_ALLOWED_ENVS: [&str; 4] = ["dev", "qa", "uat", "prod"];

/// Fan-out mode for build requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// One build per discovered project.
    PerProject,
    /// One build carrying every project path.
    Batch,
}

impl DispatchMode {
    /// Maps the `PARALLELIZE` switch onto a mode.
    #[must_use]
    pub const fn from_parallelize(parallelize: bool) -> Self {
        if parallelize {
            Self::PerProject
        } else {
            Self::Batch
        }
    }
}

impl fmt::Display for DispatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PerProject => write!(f, "per-project"),
            Self::Batch => write!(f, "batch"),
        }
    }
}

/// Returns true iff `environment_name` is exactly one of `allow_list`.
///
/// Comparison is case-sensitive; an empty name never matches unless the
/// allow-list itself contains an empty entry.
#[must_use]
pub fn should_run<S: AsRef<str>>(environment_name: &str, allow_list: &[S]) -> bool {
    allow_list
        .iter()
        .any(|allowed| allowed.as_ref() == environment_name)
}

/// Splits `owner/repo` into its two halves.
///
/// # Errors
///
/// Returns `ConfigError::InvalidVar` unless the value has a non-empty owner
/// and a non-empty repository name separated by `/`.
pub fn split_repository(repository: &str) -> TriggerResult<(&str, &str)> {
    match repository.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok((owner, name))
        }
        _ => Err(ConfigError::InvalidVar {
            name: "GITHUB_REPOSITORY".to_string(),
            message: format!("expected 'owner/repo', got '{repository}'"),
        }
        .into()),
    }
}

/// Everything the trigger reads from the CI environment.
#[derive(Clone, PartialEq, Eq)]
pub struct EnvironmentContext {
    repository: String,
    repo_name: String,
    sha: String,
    git_ref: String,
    run_number: String,
    actor: String,
    run_env: String,
    parallelize: bool,
    debug: Option<String>,
    gemfury_token: Option<String>,
    argo_skip_envs: Option<String>,
    argo_notification_webhook: Option<String>,
    slack_webhook: Option<String>,
    release_channel: Option<String>,
}

impl EnvironmentContext {
    /// Reads the context from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the first required variable that is
    /// unset or empty, or describing a malformed `GITHUB_REPOSITORY`.
    pub fn from_env() -> TriggerResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the context from an explicit variable map.
    ///
    /// # Errors
    ///
    /// Same as [`EnvironmentContext::from_env`].
    pub fn from_map(vars: &HashMap<String, String>) -> TriggerResult<Self> {
        Self::from_lookup(|name| vars.get(name).cloned())
    }

    /// Reads the context through an arbitrary lookup function.
    ///
    /// # Errors
    ///
    /// Same as [`EnvironmentContext::from_env`].
    pub fn from_lookup<F>(lookup: F) -> TriggerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |name: &str| lookup(name).filter(|value| !value.is_empty());
        let required = |name: &str| {
            optional(name).ok_or_else(|| ConfigError::MissingVar(name.to_string()))
        };

        let repository = required("GITHUB_REPOSITORY")?;
        let repo_name = split_repository(&repository)?.1.to_string();

        Ok(Self {
            repo_name,
            sha: required("GITHUB_SHA")?,
            git_ref: required("GITHUB_REF")?,
            run_number: required("GITHUB_RUN_NUMBER")?,
            actor: required("GITHUB_ACTOR")?,
            run_env: required("RUN_ENV")?,
            parallelize: optional("PARALLELIZE").is_some(),
            debug: optional("DEBUG"),
            gemfury_token: optional("GEMFURY_TOKEN"),
            argo_skip_envs: optional("ARGO_SKIP_ENVS"),
            argo_notification_webhook: optional("ARGO_NOTIFICATION_WEBHOOK"),
            slack_webhook: optional("SLACK_WEBHOOK"),
            release_channel: optional("RELEASE_CHANNEL"),
            repository,
        })
    }

    /// `owner/repo` as given by `GITHUB_REPOSITORY`.
    #[must_use]
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// Repository name without the owner.
    #[must_use]
    pub fn repo_name(&self) -> &str {
        &self.repo_name
    }

    /// Triggering revision.
    #[must_use]
    pub fn sha(&self) -> &str {
        &self.sha
    }

    #[must_use]
    pub fn git_ref(&self) -> &str {
        &self.git_ref
    }

    #[must_use]
    pub fn run_number(&self) -> &str {
        &self.run_number
    }

    #[must_use]
    pub fn actor(&self) -> &str {
        &self.actor
    }

    /// Deployment environment name used for gating.
    #[must_use]
    pub fn run_env(&self) -> &str {
        &self.run_env
    }

    /// Fan-out mode selected by `PARALLELIZE`.
    #[must_use]
    pub const fn mode(&self) -> DispatchMode {
        DispatchMode::from_parallelize(self.parallelize)
    }

    #[must_use]
    pub fn debug(&self) -> Option<&str> {
        self.debug.as_deref()
    }

    #[must_use]
    pub fn gemfury_token(&self) -> Option<&str> {
        self.gemfury_token.as_deref()
    }

    #[must_use]
    pub fn argo_skip_envs(&self) -> Option<&str> {
        self.argo_skip_envs.as_deref()
    }

    #[must_use]
    pub fn argo_notification_webhook(&self) -> Option<&str> {
        self.argo_notification_webhook.as_deref()
    }

    #[must_use]
    pub fn slack_webhook(&self) -> Option<&str> {
        self.slack_webhook.as_deref()
    }

    /// Release channel as set in the environment, if any.
    #[must_use]
    pub fn release_channel(&self) -> Option<&str> {
        self.release_channel.as_deref()
    }
}

impl fmt::Debug for EnvironmentContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hidden = |value: &Option<String>| value.as_ref().map(|_| "[hidden]");
        f.debug_struct("EnvironmentContext")
            .field("repository", &self.repository)
            .field("sha", &self.sha)
            .field("git_ref", &self.git_ref)
            .field("run_number", &self.run_number)
            .field("actor", &self.actor)
            .field("run_env", &self.run_env)
            .field("mode", &self.mode())
            .field("debug", &self.debug)
            .field("gemfury_token", &hidden(&self.gemfury_token))
            .field("argo_skip_envs", &self.argo_skip_envs)
            .field(
                "argo_notification_webhook",
                &hidden(&self.argo_notification_webhook),
            )
            .field("slack_webhook", &hidden(&self.slack_webhook))
            .field("release_channel", &self.release_channel)
            .finish()
    }
}

#[cfg(test)]
mod tests;
