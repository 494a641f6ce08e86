// orchestrator-trigger: Orchestrator Build Trigger
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The `run` command: gate, discover, dispatch, notify.
//!
//! ```text
//! should_run(RUN_ENV) --no--> Skipped (exit 0, nothing sent)
//!        | yes
//!        v
//! discover_projects(scan root)
//!        |
//!        +-- dry --> DryRun(requests printed as JSON)
//!        v
//! dispatch(mode) --> notify(SLACK_WEBHOOK, builds > 0) --> Dispatched(results)
//! ```

use std::path::PathBuf;

use anyhow::Context;
use bon::Builder;
use tracing::{info, warn};

use crate::cli::run::RunArgs;
use crate::config::Settings;
use crate::context::{EnvironmentContext, should_run};
use crate::discovery::discover_projects;
use crate::dispatch::{BuildRequest, BuildResult, dispatch, plan_requests};
use crate::error::Result;
use crate::notify::Notifier;
use crate::service::{BuildService, CodeBuildService};

/// How the pipeline runs.
#[derive(Debug, Clone, Builder)]
pub struct RunOptions {
    /// Scan root; `<workspace_root>/<repo name>` when unset.
    #[builder(setters(name = with_root))]
    root: Option<PathBuf>,
    #[builder(setters(name = with_dry), default = false)]
    dry: bool,
    #[builder(setters(name = with_notify), default = true)]
    notify: bool,
}

impl RunOptions {
    #[must_use]
    pub const fn dry(&self) -> bool {
        self.dry
    }

    #[must_use]
    pub const fn notify(&self) -> bool {
        self.notify
    }

    /// Directory scanned for manifests.
    #[must_use]
    pub fn scan_root(&self, ctx: &EnvironmentContext, settings: &Settings) -> PathBuf {
        self.root
            .clone()
            .unwrap_or_else(|| settings.scan_root(ctx.repo_name()))
    }
}

/// What a pipeline run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `RUN_ENV` is not in the allow-list; nothing was sent.
    Skipped { environment: String },
    /// Requests that would have been sent.
    DryRun(Vec<BuildRequest>),
    /// Builds started, in dispatch order.
    Dispatched(Vec<BuildResult>),
}

/// Runs the trigger pipeline against `service`.
///
/// # Errors
///
/// Returns an error if the identity lookup, a build trigger or the
/// notification fails, or if dry-run requests cannot be serialized.
pub async fn run_pipeline<S>(
    ctx: &EnvironmentContext,
    settings: &Settings,
    options: &RunOptions,
    service: &S,
    notifier: &Notifier,
) -> Result<Outcome>
where
    S: BuildService + ?Sized,
{
    if !should_run(ctx.run_env(), &settings.allowed_envs) {
        println!(
            "Environment '{}' is not one of [{}]; skipping build.",
            ctx.run_env(),
            settings.allowed_envs.join(", ")
        );
        info!(environment = ctx.run_env(), "environment not allowed, skipping");
        return Ok(Outcome::Skipped {
            environment: ctx.run_env().to_string(),
        });
    }

    let root = options.scan_root(ctx, settings);
    println!(
        "Looking in {} for {} files",
        root.display(),
        settings.manifest_name
    );
    let projects = discover_projects(&root, ctx.repo_name(), &settings.manifest_name);
    info!(count = projects.len(), mode = %ctx.mode(), "projects discovered");

    if options.dry() {
        let requests = plan_requests(&projects, ctx.mode(), ctx, settings);
        let rendered = serde_json::to_string_pretty(&requests)
            .context("Failed to serialize build requests")?;
        println!("{rendered}");
        info!(requests = requests.len(), "dry run, nothing sent");
        return Ok(Outcome::DryRun(requests));
    }

    let results = dispatch(&projects, ctx.mode(), ctx, settings, service).await?;

    match ctx.slack_webhook() {
        _ if results.is_empty() => info!("no builds started, skipping notification"),
        Some(webhook) if options.notify() => {
            notifier
                .notify(ctx.repository(), ctx.sha(), ctx.run_env(), webhook)
                .await
                .context("Failed to send notification")?;
        }
        Some(_) => info!("notification disabled"),
        None => warn!("SLACK_WEBHOOK not set, skipping notification"),
    }

    Ok(Outcome::Dispatched(results))
}

/// Run the `run` command with the process environment and AWS clients.
///
/// # Errors
///
/// Returns an error if a required environment variable is missing or the
/// pipeline fails.
pub async fn run_trigger_command(
    args: &RunArgs,
    settings: &Settings,
    root: Option<PathBuf>,
    dry: bool,
) -> Result<()> {
    let ctx = EnvironmentContext::from_env()?;
    let options = RunOptions::builder()
        .maybe_with_root(root)
        .with_dry(dry)
        .with_notify(!args.skip_notify)
        .build();

    let service = CodeBuildService::from_env(&settings.region).await;
    let outcome = run_pipeline(&ctx, settings, &options, &service, &Notifier::new()).await?;

    if let Outcome::Dispatched(results) = &outcome {
        info!(builds = results.len(), "trigger complete");
    }
    Ok(())
}
