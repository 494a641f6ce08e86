// orchestrator-trigger: Orchestrator Build Trigger
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Build fan-out.
//!
//! ```text
//! [ProjectPath] --plan_requests(mode)--> [BuildRequest]
//!                                              |
//!          caller_account() once               | start_build() one by one
//!                 |                            v
//!                 +------------------>  console_url(account, build id)
//!
//! PerProject: N paths -> N requests, one path each
//! Batch:      N paths -> 1 request,  "a,b,c" (possibly "")
//! ```
//!
//! Requests are sent strictly in order; the first failure aborts the run.

pub mod request;

#[cfg(test)]
mod tests;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::Settings;
use crate::context::{DispatchMode, EnvironmentContext};
use crate::discovery::ProjectPath;
use crate::error::TriggerResult;
use crate::service::BuildService;

pub use request::{BuildRequest, EnvOverride, OverrideTable, PROJECT_PATH_LIST};

/// Build started by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildResult {
    build_id: String,
}

impl BuildResult {
    #[must_use]
    pub fn new(build_id: impl Into<String>) -> Self {
        Self {
            build_id: build_id.into(),
        }
    }

    /// Opaque id assigned by the build service.
    #[must_use]
    pub fn build_id(&self) -> &str {
        &self.build_id
    }
}

/// Console link for a started build.
#[must_use]
pub fn console_url(account_id: &str, project_name: &str, build_id: &str, region: &str) -> String {
    format!(
        "https://console.aws.amazon.com/codesuite/codebuild/{account_id}/projects/{project_name}/build/{build_id}/?region={region}"
    )
}

/// Turns discovered projects into the requests `mode` calls for.
#[must_use]
pub fn plan_requests(
    projects: &[ProjectPath],
    mode: DispatchMode,
    ctx: &EnvironmentContext,
    settings: &Settings,
) -> Vec<BuildRequest> {
    match mode {
        DispatchMode::PerProject => projects
            .iter()
            .map(|project| BuildRequest::new(ctx, settings, std::slice::from_ref(project)))
            .collect(),
        DispatchMode::Batch => vec![BuildRequest::new(ctx, settings, projects)],
    }
}

/// Prints the banner announcing how builds will be fanned out.
pub fn announce_mode(mode: DispatchMode) {
    match mode {
        DispatchMode::PerProject => println!("\n[*] Executing parallelized project build!"),
        DispatchMode::Batch => {
            println!("\n[*] Executing standard (non-parallelized) project build!");
        }
    }
}

/// Starts the builds for `projects` and prints a console link for each.
///
/// The caller account is looked up once before any build is started.
///
/// # Errors
///
/// Returns the first `ServiceError` from the identity lookup or a build
/// trigger; no further requests are sent after a failure.
pub async fn dispatch<S>(
    projects: &[ProjectPath],
    mode: DispatchMode,
    ctx: &EnvironmentContext,
    settings: &Settings,
    service: &S,
) -> TriggerResult<Vec<BuildResult>>
where
    S: BuildService + ?Sized,
{
    let account_id = service.caller_account().await?;
    debug!(account_id = %account_id, "resolved caller account");

    announce_mode(mode);

    let requests = plan_requests(projects, mode, ctx, settings);
    info!(%mode, requests = requests.len(), projects = projects.len(), "dispatching builds");

    let mut results = Vec::with_capacity(requests.len());
    for request in &requests {
        let label = match mode {
            DispatchMode::PerProject => {
                let path = request
                    .project_paths()
                    .first()
                    .map_or("", ProjectPath::as_str);
                println!("Passing in project path: {path}");
                format!("Project: {path}\n")
            }
            DispatchMode::Batch => "Deploying full project as one build".to_string(),
        };

        let result = service.start_build(request).await?;
        info!(build_id = result.build_id(), "build started");

        println!("{label}");
        println!(
            "Build: {}\n",
            console_url(
                &account_id,
                request.project_name(),
                result.build_id(),
                &settings.region
            )
        );
        results.push(result);
    }

    Ok(results)
}
