// orchestrator-trigger: Orchestrator Build Trigger
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! AWS CodeBuild / STS implementation of [`BuildService`].

use aws_config::BehaviorVersion;
use aws_sdk_codebuild::config::Region;
use aws_sdk_codebuild::types::{
    EnvironmentVariable, EnvironmentVariableType, ProjectSource, ProjectSourceVersion, SourceType,
};
use futures_util::future::BoxFuture;
use tracing::debug;

use super::BuildService;
use crate::dispatch::{BuildRequest, BuildResult};
use crate::error::{ServiceError, TriggerResult};

/// Build service backed by the AWS SDK.
///
/// Credentials come from the SDK's default provider chain.
#[derive(Debug, Clone)]
pub struct CodeBuildService {
    codebuild: aws_sdk_codebuild::Client,
    sts: aws_sdk_sts::Client,
}

impl CodeBuildService {
    /// Creates clients for `region` from the ambient AWS configuration.
    pub async fn from_env(region: &str) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        Self {
            codebuild: aws_sdk_codebuild::Client::new(&config),
            sts: aws_sdk_sts::Client::new(&config),
        }
    }

    async fn lookup_account(&self) -> TriggerResult<String> {
        let output = self.sts.get_caller_identity().send().await.map_err(|e| {
            ServiceError::IdentityLookup(aws_sdk_sts::error::DisplayErrorContext(&e).to_string())
        })?;
        let account = output
            .account()
            .ok_or_else(|| ServiceError::IdentityLookup("response has no account".to_string()))?;
        Ok(account.to_string())
    }

    async fn send_start_build(&self, request: &BuildRequest) -> TriggerResult<BuildResult> {
        let invalid = |e: aws_sdk_codebuild::error::BuildError| {
            ServiceError::InvalidRequest(e.to_string())
        };

        let source = ProjectSource::builder()
            .r#type(SourceType::Github)
            .location(request.source_location())
            .source_identifier(request.source_identifier())
            .build()
            .map_err(invalid)?;
        let version = ProjectSourceVersion::builder()
            .source_identifier(request.source_identifier())
            .source_version(request.source_version())
            .build()
            .map_err(invalid)?;
        let variables = request
            .environment_variables()
            .iter()
            .map(|var| {
                EnvironmentVariable::builder()
                    .name(var.name())
                    .value(var.value())
                    .r#type(EnvironmentVariableType::Plaintext)
                    .build()
                    .map_err(invalid)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut call = self
            .codebuild
            .start_build()
            .project_name(request.project_name())
            .secondary_sources_override(source)
            .secondary_sources_version_override(version)
            .set_environment_variables_override(Some(variables));
        if request.debug_session_enabled() {
            call = call.debug_session_enabled(true);
        }

        debug!(
            project = request.project_name(),
            overrides = request.environment_variables().len(),
            "calling StartBuild"
        );
        let output = call.send().await.map_err(|e| ServiceError::StartBuild {
            project: request.project_name().to_string(),
            message: aws_sdk_codebuild::error::DisplayErrorContext(&e).to_string(),
        })?;

        let build_id = output
            .build_value()
            .and_then(|build| build.id())
            .ok_or_else(|| ServiceError::MissingBuildId(request.project_name().to_string()))?;
        Ok(BuildResult::new(build_id))
    }
}

impl BuildService for CodeBuildService {
    fn caller_account(&self) -> BoxFuture<'_, TriggerResult<String>> {
        Box::pin(self.lookup_account())
    }

    fn start_build<'a>(
        &'a self,
        request: &'a BuildRequest,
    ) -> BoxFuture<'a, TriggerResult<BuildResult>> {
        Box::pin(self.send_start_build(request))
    }
}
