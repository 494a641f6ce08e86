// orchestrator-trigger: Orchestrator Build Trigger
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{
    BuildRequest, BuildResult, OverrideTable, PROJECT_PATH_LIST, console_url, dispatch,
    plan_requests,
};
use crate::config::Settings;
use crate::context::{DispatchMode, EnvironmentContext};
use crate::discovery::ProjectPath;
use crate::error::{ServiceError, TriggerError, TriggerResult};
use crate::service::BuildService;
use futures_util::future::BoxFuture;
use std::collections::HashMap;
use std::sync::Mutex;

/// Records every request and answers with sequential build ids.
#[derive(Default)]
struct RecordingService {
    requests: Mutex<Vec<BuildRequest>>,
    identity_calls: Mutex<usize>,
    fail_identity: bool,
    fail_on_call: Option<usize>,
}

impl RecordingService {
    fn requests(&self) -> Vec<BuildRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl BuildService for RecordingService {
    fn caller_account(&self) -> BoxFuture<'_, TriggerResult<String>> {
        Box::pin(async move {
            *self.identity_calls.lock().unwrap() += 1;
            if self.fail_identity {
                return Err(ServiceError::IdentityLookup("expired token".to_string()).into());
            }
            Ok("123456789012".to_string())
        })
    }

    fn start_build<'a>(
        &'a self,
        request: &'a BuildRequest,
    ) -> BoxFuture<'a, TriggerResult<BuildResult>> {
        Box::pin(async move {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            let call = requests.len();
            if self.fail_on_call == Some(call) {
                return Err(ServiceError::StartBuild {
                    project: request.project_name().to_string(),
                    message: "throttled".to_string(),
                }
                .into());
            }
            Ok(BuildResult::new(format!("orchestrator:build-{call}")))
        })
    }
}

fn context(extra: &[(&str, &str)]) -> EnvironmentContext {
    let mut vars: HashMap<String, String> = [
        ("GITHUB_REPOSITORY", "acme/widgets"),
        ("GITHUB_SHA", "0123456789abcdef0123456789abcdef01234567"),
        ("GITHUB_REF", "refs/heads/main"),
        ("GITHUB_RUN_NUMBER", "42"),
        ("GITHUB_ACTOR", "octocat"),
        ("RUN_ENV", "qa"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    for (k, v) in extra {
        vars.insert((*k).to_string(), (*v).to_string());
    }
    EnvironmentContext::from_map(&vars).unwrap()
}

fn paths(names: &[&str]) -> Vec<ProjectPath> {
    names.iter().map(|n| ProjectPath::new(*n)).collect()
}

fn override_names(request: &BuildRequest) -> Vec<&str> {
    request
        .environment_variables()
        .iter()
        .map(super::EnvOverride::name)
        .collect()
}

#[test]
fn test_batch_plans_exactly_one_request() {
    let ctx = context(&[]);
    let settings = Settings::default();

    for projects in [
        paths(&[]),
        paths(&["widgets/svcA"]),
        paths(&["widgets/svcA", "widgets/svcB", "widgets/svcC"]),
    ] {
        let requests = plan_requests(&projects, DispatchMode::Batch, &ctx, &settings);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].project_paths(), projects.as_slice());
    }

    let requests = plan_requests(&paths(&[]), DispatchMode::Batch, &ctx, &settings);
    assert_eq!(requests[0].override_value(PROJECT_PATH_LIST), Some(""));
}

#[test]
fn test_per_project_plans_one_request_per_path() {
    let ctx = context(&[]);
    let settings = Settings::default();
    let projects = paths(&["widgets/svcA", "widgets/svcB"]);

    let requests = plan_requests(&projects, DispatchMode::PerProject, &ctx, &settings);

    let values: Vec<_> = requests
        .iter()
        .map(|r| r.override_value(PROJECT_PATH_LIST).unwrap())
        .collect();
    assert_eq!(values, vec!["widgets/svcA", "widgets/svcB"]);

    assert!(
        plan_requests(&[], DispatchMode::PerProject, &ctx, &settings).is_empty()
    );
}

#[test]
fn test_request_fixed_fields() {
    let ctx = context(&[]);
    let settings = Settings::default();
    let request = BuildRequest::new(&ctx, &settings, &paths(&["widgets/svcA", "widgets/svcB"]));

    assert_eq!(request.project_name(), "orchestrator");
    assert_eq!(request.source_location(), "https://github.com/acme/widgets");
    assert_eq!(request.source_identifier(), "git_project");
    assert_eq!(
        request.source_version(),
        "0123456789abcdef0123456789abcdef01234567"
    );
    assert!(!request.debug_session_enabled());
    assert_eq!(
        override_names(&request),
        vec![
            "GIT_REF",
            "RUN_NUMBER",
            "GIT_ACTOR",
            "GIT_REPOSITORY",
            "GIT_COMMIT_SHA",
            "RUN_ENV",
            "PROJECT_PATH_LIST",
            "RELEASE_CHANNEL",
        ]
    );
    assert_eq!(
        request.override_value(PROJECT_PATH_LIST),
        Some("widgets/svcA,widgets/svcB")
    );
    assert_eq!(request.override_value("RELEASE_CHANNEL"), Some("master"));
}

#[test]
fn test_optional_overrides_present_only_when_set() {
    let settings = Settings::default();
    let optional = [
        ("SLACK_WEBHOOK", "https://hooks.example.com/T/B/X"),
        ("DEBUG", "1"),
        ("GEMFURY_TOKEN", "fury-token"),
        ("ARGO_SKIP_ENVS", "uat,prod"),
        ("ARGO_NOTIFICATION_WEBHOOK", "https://argo.example.com/hook"),
    ];

    let all_set = BuildRequest::new(&context(&optional), &settings, &[]);
    for (name, value) in optional {
        assert_eq!(all_set.override_value(name), Some(value), "{name}");
    }
    assert!(all_set.debug_session_enabled());

    let empty: Vec<(&str, &str)> = optional.iter().map(|(name, _)| (*name, "")).collect();
    let all_empty = BuildRequest::new(&context(&empty), &settings, &[]);
    for (name, _) in optional {
        assert_eq!(all_empty.override_value(name), None, "{name}");
    }
    assert!(!all_empty.debug_session_enabled());
    assert!(
        all_empty
            .environment_variables()
            .iter()
            .all(|o| o.name() == PROJECT_PATH_LIST || !o.value().is_empty())
    );
}

#[test]
fn test_release_channel_from_env_or_default() {
    let mut settings = Settings::default();
    let ctx = context(&[("RELEASE_CHANNEL", "beta")]);
    assert_eq!(
        BuildRequest::new(&ctx, &settings, &[]).override_value("RELEASE_CHANNEL"),
        Some("beta")
    );

    settings.default_release_channel = "main".to_string();
    let ctx = context(&[("RELEASE_CHANNEL", "")]);
    assert_eq!(
        BuildRequest::new(&ctx, &settings, &[]).override_value("RELEASE_CHANNEL"),
        Some("main")
    );
}

#[test]
fn test_override_table_skips_absent_optionals() {
    let overrides = OverrideTable::new()
        .required("A", "")
        .optional("B", None)
        .optional("C", Some(""))
        .optional("D", Some("d"))
        .into_overrides();

    let rendered: Vec<_> = overrides
        .iter()
        .map(|o| format!("{}={}", o.name(), o.value()))
        .collect();
    assert_eq!(rendered, vec!["A=", "D=d"]);
}

#[test]
fn test_request_serializes_camel_case() {
    let ctx = context(&[("DEBUG", "true")]);
    let request = BuildRequest::new(&ctx, &Settings::default(), &paths(&["widgets/svcA"]));
    let json = serde_json::to_value(&request).unwrap();

    assert_eq!(json["projectName"], "orchestrator");
    assert_eq!(json["sourceIdentifier"], "git_project");
    assert_eq!(json["debugSessionEnabled"], true);
    assert_eq!(json["environmentVariables"][0]["name"], "GIT_REF");
    assert!(json.get("projectPaths").is_none());
}

#[test]
fn test_console_url() {
    insta::assert_snapshot!(
        console_url("123456789012", "orchestrator", "orchestrator:abc", "us-east-1"),
        @"https://console.aws.amazon.com/codesuite/codebuild/123456789012/projects/orchestrator/build/orchestrator:abc/?region=us-east-1"
    );
}

#[tokio::test]
async fn test_dispatch_batch_sends_one_request() {
    let service = RecordingService::default();
    let projects = paths(&["widgets/svcA", "widgets/svcB"]);

    let results = dispatch(
        &projects,
        DispatchMode::Batch,
        &context(&[]),
        &Settings::default(),
        &service,
    )
    .await
    .unwrap();

    assert_eq!(results, vec![BuildResult::new("orchestrator:build-1")]);
    let sent = service.requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0].override_value(PROJECT_PATH_LIST),
        Some("widgets/svcA,widgets/svcB")
    );
    assert_eq!(*service.identity_calls.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_dispatch_per_project_in_order() {
    let service = RecordingService::default();
    let projects = paths(&["widgets/a", "widgets/b", "widgets/c"]);

    let results = dispatch(
        &projects,
        DispatchMode::PerProject,
        &context(&[("PARALLELIZE", "1")]),
        &Settings::default(),
        &service,
    )
    .await
    .unwrap();

    let ids: Vec<_> = results.iter().map(BuildResult::build_id).collect();
    assert_eq!(
        ids,
        vec![
            "orchestrator:build-1",
            "orchestrator:build-2",
            "orchestrator:build-3"
        ]
    );
    let sent: Vec<_> = service
        .requests()
        .iter()
        .map(|r| r.override_value(PROJECT_PATH_LIST).unwrap().to_string())
        .collect();
    assert_eq!(sent, vec!["widgets/a", "widgets/b", "widgets/c"]);
    assert_eq!(*service.identity_calls.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_dispatch_identity_failure_sends_nothing() {
    let service = RecordingService {
        fail_identity: true,
        ..RecordingService::default()
    };

    let err = dispatch(
        &paths(&["widgets/a"]),
        DispatchMode::Batch,
        &context(&[]),
        &Settings::default(),
        &service,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, TriggerError::Service(_)));
    assert!(service.requests().is_empty());
}

#[tokio::test]
async fn test_dispatch_fails_fast() {
    let service = RecordingService {
        fail_on_call: Some(2),
        ..RecordingService::default()
    };

    let err = dispatch(
        &paths(&["widgets/a", "widgets/b", "widgets/c"]),
        DispatchMode::PerProject,
        &context(&[]),
        &Settings::default(),
        &service,
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("throttled"), "{err}");
    assert_eq!(service.requests().len(), 2, "third project must not be sent");
}
