// orchestrator-trigger: Orchestrator Build Trigger
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{DEFAULT_ALLOWED_ENVS, DispatchMode, EnvironmentContext, should_run, split_repository};
use crate::error::{ConfigError, TriggerError};
use std::collections::HashMap;

fn base_vars() -> HashMap<String, String> {
    [
        ("GITHUB_REPOSITORY", "acme/widgets"),
        ("GITHUB_SHA", "0123456789abcdef0123456789abcdef01234567"),
        ("GITHUB_REF", "refs/heads/main"),
        ("GITHUB_RUN_NUMBER", "42"),
        ("GITHUB_ACTOR", "octocat"),
        ("RUN_ENV", "qa"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn missing_var(err: TriggerError) -> String {
    match err {
        TriggerError::Config(boxed) => match *boxed {
            ConfigError::MissingVar(name) => name,
            other => panic!("expected MissingVar, got {other:?}"),
        },
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn test_should_run_allow_list() {
    for env in DEFAULT_ALLOWED_ENVS {
        assert!(should_run(env, &DEFAULT_ALLOWED_ENVS), "{env} should run");
    }
    for env in ["staging", "", "QA", "Prod", " dev", "dev "] {
        assert!(!should_run(env, &DEFAULT_ALLOWED_ENVS), "{env:?} should not run");
    }
}

#[test]
fn test_should_run_custom_list() {
    let allowed = vec!["sandbox".to_string()];
    assert!(should_run("sandbox", &allowed));
    assert!(!should_run("dev", &allowed));
    assert!(!should_run("dev", &Vec::<String>::new()));
}

#[test]
fn test_context_from_minimal_env() {
    let ctx = EnvironmentContext::from_map(&base_vars()).unwrap();

    assert_eq!(ctx.repository(), "acme/widgets");
    assert_eq!(ctx.repo_name(), "widgets");
    assert_eq!(ctx.run_env(), "qa");
    assert_eq!(ctx.mode(), DispatchMode::Batch);
    assert!(ctx.debug().is_none());
    assert!(ctx.gemfury_token().is_none());
    assert!(ctx.slack_webhook().is_none());
    assert!(ctx.release_channel().is_none());
}

#[test]
fn test_context_missing_required_vars() {
    for name in [
        "GITHUB_REPOSITORY",
        "GITHUB_SHA",
        "GITHUB_REF",
        "GITHUB_RUN_NUMBER",
        "GITHUB_ACTOR",
        "RUN_ENV",
    ] {
        let mut vars = base_vars();
        vars.remove(name);
        let err = EnvironmentContext::from_map(&vars).unwrap_err();
        assert_eq!(missing_var(err), name);

        let mut vars = base_vars();
        vars.insert(name.to_string(), String::new());
        let err = EnvironmentContext::from_map(&vars).unwrap_err();
        assert_eq!(missing_var(err), name, "empty {name} counts as missing");
    }
}

#[test]
fn test_context_optional_vars_ignore_empty() {
    let mut vars = base_vars();
    for name in [
        "PARALLELIZE",
        "DEBUG",
        "GEMFURY_TOKEN",
        "ARGO_SKIP_ENVS",
        "ARGO_NOTIFICATION_WEBHOOK",
        "SLACK_WEBHOOK",
        "RELEASE_CHANNEL",
    ] {
        vars.insert(name.to_string(), String::new());
    }

    let ctx = EnvironmentContext::from_map(&vars).unwrap();
    assert_eq!(ctx.mode(), DispatchMode::Batch);
    assert!(ctx.debug().is_none());
    assert!(ctx.gemfury_token().is_none());
    assert!(ctx.argo_skip_envs().is_none());
    assert!(ctx.argo_notification_webhook().is_none());
    assert!(ctx.slack_webhook().is_none());
    assert!(ctx.release_channel().is_none());
}

#[test]
fn test_context_parallelize_selects_per_project() {
    let mut vars = base_vars();
    vars.insert("PARALLELIZE".to_string(), "1".to_string());
    let ctx = EnvironmentContext::from_map(&vars).unwrap();
    assert_eq!(ctx.mode(), DispatchMode::PerProject);
}

#[test]
fn test_debug_output_hides_secrets() {
    let mut vars = base_vars();
    vars.insert("GEMFURY_TOKEN".to_string(), "s3cr3t".to_string());
    vars.insert(
        "SLACK_WEBHOOK".to_string(),
        "https://hooks.slack.com/services/T/B/X".to_string(),
    );
    let ctx = EnvironmentContext::from_map(&vars).unwrap();

    let rendered = format!("{ctx:?}");
    assert!(!rendered.contains("s3cr3t"));
    assert!(!rendered.contains("hooks.slack.com"));
    assert!(rendered.contains("[hidden]"));
}

#[test]
fn test_split_repository() {
    assert_eq!(split_repository("acme/widgets").unwrap(), ("acme", "widgets"));
    for bad in ["widgets", "/widgets", "acme/", "acme/widgets/extra", ""] {
        assert!(split_repository(bad).is_err(), "{bad:?} should be rejected");
    }
}

#[test]
fn test_dispatch_mode_display() {
    assert_eq!(DispatchMode::PerProject.to_string(), "per-project");
    assert_eq!(DispatchMode::Batch.to_string(), "batch");
}
