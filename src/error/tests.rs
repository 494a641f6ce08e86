// orchestrator-trigger: Orchestrator Build Trigger
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ConfigError, NetworkError, ServiceError, TriggerError, TriggerResult};

#[test]
fn test_config_error_display() {
    let err = ConfigError::MissingVar("GITHUB_SHA".to_string());
    insta::assert_snapshot!(err.to_string(), @"missing required environment variable 'GITHUB_SHA'");
}

#[test]
fn test_service_error_wraps_into_trigger_error() {
    let err: TriggerError = ServiceError::StartBuild {
        project: "orchestrator".to_string(),
        message: "AccessDenied".to_string(),
    }
    .into();
    insta::assert_snapshot!(
        err.to_string(),
        @"service error: failed to start build for project 'orchestrator': AccessDenied"
    );
}

#[test]
fn test_network_error_display() {
    let err: TriggerError = NetworkError::HttpError {
        status: 404,
        url: "https://hooks.example.com/x".to_string(),
    }
    .into();
    assert!(matches!(err, TriggerError::Network(_)));
    assert_eq!(
        err.to_string(),
        "network error: http error 404: https://hooks.example.com/x"
    );
}

#[test]
fn test_trigger_error_size() {
    let size = std::mem::size_of::<TriggerError>();
    assert!(size <= 24, "TriggerError is {size} bytes, expected <= 24");
}

#[test]
fn test_trigger_result_size() {
    let size = std::mem::size_of::<TriggerResult<()>>();
    assert!(size <= 24, "TriggerResult<()> is {size} bytes, expected <= 24");
}
