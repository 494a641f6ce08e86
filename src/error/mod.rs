// orchestrator-trigger: Orchestrator Build Trigger
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!      TriggerError (16 bytes)
//!              |
//!   +----------+----------+
//!   |          |          |
//!   v          v          v
//! Config    Service    Network
//!  Box        Box        Box
//!
//! Sub-errors (unboxed internally):
//!   Config  MissingVar, InvalidVar, ParseError
//!   Service IdentityLookup, StartBuild, MissingBuildId, InvalidRequest
//!   Network Reqwest, HttpError, InvalidUrl
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`TriggerError`].
pub type TriggerResult<T> = std::result::Result<T, TriggerError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum two words wide.
#[derive(Debug, Error)]
pub enum TriggerError {
    /// Configuration or environment error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Build service call failed.
    #[error("service error: {0}")]
    Service(#[from] Box<ServiceError>),

    /// Network operation failed.
    #[error("network error: {0}")]
    Network(#[from] Box<NetworkError>),
}

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for TriggerError {
                fn from(err: $error) -> Self {
                    TriggerError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ConfigError => Config,
    ServiceError => Service,
    NetworkError => Network,
}

// --- Config Errors ---

/// Configuration and environment errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is unset or empty.
    #[error("missing required environment variable '{0}'")]
    MissingVar(String),

    /// Environment variable has an unusable value.
    #[error("invalid value for environment variable '{name}': {message}")]
    InvalidVar { name: String, message: String },

    /// Failed to parse or merge settings sources.
    #[error("failed to load settings: {0}")]
    ParseError(String),
}

// --- Service Errors ---

/// Build service errors.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Caller identity lookup failed.
    #[error("identity lookup failed: {0}")]
    IdentityLookup(String),

    /// Build trigger call failed.
    #[error("failed to start build for project '{project}': {message}")]
    StartBuild { project: String, message: String },

    /// Service accepted the request but returned no build id.
    #[error("build service returned no build id for project '{0}'")]
    MissingBuildId(String),

    /// Request could not be assembled for the service.
    #[error("invalid build request: {0}")]
    InvalidRequest(String),
}

// --- Network Errors ---

/// Network operation errors.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// HTTP error response.
    #[error("http error {status}: {url}")]
    HttpError { status: u16, url: String },

    /// Error from reqwest library.
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

#[cfg(test)]
mod tests;
