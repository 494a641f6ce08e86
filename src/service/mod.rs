// orchestrator-trigger: Orchestrator Build Trigger
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Build service abstraction.
//!
//! ```text
//! BuildService
//!   caller_account()  --> STS GetCallerIdentity
//!   start_build(req)  --> CodeBuild StartBuild
//!        |
//!        +-- CodeBuildService (AWS SDK, default credential chain)
//!        +-- test fakes
//! ```

pub mod codebuild;

use futures_util::future::BoxFuture;

use crate::dispatch::{BuildRequest, BuildResult};
use crate::error::TriggerResult;

pub use codebuild::CodeBuildService;

/// Capability to start builds and identify the calling account.
///
/// Methods return `BoxFuture` so the trait stays object safe and
/// implementations can be swapped behind `&dyn BuildService`.
pub trait BuildService: Send + Sync {
    /// Account id of the credentials in use.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::IdentityLookup` if the lookup fails.
    fn caller_account(&self) -> BoxFuture<'_, TriggerResult<String>>;

    /// Starts one build.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::StartBuild` if the service rejects the call and
    /// `ServiceError::MissingBuildId` if it answers without a build id.
    fn start_build<'a>(
        &'a self,
        request: &'a BuildRequest,
    ) -> BoxFuture<'a, TriggerResult<BuildResult>>;
}
