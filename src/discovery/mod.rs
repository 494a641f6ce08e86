// orchestrator-trigger: Orchestrator Build Trigger
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sub-project discovery.
//!
//! ```text
//! /home/runner/work/widgets            <- scan root
//!   svcA/config.json       --> widgets/svcA
//!   infra/db/config.json   --> widgets/infra/db
//!   config.json            --> widgets
//! ```
//!
//! The project path is computed from the manifest's parent directory
//! relative to the scan root, so a directory that happens to share the
//! repository's name anywhere in the absolute path cannot corrupt it.

use serde::Serialize;
use std::fmt;
use std::path::{Component, Path};
use tracing::{debug, info, warn};

use crate::utility::fs::walk::{WalkOptions, find_files};

/// Location of one sub-project, relative to the repository.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ProjectPath(String);

impl ProjectPath {
    /// Wraps an already normalized path.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds the project path for a manifest found under `root`.
    ///
    /// Returns `None` if the manifest is not below `root` or its parent
    /// directory escapes it.
    #[must_use]
    pub fn from_manifest(root: &Path, repo_name: &str, manifest: &Path) -> Option<Self> {
        let dir = manifest.parent()?.strip_prefix(root).ok()?;

        let mut path = repo_name.to_string();
        for component in dir.components() {
            match component {
                Component::Normal(segment) => {
                    path.push('/');
                    path.push_str(&segment.to_string_lossy());
                }
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(Self(path))
    }
}

impl fmt::Display for ProjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProjectPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Joins project paths with `,` as the build expects them.
#[must_use]
pub fn join_paths(paths: &[ProjectPath]) -> String {
    paths
        .iter()
        .map(ProjectPath::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

/// Finds every `manifest_name` file below `root` and maps it to a project path.
///
/// A missing root or an unreadable tree yields an empty list; scan failures
/// never abort the trigger. Results are sorted by path.
#[must_use]
pub fn discover_projects(root: &Path, repo_name: &str, manifest_name: &str) -> Vec<ProjectPath> {
    let pattern = format!("**/{manifest_name}");
    info!(root = %root.display(), pattern = %pattern, "scanning for project manifests");

    let manifests = match find_files(root, &pattern, &WalkOptions::for_manifest_scan()) {
        Ok(manifests) => manifests,
        Err(e) => {
            warn!(root = %root.display(), error = %e, "manifest scan failed, no projects found");
            return Vec::new();
        }
    };

    let projects: Vec<ProjectPath> = manifests
        .iter()
        .filter_map(|manifest| {
            let project = ProjectPath::from_manifest(root, repo_name, manifest);
            if project.is_none() {
                warn!(manifest = %manifest.display(), "manifest outside scan root, skipping");
            }
            project
        })
        .inspect(|project| debug!(%project, "discovered project"))
        .collect();

    info!(count = projects.len(), "project discovery finished");
    projects
}
