// orchestrator-trigger: Orchestrator Build Trigger
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The `discover` and `options` commands.

use std::path::PathBuf;

use crate::cli::run::DiscoverArgs;
use crate::config::Settings;
use crate::config::loader::SettingsLoader;
use crate::context::split_repository;
use crate::discovery::{ProjectPath, discover_projects};
use crate::error::Result;

/// Project paths for `repository` under `root`, or under the settings scan root.
///
/// # Errors
///
/// Returns an error if `repository` is not `owner/repo`.
pub fn list_projects(
    repository: &str,
    settings: &Settings,
    root: Option<PathBuf>,
) -> Result<Vec<ProjectPath>> {
    let (_, repo_name) = split_repository(repository)?;
    let root = root.unwrap_or_else(|| settings.scan_root(repo_name));
    Ok(discover_projects(&root, repo_name, &settings.manifest_name))
}

/// Print one discovered project path per line.
///
/// # Errors
///
/// See [`list_projects`].
pub fn run_discover_command(
    args: &DiscoverArgs,
    settings: &Settings,
    root: Option<PathBuf>,
) -> Result<()> {
    let projects = list_projects(&args.repository, settings, root)?;
    if projects.is_empty() {
        println!("No {} files found", settings.manifest_name);
    }
    for project in &projects {
        println!("{project}");
    }
    Ok(())
}

/// Effective settings followed by the files they were read from.
///
/// # Errors
///
/// Returns an error if the settings fail to load.
pub fn options_report(loader: SettingsLoader) -> Result<Vec<String>> {
    let sources = loader.format_loaded_files();
    let settings = loader.build()?;

    let mut lines = settings.format_options();
    lines.push(String::new());
    if sources.is_empty() {
        lines.push("No settings files loaded".to_string());
    } else {
        lines.push("Settings files:".to_string());
        lines.extend(sources);
    }
    Ok(lines)
}

/// Display current settings and their source files.
///
/// # Errors
///
/// See [`options_report`].
pub fn run_options_command(loader: SettingsLoader) -> Result<()> {
    for line in options_report(loader)? {
        println!("{line}");
    }
    Ok(())
}
