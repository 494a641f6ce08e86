// orchestrator-trigger: Orchestrator Build Trigger
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use bon::Builder;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{trace, warn};

/// Options for directory traversal.
///
/// Hidden entries (`.git`, `.github`, ...) are never descended.
#[derive(Debug, Clone, Builder)]
pub struct WalkOptions {
    /// Follow symbolic links to files and directories
    #[builder(setters(name = with_follow_links), default = false)]
    follow_links: bool,
    /// Respect .gitignore and .ignore files
    #[builder(setters(name = with_respect_gitignore), default = true)]
    respect_gitignore: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl WalkOptions {
    /// Returns whether to follow symbolic links.
    #[must_use]
    pub const fn follow_links(&self) -> bool {
        self.follow_links
    }

    /// Returns whether to respect ignore files.
    #[must_use]
    pub const fn respect_gitignore(&self) -> bool {
        self.respect_gitignore
    }

    /// Options matching a recursive shell `**` glob over a checkout.
    ///
    /// - Skips hidden entries
    /// - Follows symlinked directories; link cycles are reported and skipped
    /// - Ignores `.gitignore`, a manifest is a manifest even if ignored
    #[must_use]
    pub fn for_manifest_scan() -> Self {
        Self::builder()
            .with_follow_links(true)
            .with_respect_gitignore(false)
            .build()
    }
}

/// Builds a sequential `WalkBuilder` sorted by file name.
pub(super) fn build_walker(root: &Path, options: &WalkOptions) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);

    builder.follow_links(options.follow_links());
    builder.hidden(true);

    builder.git_ignore(options.respect_gitignore());
    builder.git_global(options.respect_gitignore());
    builder.git_exclude(options.respect_gitignore());
    builder.ignore(options.respect_gitignore());
    builder.parents(options.respect_gitignore());

    builder.sort_by_file_name(|a, b| a.cmp(b));

    builder
}

/// Finds files matching a glob pattern relative to `root`.
///
/// Traversal is single-threaded and sorted by file name at every level, so
/// the result order is stable across runs and filesystems. Unreadable
/// entries are logged and skipped.
///
/// # Errors
///
/// Returns an error if:
/// - The root directory does not exist.
/// - The glob pattern is invalid.
///
/// # Example
/// ```no_run
/// use orchestrator_trigger::utility::fs::walk::{find_files, WalkOptions};
///
/// let manifests = find_files("/path/to/repo", "**/config.json", &WalkOptions::default())?;
/// for file in manifests {
///     println!("{}", file.display());
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn find_files<P: AsRef<Path>>(
    root: P,
    pattern: &str,
    options: &WalkOptions,
) -> Result<Vec<PathBuf>> {
    use wax::{Glob, Program};

    let root = root.as_ref();

    if !root.is_dir() {
        anyhow::bail!("root directory does not exist: {}", root.display());
    }

    let glob =
        Glob::new(pattern).map_err(|e| anyhow::anyhow!("invalid glob pattern '{pattern}': {e}"))?;

    let mut matches = Vec::new();
    for entry in build_walker(root, options).build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "walk error");
                continue;
            }
        };
        if entry.file_type().is_some_and(|ft| ft.is_file())
            && let Ok(rel_path) = entry.path().strip_prefix(root)
            && glob.is_match(rel_path)
        {
            trace!(path = %entry.path().display(), "glob match");
            matches.push(entry.path().to_path_buf());
        }
    }

    Ok(matches)
}
