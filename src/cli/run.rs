// orchestrator-trigger: Orchestrator Build Trigger
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI arguments for the `run` and `discover` commands.
//!
//! ```text
//! $ trigger                       # same as `trigger run`
//! $ trigger run --skip-notify
//! $ trigger --dry run             # print requests, send nothing
//! $ trigger discover --root .     # list project paths
//! ```

use clap::Args;

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// Does not post to SLACK_WEBHOOK after dispatching.
    #[arg(long = "skip-notify")]
    pub skip_notify: bool,
}

/// Arguments for the `discover` command.
#[derive(Debug, Clone, Args)]
pub struct DiscoverArgs {
    /// Repository as `owner/repo`; the name prefixes every project path.
    #[arg(long, value_name = "OWNER/REPO", env = "GITHUB_REPOSITORY")]
    pub repository: String,
}
