// orchestrator-trigger: Orchestrator Build Trigger
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! trigger [global options] [command]
//! run        (default) gate, discover, dispatch, notify
//! discover   list project paths only
//! options    print effective settings
//! version
//! ```

pub mod global;
pub mod run;


use crate::cli::global::GlobalOptions;
use crate::cli::run::{DiscoverArgs, RunArgs};
use clap::{Parser, Subcommand};

/// Orchestrator build trigger.
///
/// Finds sub-projects in a CI checkout and starts orchestrator builds for them.
#[derive(Debug, Parser)]
#[command(
    name = "trigger",
    author,
    version,
    about = "Orchestrator build trigger",
    long_about = "Scans the checked-out repository for config.json manifests and starts\n\
                  one orchestrator build per project (PARALLELIZE set) or one build for\n\
                  all of them. Runs are gated on RUN_ENV being an allowed environment.",
    after_help = "ENVIRONMENT:\n\n\
                  Required: GITHUB_REPOSITORY, GITHUB_SHA, GITHUB_REF, GITHUB_RUN_NUMBER,\n\
                  GITHUB_ACTOR, RUN_ENV.\n\
                  Optional: PARALLELIZE, DEBUG, GEMFURY_TOKEN, ARGO_SKIP_ENVS,\n\
                  ARGO_NOTIFICATION_WEBHOOK, SLACK_WEBHOOK, RELEASE_CHANNEL.\n\n\
                  Settings are read from trigger.toml in the current directory, --config\n\
                  files and TRIGGER_* variables, in that order."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute, `run` when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Gates on RUN_ENV, discovers projects, starts builds and notifies.
    Run(RunArgs),

    /// Prints the project paths that would be dispatched.
    Discover(DiscoverArgs),

    /// Prints the effective settings.
    Options,

    /// Shows the version.
    Version,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}
