// orchestrator-trigger: Orchestrator Build Trigger
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE     ← Additional settings files (can repeat)
//! --set KEY=VAL     ← Direct settings override
//! --root DIR        ← Scan root, replaces <workspace_root>/<repo>
//! --dry             ← Print requests instead of sending them
//! --log-level N     ← Console verbosity (0-6)
//! --file-log-level  ← File verbosity (defaults to --log-level)
//!
//! Precedence: --set > TRIGGER_* > --config > trigger.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::logging::LogFormat;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML settings file(s).
    /// Can be specified multiple times.
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true, action = clap::ArgAction::Append)]
    pub configs: Vec<PathBuf>,

    /// Sets a setting, such as 'region=eu-west-1'.
    /// Can be specified multiple times.
    #[arg(short = 's', long = "set", value_name = "KEY=VALUE", global = true, action = clap::ArgAction::Append)]
    pub settings: Vec<String>,

    /// Disables loading trigger.toml from the current directory.
    #[arg(long = "no-default-config", global = true)]
    pub no_default_config: bool,

    /// Directory to scan for manifests instead of <workspace_root>/<repo name>.
    #[arg(short = 'r', long = "root", value_name = "DIR", global = true)]
    pub root: Option<PathBuf>,

    /// Prints build requests as JSON without contacting AWS or the webhook.
    #[arg(long, global = true)]
    pub dry: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", global = true, value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", global = true, value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Console log format.
    #[arg(long = "log-format", value_name = "FORMAT", global = true, value_enum, default_value_t)]
    pub log_format: LogFormat,
}
