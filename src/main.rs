// orchestrator-trigger: Orchestrator Build Trigger
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Settings --> Command Dispatch
//!   Run (default) | Discover | Options | Version
//! ```

use std::process::ExitCode;

use anyhow::Context;

use orchestrator_trigger::cli::global::GlobalOptions;
use orchestrator_trigger::cli::run::RunArgs;
use orchestrator_trigger::cli::{self, Command};
use orchestrator_trigger::cmd::discover::{run_discover_command, run_options_command};
use orchestrator_trigger::cmd::run::run_trigger_command;
use orchestrator_trigger::config::loader::SettingsLoader;
use orchestrator_trigger::config::{DEFAULT_SETTINGS_FILE, Settings};
use orchestrator_trigger::error::Result;
use orchestrator_trigger::logging::init_logging;
use orchestrator_trigger::logging::{LogConfig, LogLevel};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const ENV_PREFIX: &str = "TRIGGER";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let log_config = build_log_config(&cli.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli).await
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::INFO);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(console_level);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .with_format(global.log_format)
        .build()
}

async fn dispatch_command(cli: &cli::Cli) -> ExitCode {
    let global = &cli.global;
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => build_settings_loader(global).and_then(run_options_command),
        Some(Command::Discover(args)) => load_settings(global)
            .and_then(|settings| run_discover_command(args, &settings, global.root.clone())),
        Some(Command::Run(args)) => run(args, global).await,
        None => run(&RunArgs::default(), global).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &RunArgs, global: &GlobalOptions) -> Result<()> {
    let settings = load_settings(global)?;
    run_trigger_command(args, &settings, global.root.clone(), global.dry).await
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_settings_loader(global: &GlobalOptions) -> Result<SettingsLoader> {
    let mut loader = Settings::builder();
    if !global.no_default_config {
        loader = loader.add_toml_file_optional(DEFAULT_SETTINGS_FILE);
    }
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);
    for pair in &global.settings {
        loader = loader.set_pair(pair)?;
    }
    Ok(loader)
}

fn load_settings(global: &GlobalOptions) -> Result<Settings> {
    build_settings_loader(global)?
        .build()
        .context("Failed to load settings")
}
