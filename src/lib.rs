// orchestrator-trigger: Orchestrator Build Trigger
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |           run / discover / options
//!                +----------+----------+
//!                           v
//!     ,-------------------------------------------,
//!     |  config (TOML, TRIGGER_*)   context (CI)  |
//!     '----+--------------+---------------+-------'
//!          |              |               |
//!          v              v               v
//!      discovery       dispatch         notify
//!    config.json    plan + fan-out    chat webhook
//!                         |
//!                         v
//!                  service (trait)
//!               CodeBuild + STS clients
//!
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility   |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod context;
pub mod discovery;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod notify;
pub mod service;
pub mod utility;
