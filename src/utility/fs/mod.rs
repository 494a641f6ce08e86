// orchestrator-trigger: Orchestrator Build Trigger
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem utilities.
//!
//! ```text
//! walk:  find_files()   sorted, sequential glob matching
//!        WalkOptions    follow_links, gitignore (hidden always skipped)
//! ```

pub mod walk;
