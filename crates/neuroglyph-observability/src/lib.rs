// Copyright 2025 Neuroglyph Contributors
// SPDX-License-Identifier: Apache-2.0

//! # neuroglyph-observability
//!
//! Logging setup shared by every Neuroglyph binary.
//!
//! Library crates only emit `tracing` events under their crate name as target
//! (`target: "neuroglyph-development"`); this crate decides where those events
//! go and at which level, with per-crate debug flag support.
//!
//! ## Features
//! - `file-logging`: JSON log files in a timestamped run folder (desktop only)

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

pub use cli::*;
pub use config::*;
pub use init::*;

/// Known Neuroglyph crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "neuroglyph",
    "neuroglyph-config",
    "neuroglyph-neural",
    "neuroglyph-development",
    "neuroglyph-activity",
];
