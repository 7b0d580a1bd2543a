// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rigfile parsing and validation.
//!
//! A rigfile is a YAML document declaring what a rig watches for and what
//! it collects when the watch trips. Parsing is strict: unknown top-level
//! keys, unknown plugin names, and unknown per-plugin fields are all
//! rejected before anything is deployed. The typed option structs in
//! [`monitors`] and [`actions`] are the option schema for every plugin.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod actions;
pub mod monitors;
mod parser;

pub use actions::{
    ActionSpec, GcoreConfig, KdumpConfig, NoopConfig, SosConfig, SosMode, TcpdumpConfig,
    WatchConfig, WatchTarget,
};
pub use monitors::{
    FilesystemConfig, LogsConfig, MonitorSpec, ProcSelector, ProcState, ProcessConfig,
    StateMatcher,
};
pub use parser::{parse_file, parse_str, ParseError, Rigfile};
