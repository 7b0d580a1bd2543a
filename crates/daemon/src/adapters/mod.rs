// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resource adapters: stateless helpers monitors and actions are built on.
//!
//! Each module wraps one class of host resource — appended log lines, the
//! system journal, the process table, path and filesystem measurements,
//! and supervised subprocesses.

pub mod fs_meter;
pub mod journal;
pub mod proc_sample;
pub mod subprocess;
pub mod tail;
