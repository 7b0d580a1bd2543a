// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Behavioral specifications for the rig CLI.
//!
//! These tests are black-box: they invoke the `rig` binary and verify
//! stdout, stderr, and exit codes. Deployment specs require root (rig
//! refuses to run otherwise) and skip themselves when the suite runs
//! unprivileged.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

// cli/
#[path = "specs/cli/errors.rs"]
mod cli_errors;
#[path = "specs/cli/help.rs"]
mod cli_help;

// rig/
#[path = "specs/rig/destroy.rs"]
mod rig_destroy;
#[path = "specs/rig/lifecycle.rs"]
mod rig_lifecycle;
