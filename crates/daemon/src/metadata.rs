// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rig metadata written into the working directory before archiving, so
//! the archive records what tripped and how each collector fared.

use std::path::Path;

use rig_core::TriggerRecord;
use rig_wire::ActionStatus;
use serde::Serialize;

pub const METADATA_FILE: &str = "rig-metadata.json";

#[derive(Debug, Serialize)]
pub struct RigMetadata {
    pub name: String,
    pub trigger: Option<TriggerRecord>,
    pub evidence: Vec<TriggerRecord>,
    pub actions: Vec<ActionStatus>,
    pub generated_at: String,
}

/// Write `rig-metadata.json` into the working directory.
pub fn write(workdir: &Path, metadata: &RigMetadata) -> std::io::Result<()> {
    let file = std::fs::File::create(workdir.join(METADATA_FILE))?;
    serde_json::to_writer_pretty(file, metadata).map_err(std::io::Error::from)
}

#[cfg(test)]
#[path = "metadata_tests.rs"]
mod tests;
