// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `filesystem` monitor: path size and backing-filesystem thresholds.

use async_trait::async_trait;
use rig_core::bytes::format_size;
use rig_core::TriggerRecord;
use rig_rigfile::FilesystemConfig;

use super::{now_stamp, Monitor, MonitorError};
use crate::adapters::fs_meter;

pub struct FilesystemMonitor {
    cfg: FilesystemConfig,
}

impl FilesystemMonitor {
    pub fn new(cfg: &FilesystemConfig) -> Self {
        Self { cfg: cfg.clone() }
    }
}

#[async_trait]
impl Monitor for FilesystemMonitor {
    fn name(&self) -> &'static str {
        "filesystem"
    }

    async fn start(&mut self) -> Result<(), MonitorError> {
        if !self.cfg.path.exists() {
            return Err(MonitorError::Start(format!(
                "path {} does not exist",
                self.cfg.path.display()
            )));
        }
        Ok(())
    }

    async fn poll(&mut self) -> Result<Option<TriggerRecord>, MonitorError> {
        let path = &self.cfg.path;

        if let Some(limit) = self.cfg.size {
            let measured = fs_meter::tree_size(path)
                .map_err(|e| MonitorError::Poll(format!("measuring {}: {}", path.display(), e)))?;
            if measured >= limit {
                return Ok(Some(TriggerRecord::new(
                    "filesystem",
                    format!(
                        "{} is {} (limit {})",
                        path.display(),
                        format_size(measured),
                        format_size(limit)
                    ),
                    now_stamp(),
                )));
            }
        }

        if self.cfg.used_perc.is_some() || self.cfg.used_size.is_some() {
            let usage = fs_meter::fs_usage(path)
                .map_err(|e| MonitorError::Poll(format!("statvfs {}: {}", path.display(), e)))?;
            if let Some(limit) = self.cfg.used_perc {
                if usage.used_percent >= limit as f64 {
                    return Ok(Some(TriggerRecord::new(
                        "filesystem",
                        format!(
                            "filesystem of {} at {:.0}% used (limit {}%)",
                            path.display(),
                            usage.used_percent,
                            limit
                        ),
                        now_stamp(),
                    )));
                }
            }
            if let Some(limit) = self.cfg.used_size {
                if usage.used_bytes >= limit {
                    return Ok(Some(TriggerRecord::new(
                        "filesystem",
                        format!(
                            "filesystem of {} has {} used (limit {})",
                            path.display(),
                            format_size(usage.used_bytes),
                            format_size(limit)
                        ),
                        now_stamp(),
                    )));
                }
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
#[path = "filesystem_tests.rs"]
mod tests;
