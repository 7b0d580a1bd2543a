// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rig list`: tabulate live rigs, flagging stale sockets.

use anyhow::Result;
use rig_core::time_fmt::format_elapsed;
use rig_wire::StatusReport;

use crate::client::{discover, RigClient};
use crate::table::{Column, Table};

pub async fn handle() -> Result<()> {
    let names = discover()?;
    if names.is_empty() {
        println!("no rigs deployed");
        return Ok(());
    }

    let mut table = Table::new(vec![
        Column::left("NAME"),
        Column::right("PID"),
        Column::left("PHASE"),
        Column::right("UPTIME"),
        Column::left("MONITORS"),
    ]);

    for name in names {
        let client = RigClient::for_name(&name);
        match client.status().await {
            Ok(report) => table.row(live_row(report)),
            Err(_) => table.row(vec![
                name,
                "-".to_string(),
                "stale".to_string(),
                "-".to_string(),
                "-".to_string(),
            ]),
        }
    }

    table.render(&mut std::io::stdout());
    Ok(())
}

fn live_row(report: StatusReport) -> Vec<String> {
    vec![
        report.name,
        report.pid.to_string(),
        report.phase.to_string(),
        format_elapsed(report.uptime_s),
        monitor_summary(&report.monitors),
    ]
}

fn monitor_summary(monitors: &[rig_wire::MonitorStatus]) -> String {
    if monitors.is_empty() {
        return "-".to_string();
    }
    monitors
        .iter()
        .map(|m| format!("{}:{}", m.name, m.state))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
