// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    zero = { 0, "0s" },
    seconds = { 59, "59s" },
    minutes = { 60, "1m" },
    minutes_high = { 3599, "59m" },
    hour = { 3600, "1h" },
    hour_minutes = { 5400, "1h30m" },
    day = { 86400, "1d" },
    days = { 3 * 86400 + 3600, "3d" },
)]
fn formats_elapsed(secs: u64, expected: &str) {
    assert_eq!(format_elapsed(secs), expected);
}
