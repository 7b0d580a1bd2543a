// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Byte-size parsing and formatting for rigfile thresholds.
//!
//! Sizes accept an optional binary suffix (`K`, `M`, `G`, `T`, case
//! insensitive, optional trailing `B`): `"512K"`, `"1M"`, `"2g"`, `"1TB"`.
//! A bare number is bytes.

use thiserror::Error;

const KIB: u64 = 1024;

/// Errors from [`parse_size`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SizeError {
    #[error("empty size")]
    Empty,

    #[error("invalid size {0:?}")]
    Invalid(String),

    #[error("size {0:?} overflows")]
    Overflow(String),
}

/// Parse a human byte size into bytes.
pub fn parse_size(input: &str) -> Result<u64, SizeError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(SizeError::Empty);
    }

    let upper = s.to_ascii_uppercase();
    let digits = upper.trim_end_matches(['K', 'M', 'G', 'T', 'B']);
    let suffix = &upper[digits.len()..];

    let multiplier = match suffix {
        "" | "B" => 1,
        "K" | "KB" => KIB,
        "M" | "MB" => KIB * KIB,
        "G" | "GB" => KIB * KIB * KIB,
        "T" | "TB" => KIB * KIB * KIB * KIB,
        _ => return Err(SizeError::Invalid(input.to_string())),
    };

    let value: u64 =
        digits.parse().map_err(|_| SizeError::Invalid(input.to_string()))?;
    value.checked_mul(multiplier).ok_or_else(|| SizeError::Overflow(input.to_string()))
}

/// Format bytes with a one-decimal binary suffix: `"2.0M"`, `"512.0K"`, `"17B"`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [(&str, u64); 4] =
        [("T", KIB * KIB * KIB * KIB), ("G", KIB * KIB * KIB), ("M", KIB * KIB), ("K", KIB)];
    for (unit, scale) in UNITS {
        if bytes >= scale {
            return format!("{:.1}{}", bytes as f64 / scale as f64, unit);
        }
    }
    format!("{}B", bytes)
}

#[cfg(test)]
#[path = "bytes_tests.rs"]
mod tests;
