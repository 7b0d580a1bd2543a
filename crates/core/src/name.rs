// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rig name generation and validation.
//!
//! Names are used verbatim as directory and socket file names, so the
//! accepted charset is deliberately narrow.

use thiserror::Error;

/// Alphabet for generated name suffixes: lowercase alphanumerics only.
const ALPHABET: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h',
    'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Maximum accepted name length (fits comfortably in a socket path).
const MAX_LEN: usize = 64;

/// Errors from [`validate`].
#[derive(Debug, Error)]
pub enum NameError {
    #[error("name is empty")]
    Empty,

    #[error("name is longer than {MAX_LEN} characters")]
    TooLong,

    #[error("name must start with a lowercase letter or digit")]
    BadLeadingChar,

    #[error("name contains invalid character {0:?} (allowed: a-z 0-9 . _ -)")]
    BadChar(char),
}

/// Generate a fresh rig name: `rig-` plus six random lowercase alphanumerics.
pub fn generate() -> String {
    format!("rig-{}", nanoid::nanoid!(6, &ALPHABET))
}

/// Validate a user-supplied rig name.
///
/// Accepts `[a-z0-9][a-z0-9._-]*`, at most [`MAX_LEN`] characters.
pub fn validate(name: &str) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if name.len() > MAX_LEN {
        return Err(NameError::TooLong);
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() || c.is_ascii_digit() => {}
        _ => return Err(NameError::BadLeadingChar),
    }
    for c in chars {
        if !(c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '_' | '-')) {
            return Err(NameError::BadChar(c));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "name_tests.rs"]
mod tests;
