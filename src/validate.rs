//! Precondition checks shared by the tools.
//!
//! Each check returns the caller-facing message on failure. Tools chain them
//! with `?` so the first violated rule wins.

use serde_json::{Map, Value};

/// Validation failure message.
pub type Check = std::result::Result<(), String>;

/// Require text whose trimmed length is at least `min_chars`.
pub fn min_text(value: Option<&str>, min_chars: usize, message: &str) -> Check {
    match value {
        Some(text) if text.trim().chars().count() >= min_chars => Ok(()),
        _ => Err(message.to_string()),
    }
}

/// Require `value` to be exactly one of `allowed`.
pub fn one_of(value: &str, allowed: &[&str], label: &str) -> Check {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(format!("Invalid {}. Choose from: {}", label, allowed.join(", ")))
    }
}

/// Require at least `min` entries in a record.
pub fn min_entries(record: &Map<String, Value>, min: usize, message: &str) -> Check {
    if record.len() >= min {
        Ok(())
    } else {
        Err(message.to_string())
    }
}

/// Require every key in `required` to be present. Names the missing ones.
pub fn required_keys(record: &Map<String, Value>, required: &[&str]) -> Check {
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|key| !record.contains_key(*key))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(format!("Missing required fields: {}", missing.join(", ")))
    }
}
