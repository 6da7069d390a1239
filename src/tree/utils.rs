//! Shared helpers for entry filtering

use std::ffi::CStr;

use glob::Pattern;

/// `.` and `..`, which would loop forever if descended into.
pub fn is_self_reference(name: &CStr) -> bool {
    matches!(name.to_bytes(), b"." | b"..")
}

/// Check whether an entry name matches any ignore pattern.
pub fn should_ignore_name(name: &CStr, patterns: &[Pattern]) -> bool {
    if patterns.is_empty() {
        return false;
    }
    let name = name.to_string_lossy();
    patterns.iter().any(|p| p.matches(&name))
}
