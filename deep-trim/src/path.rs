//! Structural paths used for exclusion matching.
//!
//! Root is the empty string. Record fields append `.key` (or just `key` at the
//! root); array elements append `[index]`. Paths never end up in the output.

/// Path of a record field under `parent`.
pub fn field(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

/// Path of an array element under `parent`.
pub fn index(parent: &str, i: usize) -> String {
    format!("{parent}[{i}]")
}

/// Human-readable form for error messages.
pub(crate) fn display(path: &str) -> &str {
    if path.is_empty() {
        "<root>"
    } else {
        path
    }
}
