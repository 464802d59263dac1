//! String normalization applied to every string leaf the traversal reaches.
//!
//! Policy:
//! - Trim leading/trailing whitespace (Unicode `White_Space`, as `str::trim`).
//! - Optionally swap ASCII `<` / `>` for full-width U+FF1C / U+FF1E.
//! - Nothing else is touched.
//!
//! Trimming runs first, so the substitution never changes what counts as
//! leading or trailing whitespace.

/// Full-width LESS-THAN SIGN.
pub const FULL_WIDTH_LT: char = '\u{FF1C}';
/// Full-width GREATER-THAN SIGN.
pub const FULL_WIDTH_GT: char = '\u{FF1E}';

/// Per-string switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub convert_to_full_width: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            convert_to_full_width: true,
        }
    }
}

/// Strip leading and trailing whitespace.
pub fn trim(s: &str) -> &str {
    s.trim()
}

/// Replace every ASCII `<` and `>` with its full-width counterpart.
pub fn to_full_width(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '<' => out.push(FULL_WIDTH_LT),
            '>' => out.push(FULL_WIDTH_GT),
            _ => out.push(ch),
        }
    }
    out
}

/// Trim, then convert `<`/`>` when enabled.
pub fn normalize(s: &str, opts: NormalizeOptions) -> String {
    let trimmed = trim(s);
    if opts.convert_to_full_width {
        to_full_width(trimmed)
    } else {
        trimmed.to_string()
    }
}
