//! Recursive string normalization for nested data.
//!
//! Every string reachable from a value is trimmed and, unless disabled, has
//! ASCII `<`/`>` swapped for their full-width forms. Record fields can be
//! excluded by exact path (`user.name`) or prefix wildcard (`user.*`).
//! Arrays and records are rebuilt; everything else passes through untouched.
//!
//! ```
//! use deep_trim::{transform, Document, TrimOptions};
//!
//! let mut doc = Document::new();
//! let root = doc.record([("name", " <John> "), ("password", "  secret  ")]);
//!
//! let out = transform(&doc, &root, TrimOptions::new().exclude(["password"]));
//! assert_eq!(out.field(&out.value, "name").and_then(|v| v.as_str()), Some("＜John＞"));
//! assert_eq!(out.field(&out.value, "password").and_then(|v| v.as_str()), Some("  secret  "));
//! ```

pub mod config;
pub mod error;
pub mod exclude;
pub mod json;
pub mod normalize;
pub mod options;
pub mod path;
pub mod traverse;
pub mod value;

pub use config::TrimConfig;
pub use error::ExportError;
pub use exclude::{should_exclude, ExcludeList};
pub use json::{trim_json, trim_serde};
pub use normalize::{normalize, to_full_width, trim, NormalizeOptions};
pub use options::{OptionsInput, OptionsRecord, TrimOptions};
pub use traverse::{transform, Trimmed};
pub use value::{Document, Key, Node, NodeId, Opaque, Record, Symbol, Value};
