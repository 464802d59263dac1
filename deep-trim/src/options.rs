//! Options accepted at the public boundary.
//!
//! Two shapes are accepted and folded into one [`TrimOptions`] before any
//! traversal starts:
//! - a bare list of exclusion patterns (legacy form), equivalent to
//!   `{ exclude: [...] }`;
//! - a record `{ exclude?: [...], convertToFullWidth?: bool }`.
//!
//! The traversal engine only ever sees [`TrimOptions`].

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use crate::exclude::ExcludeList;
use crate::normalize::NormalizeOptions;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "OptionsInput", rename_all = "camelCase")]
pub struct TrimOptions {
    pub exclude: ExcludeList,
    pub convert_to_full_width: bool,
}

impl Default for TrimOptions {
    fn default() -> Self {
        Self {
            exclude: ExcludeList::default(),
            convert_to_full_width: true,
        }
    }
}

impl TrimOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exclude<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = ExcludeList::new(patterns);
        self
    }

    pub fn convert_to_full_width(mut self, on: bool) -> Self {
        self.convert_to_full_width = on;
        self
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            convert_to_full_width: self.convert_to_full_width,
        }
    }

    /// Forgiving conversion from an arbitrary JSON options value.
    ///
    /// Never fails: an `exclude` that is not an array means no exclusions,
    /// non-string patterns are ignored, and `convertToFullWidth` is coerced
    /// with JavaScript truthiness. Anything that is neither an array nor an
    /// object yields the defaults.
    pub fn from_json_lenient(options: &Json) -> Self {
        match options {
            Json::Array(items) => Self {
                exclude: string_patterns(items),
                ..Self::default()
            },
            Json::Object(map) => {
                let exclude = match map.get("exclude") {
                    Some(Json::Array(items)) => string_patterns(items),
                    _ => ExcludeList::default(),
                };
                let convert_to_full_width = map
                    .get("convertToFullWidth")
                    .or_else(|| map.get("convert_to_full_width"))
                    .map(is_truthy)
                    .unwrap_or(true);
                Self {
                    exclude,
                    convert_to_full_width,
                }
            }
            _ => Self::default(),
        }
    }
}

fn string_patterns(items: &[Json]) -> ExcludeList {
    items.iter().filter_map(Json::as_str).collect()
}

fn is_truthy(v: &Json) -> bool {
    match v {
        Json::Null => false,
        Json::Bool(b) => *b,
        Json::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Json::String(s) => !s.is_empty(),
        Json::Array(_) | Json::Object(_) => true,
    }
}

/// Record form of the options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionsRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
    #[serde(
        default,
        rename = "convertToFullWidth",
        alias = "convert_to_full_width",
        skip_serializing_if = "Option::is_none"
    )]
    pub convert_to_full_width: Option<bool>,
}

/// Either accepted shape, as it arrives from a caller or a config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OptionsInput {
    /// Legacy: the list itself is the exclusion list.
    Exclude(Vec<String>),
    Record(OptionsRecord),
}

impl From<OptionsInput> for TrimOptions {
    fn from(input: OptionsInput) -> Self {
        match input {
            OptionsInput::Exclude(patterns) => patterns.into(),
            OptionsInput::Record(record) => record.into(),
        }
    }
}

impl From<OptionsRecord> for TrimOptions {
    fn from(record: OptionsRecord) -> Self {
        Self {
            exclude: record.exclude.map(ExcludeList::new).unwrap_or_default(),
            convert_to_full_width: record.convert_to_full_width.unwrap_or(true),
        }
    }
}

impl From<ExcludeList> for TrimOptions {
    fn from(exclude: ExcludeList) -> Self {
        Self {
            exclude,
            ..Self::default()
        }
    }
}

impl From<Vec<String>> for TrimOptions {
    fn from(patterns: Vec<String>) -> Self {
        ExcludeList::new(patterns).into()
    }
}

impl From<Vec<&str>> for TrimOptions {
    fn from(patterns: Vec<&str>) -> Self {
        ExcludeList::new(patterns).into()
    }
}

impl From<&[&str]> for TrimOptions {
    fn from(patterns: &[&str]) -> Self {
        ExcludeList::new(patterns.iter().copied()).into()
    }
}

impl<const N: usize> From<[&str; N]> for TrimOptions {
    fn from(patterns: [&str; N]) -> Self {
        ExcludeList::new(patterns).into()
    }
}

impl From<&TrimOptions> for TrimOptions {
    fn from(options: &TrimOptions) -> Self {
        options.clone()
    }
}

impl<T: Into<TrimOptions>> From<Option<T>> for TrimOptions {
    fn from(options: Option<T>) -> Self {
        options.map(Into::into).unwrap_or_default()
    }
}
