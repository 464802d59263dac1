//! Same policy applied directly to `serde_json` trees and serde types.
//!
//! JSON trees cannot share or cycle, so no cache is needed here; the input is
//! consumed and rewritten in place, and the caller owns the result.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value as Json;

use crate::normalize::{normalize, NormalizeOptions};
use crate::options::TrimOptions;
use crate::path;

/// Trim every string in a JSON tree.
pub fn trim_json(mut value: Json, options: &TrimOptions) -> Json {
    let policy = options.normalize_options();
    trim_in_place(&mut value, "", options, policy);
    value
}

/// Round-trip `value` through JSON, trimming on the way.
///
/// Field paths follow the serialized names, so `#[serde(rename)]` applies to
/// exclusion patterns too.
pub fn trim_serde<T>(value: &T, options: &TrimOptions) -> Result<T, serde_json::Error>
where
    T: Serialize + DeserializeOwned,
{
    let json = serde_json::to_value(value)?;
    serde_json::from_value(trim_json(json, options))
}

fn trim_in_place(value: &mut Json, at: &str, options: &TrimOptions, policy: NormalizeOptions) {
    match value {
        Json::String(s) => *s = normalize(s, policy),
        Json::Array(items) => {
            for (i, item) in items.iter_mut().enumerate() {
                trim_in_place(item, &path::index(at, i), options, policy);
            }
        }
        Json::Object(map) => {
            for (key, item) in map.iter_mut() {
                let key_path = path::field(at, key);
                if item.is_string() && options.exclude.matches(&key_path) {
                    continue;
                }
                trim_in_place(item, &key_path, options, policy);
            }
        }
        Json::Null | Json::Bool(_) | Json::Number(_) => {}
    }
}
