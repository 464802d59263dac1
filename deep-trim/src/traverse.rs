//! Deep traversal.
//!
//! Output is built top-down into a fresh [`Document`]. Every composite input
//! node gets exactly one output node, registered in the cache *before* its
//! children are visited, so a back-reference to an ancestor resolves to the
//! ancestor's (still incomplete) output node instead of recursing forever.
//!
//! Exclusion only guards string values held directly by a record field.
//! Records and arrays under an excluded path are still traversed; array
//! elements are never excluded.

use std::collections::HashMap;

use crate::normalize::{normalize, NormalizeOptions};
use crate::options::TrimOptions;
use crate::path;
use crate::value::{Document, Key, Node, NodeId, Value};

/// Result of a transform: the new arena and the root value pointing into it.
#[derive(Debug, Clone)]
pub struct Trimmed {
    pub document: Document,
    pub value: Value,
}

impl Trimmed {
    pub fn field(&self, value: &Value, key: &str) -> Option<&Value> {
        self.document.field(value, key)
    }

    pub fn item(&self, value: &Value, i: usize) -> Option<&Value> {
        self.document.item(value, i)
    }

    pub fn to_json(&self) -> Result<serde_json::Value, crate::ExportError> {
        self.document.to_json(&self.value)
    }
}

/// Normalize every string reachable from `value`.
///
/// `options` takes either a bare exclusion list or a full [`TrimOptions`].
/// The input is never modified.
pub fn transform(source: &Document, value: &Value, options: impl Into<TrimOptions>) -> Trimmed {
    let options = options.into();
    tracing::debug!(
        "deep trim: {} exclusion pattern(s), convert_to_full_width={}",
        options.exclude.len(),
        options.convert_to_full_width
    );

    let mut walk = Traversal::new(source, &options);
    let value = walk.visit(value, "");
    let document = walk.finish();

    tracing::debug!("deep trim produced {} node(s)", document.len());
    Trimmed { document, value }
}

impl Document {
    /// Method form of [`transform`].
    pub fn transform(&self, value: &Value, options: impl Into<TrimOptions>) -> Trimmed {
        transform(self, value, options)
    }
}

struct Traversal<'a> {
    source: &'a Document,
    options: &'a TrimOptions,
    policy: NormalizeOptions,
    out: Document,
    // input node -> output node
    cache: HashMap<NodeId, NodeId>,
}

impl<'a> Traversal<'a> {
    fn new(source: &'a Document, options: &'a TrimOptions) -> Self {
        Self {
            source,
            options,
            policy: options.normalize_options(),
            out: Document::with_capacity(source.len()),
            cache: HashMap::new(),
        }
    }

    fn finish(self) -> Document {
        self.out
    }

    fn visit(&mut self, value: &Value, at: &str) -> Value {
        match value {
            Value::String(s) => Value::String(normalize(s, self.policy)),
            Value::Node(id) => self.visit_node(*id, at),
            other => other.clone(),
        }
    }

    fn visit_node(&mut self, id: NodeId, at: &str) -> Value {
        if let Some(&done) = self.cache.get(&id) {
            tracing::trace!("revisiting node {} at {}", id, path::display(at));
            return Value::Node(done);
        }

        let source = self.source;
        let Some(node) = source.node(id) else {
            tracing::warn!(
                "node {} at {} is not part of the source document; passing it through",
                id,
                path::display(at)
            );
            return Value::Node(id);
        };

        match node {
            Node::Array(items) => {
                let out_id = self.out.alloc_array_with_capacity(items.len());
                self.cache.insert(id, out_id);
                for (i, item) in items.iter().enumerate() {
                    let v = self.visit(item, &path::index(at, i));
                    self.out.push(out_id, v);
                }
                Value::Node(out_id)
            }
            Node::Record(record) => {
                let out_id = self.out.alloc_record_with_capacity(record.len());
                self.cache.insert(id, out_id);
                for (key, item) in record.iter() {
                    let v = self.visit_field(key, item, at);
                    self.out.insert(out_id, key.clone(), v);
                }
                Value::Node(out_id)
            }
        }
    }

    fn visit_field(&mut self, key: &Key, item: &Value, at: &str) -> Value {
        let key_path = path::field(at, &key.to_string());
        match item {
            Value::String(s) if self.is_excluded(key, &key_path) => Value::String(s.clone()),
            Value::String(s) => Value::String(normalize(s, self.policy)),
            Value::Node(id) => self.visit_node(*id, &key_path),
            other => other.clone(),
        }
    }

    // Symbol keys cannot be written as a dot path, so they never match.
    fn is_excluded(&self, key: &Key, key_path: &str) -> bool {
        matches!(key, Key::Str(_)) && self.options.exclude.matches(key_path)
    }
}
