//! Data model for the traversal.
//!
//! Composite values (arrays and records) live in a [`Document`] arena and are
//! referenced by [`NodeId`]. Two `Value::Node`s with the same id are the same
//! node, which is how shared and cyclic references are expressed without
//! `Rc<RefCell<_>>`. Everything the traversal must not look into is an
//! [`Opaque`] handle.

use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde_json::{Map, Number, Value as Json};

use crate::error::ExportError;
use crate::path;

// ---------- ids ----------

/// Index of a composite node inside its [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------- opaque ----------

/// A value the traversal hands back untouched, by reference.
///
/// Dates, class-like instances and anything else that is not plain data go
/// here. Cloning an `Opaque` clones the handle, not the payload.
#[derive(Clone)]
pub struct Opaque(Arc<dyn Any + Send + Sync>);

impl Opaque {
    pub fn new<T: Any + Send + Sync>(payload: T) -> Self {
        Self(Arc::new(payload))
    }

    pub fn from_arc(payload: Arc<dyn Any + Send + Sync>) -> Self {
        Self(payload)
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Same underlying allocation.
    pub fn ptr_eq(&self, other: &Opaque) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.0) as *const (),
            Arc::as_ptr(&other.0) as *const (),
        )
    }
}

impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opaque({:p})", Arc::as_ptr(&self.0) as *const ())
    }
}

// ---------- keys ----------

static NEXT_SYMBOL: AtomicU64 = AtomicU64::new(1);

/// Identity key: two symbols are equal only if one is a clone of the other,
/// whatever their descriptions.
#[derive(Clone)]
pub struct Symbol {
    id: u64,
    description: Option<Arc<str>>,
}

impl Symbol {
    pub fn new(description: &str) -> Self {
        Self {
            id: NEXT_SYMBOL.fetch_add(1, Ordering::Relaxed),
            description: Some(Arc::from(description)),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            id: NEXT_SYMBOL.fetch_add(1, Ordering::Relaxed),
            description: None,
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl std::hash::Hash for Symbol {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description().unwrap_or(""))
    }
}

/// Record key. Only string keys take part in exclusion matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Str(String),
    Symbol(Symbol),
}

impl Key {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Str(s) => Some(s),
            Key::Symbol(_) => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Str(s) => f.write_str(s),
            Key::Symbol(sym) => write!(f, "{sym}"),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

impl From<Symbol> for Key {
    fn from(sym: Symbol) -> Self {
        Key::Symbol(sym)
    }
}

impl From<&Symbol> for Key {
    fn from(sym: &Symbol) -> Self {
        Key::Symbol(sym.clone())
    }
}

// ---------- values ----------

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// Array or record in the owning [`Document`].
    Node(NodeId),
    Opaque(Opaque),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            Value::Node(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_opaque(&self) -> Option<&Opaque> {
        match self {
            Value::Opaque(o) => Some(o),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n.into())
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

/// Non-finite floats become `Null`, as in JSON.
impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}

impl From<NodeId> for Value {
    fn from(id: NodeId) -> Self {
        Value::Node(id)
    }
}

impl From<Opaque> for Value {
    fn from(o: Opaque) -> Self {
        Value::Opaque(o)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

// ---------- records ----------

/// Ordered key/value mapping. Insertion order is traversal order.
///
/// Keys are indexed, so insert and lookup stay O(1) however wide the record.
#[derive(Debug, Clone, Default)]
pub struct Record {
    entries: Vec<(Key, Value)>,
    // key -> position in `entries`
    index: HashMap<Key, usize>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            entries: Vec::with_capacity(n),
            index: HashMap::with_capacity(n),
        }
    }

    /// Insert or replace in place; returns the previous value if any.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.get_key(&Key::Str(key.to_string()))
    }

    pub fn get_key(&self, key: &Key) -> Option<&Value> {
        self.index.get(key).map(|&pos| &self.entries[pos].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Order-sensitive, like the entry list itself.
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

// ---------- nodes ----------

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Array(Vec<Value>),
    Record(Record),
}

impl Node {
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Node::Array(items) => Some(items),
            Node::Record(_) => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Node::Record(record) => Some(record),
            Node::Array(_) => None,
        }
    }
}

// ---------- document ----------

/// Arena owning every composite node reachable from the values built on it.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(n),
        }
    }

    /// Number of composite nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Empty array node, to be filled with [`Document::push`].
    pub fn alloc_array(&mut self) -> NodeId {
        self.alloc(Node::Array(Vec::new()))
    }

    /// Empty record node, to be filled with [`Document::insert`].
    pub fn alloc_record(&mut self) -> NodeId {
        self.alloc(Node::Record(Record::new()))
    }

    pub(crate) fn alloc_array_with_capacity(&mut self, n: usize) -> NodeId {
        self.alloc(Node::Array(Vec::with_capacity(n)))
    }

    pub(crate) fn alloc_record_with_capacity(&mut self, n: usize) -> NodeId {
        self.alloc(Node::Record(Record::with_capacity(n)))
    }

    pub fn array<I, V>(&mut self, items: I) -> Value
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let items = items.into_iter().map(Into::into).collect();
        Value::Node(self.alloc(Node::Array(items)))
    }

    pub fn record<I, K, V>(&mut self, entries: I) -> Value
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
        V: Into<Value>,
    {
        let record = entries.into_iter().collect::<Record>();
        Value::Node(self.alloc(Node::Record(record)))
    }

    /// Append to an array node. Returns `false` if `array` is not an array
    /// node of this document.
    pub fn push(&mut self, array: NodeId, value: impl Into<Value>) -> bool {
        match self.node_mut(array) {
            Some(Node::Array(items)) => {
                items.push(value.into());
                true
            }
            _ => false,
        }
    }

    /// Insert into a record node. Returns `false` if `record` is not a record
    /// node of this document.
    pub fn insert(&mut self, record: NodeId, key: impl Into<Key>, value: impl Into<Value>) -> bool {
        match self.node_mut(record) {
            Some(Node::Record(fields)) => {
                fields.insert(key, value);
                true
            }
            _ => false,
        }
    }

    /// Field `key` of `value` when `value` is a record of this document.
    pub fn field(&self, value: &Value, key: &str) -> Option<&Value> {
        self.node(value.as_node()?)?.as_record()?.get(key)
    }

    /// Element `i` of `value` when `value` is an array of this document.
    pub fn item(&self, value: &Value, i: usize) -> Option<&Value> {
        self.node(value.as_node()?)?.as_array()?.get(i)
    }

    // ---------- JSON bridge ----------

    /// Copy a JSON tree into this document and return its root value.
    pub fn import_json(&mut self, json: &Json) -> Value {
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(*b),
            Json::Number(n) => Value::Number(n.clone()),
            Json::String(s) => Value::String(s.clone()),
            Json::Array(items) => {
                let id = self.alloc_array_with_capacity(items.len());
                for item in items {
                    let v = self.import_json(item);
                    self.push(id, v);
                }
                Value::Node(id)
            }
            Json::Object(map) => {
                let id = self.alloc_record_with_capacity(map.len());
                for (k, item) in map {
                    let v = self.import_json(item);
                    self.insert(id, k.as_str(), v);
                }
                Value::Node(id)
            }
        }
    }

    pub fn from_json(json: &Json) -> (Document, Value) {
        let mut doc = Document::new();
        let root = doc.import_json(json);
        (doc, root)
    }

    /// Render `value` as JSON.
    ///
    /// Symbol keys are dropped. Shared (non-cyclic) nodes are written once per
    /// reference. Cycles, opaque values and ids from another document are
    /// errors.
    pub fn to_json(&self, value: &Value) -> Result<Json, ExportError> {
        let mut on_stack = HashSet::new();
        self.export(value, "", &mut on_stack)
    }

    fn export(
        &self,
        value: &Value,
        at: &str,
        on_stack: &mut HashSet<NodeId>,
    ) -> Result<Json, ExportError> {
        let id = match value {
            Value::Null => return Ok(Json::Null),
            Value::Bool(b) => return Ok(Json::Bool(*b)),
            Value::Number(n) => return Ok(Json::Number(n.clone())),
            Value::String(s) => return Ok(Json::String(s.clone())),
            Value::Opaque(_) => {
                return Err(ExportError::Opaque {
                    path: path::display(at).to_string(),
                })
            }
            Value::Node(id) => *id,
        };

        let node = self.node(id).ok_or_else(|| ExportError::DanglingNode {
            id: id.index(),
            path: path::display(at).to_string(),
        })?;

        if !on_stack.insert(id) {
            return Err(ExportError::Cycle {
                path: path::display(at).to_string(),
            });
        }

        let json = match node {
            Node::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    out.push(self.export(item, &path::index(at, i), on_stack)?);
                }
                Json::Array(out)
            }
            Node::Record(record) => {
                let mut out = Map::new();
                for (key, item) in record.iter() {
                    match key {
                        Key::Str(k) => {
                            let v = self.export(item, &path::field(at, k), on_stack)?;
                            out.insert(k.clone(), v);
                        }
                        Key::Symbol(sym) => {
                            tracing::debug!(
                                "dropping symbol key {} at {} during JSON export",
                                sym,
                                path::display(at)
                            );
                        }
                    }
                }
                Json::Object(out)
            }
        };

        on_stack.remove(&id);
        Ok(json)
    }
}
