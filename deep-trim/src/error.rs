use thiserror::Error;

/// Reasons a [`Document`](crate::Document) value cannot be rendered as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("cyclic reference at {path} has no JSON representation")]
    Cycle { path: String },

    #[error("opaque value at {path} has no JSON representation")]
    Opaque { path: String },

    #[error("node #{id} at {path} does not belong to this document")]
    DanglingNode { id: usize, path: String },
}
