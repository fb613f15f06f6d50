//! Errors raised while building, visiting or printing nodes.

use thiserror::Error;

use crate::NodeKind;

/// Errors that can occur in the syntax tree layer.
///
/// None of these are retried or papered over: a node is either fully
/// valid or not built, and a serialization is either complete or fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AstError {
    #[error("malformed {kind} node: {reason}")]
    MalformedNode { kind: NodeKind, reason: String },

    #[error("unprintable value in s-expression: {0}")]
    UnprintableValue(String),

    #[error("visitor does not handle {0} nodes")]
    UnsupportedNodeKind(NodeKind),
}

impl AstError {
    pub(crate) fn malformed(kind: NodeKind, reason: impl Into<String>) -> Self {
        AstError::MalformedNode {
            kind,
            reason: reason.into(),
        }
    }
}
