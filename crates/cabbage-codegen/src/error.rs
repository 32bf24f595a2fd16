//! Codegen error types.

use cabbage_types::{Diagnostic, ErrorCode, NodeId};
use thiserror::Error;

/// Errors that can occur while lowering a workspace.
///
/// `MalformedWorkspace` aborts the whole pass. The node-level variants only
/// drop the root chain that contains the offending block.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// No translation rule is registered for the block's type tag.
    #[error("unknown block type '{kind}'")]
    UnknownNodeType { node_id: NodeId, kind: String },

    /// A statement block was plugged into a value input.
    #[error("block type '{kind}' does not produce a value")]
    NotAnExpression { node_id: NodeId, kind: String },

    /// An event block was attached below another block instead of starting
    /// its own stack.
    #[error("event block '{kind}' must be the first block of its stack")]
    ReactiveNotAtRoot { node_id: NodeId, kind: String },

    /// Nested statements/values went past [`crate::MAX_NESTING_DEPTH`].
    #[error("blocks nested deeper than {limit} levels")]
    NestingTooDeep { node_id: NodeId, limit: usize },

    /// The block graph itself is inconsistent (cycles, dangling links, ...).
    #[error("malformed workspace: {reason}")]
    MalformedWorkspace {
        node_id: NodeId,
        code: ErrorCode,
        reason: String,
    },

    /// Two prelude fragments share a name.
    #[error("prelude fragment '{0}' is defined more than once")]
    DuplicateFragment(String),
}

impl CodegenError {
    pub(crate) fn malformed(code: ErrorCode, node_id: &NodeId, reason: impl Into<String>) -> Self {
        Self::MalformedWorkspace {
            node_id: node_id.clone(),
            code,
            reason: reason.into(),
        }
    }

    /// The block the editor should highlight, if any.
    pub fn node_id(&self) -> Option<&NodeId> {
        match self {
            Self::UnknownNodeType { node_id, .. }
            | Self::NotAnExpression { node_id, .. }
            | Self::ReactiveNotAtRoot { node_id, .. }
            | Self::NestingTooDeep { node_id, .. }
            | Self::MalformedWorkspace { node_id, .. } => Some(node_id),
            Self::DuplicateFragment(_) => None,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnknownNodeType { .. } => ErrorCode::UNKNOWN_NODE_TYPE,
            Self::NotAnExpression { .. } => ErrorCode::NOT_AN_EXPRESSION,
            Self::ReactiveNotAtRoot { .. } => ErrorCode::REACTIVE_NOT_AT_ROOT,
            Self::NestingTooDeep { .. } => ErrorCode::NESTING_TOO_DEEP,
            Self::MalformedWorkspace { code, .. } => *code,
            Self::DuplicateFragment(_) => ErrorCode::DUPLICATE_FRAGMENT,
        }
    }

    /// `true` when the error invalidates the whole pass rather than one root.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::MalformedWorkspace { .. } | Self::DuplicateFragment(_)
        )
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diagnostic = Diagnostic::error(self.code(), self.to_string());
        let diagnostic = match self {
            Self::UnknownNodeType { .. } => {
                diagnostic.with_suggestion("remove the block or register a translator for its type")
            }
            Self::NotAnExpression { .. } => {
                diagnostic.with_suggestion("only value blocks can be plugged into an input")
            }
            Self::ReactiveNotAtRoot { .. } => {
                diagnostic.with_suggestion("detach the event block so it starts its own stack")
            }
            _ => diagnostic,
        };
        match self.node_id() {
            Some(id) => diagnostic.at(id.clone()),
            None => diagnostic,
        }
    }
}

/// Codegen result type alias.
pub type CodegenResult<T> = Result<T, CodegenError>;
