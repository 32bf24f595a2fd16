//! Shared types for the Cabbage block compiler.
//!
//! This crate defines the workspace graph handed over by the block editor
//! (nodes, links, canvas positions) and the structured diagnostics every
//! compiler stage reports back to it.

mod error;
mod node;

pub use error::{CompileErrors, Diagnostic, ErrorCategory, ErrorCode, Severity, MAX_ERRORS};
pub use node::{Node, NodeId, Position, Workspace};
