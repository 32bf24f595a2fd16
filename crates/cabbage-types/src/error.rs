use crate::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of errors kept before further ones are only counted.
pub const MAX_ERRORS: usize = 20;

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Diagnostic category, determined by code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Translation,
    Workspace,
    Hook,
    Field,
    Config,
}

/// Numeric diagnostic code (E100–E599).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    // ── Translation (E100–E199) ──
    pub const UNKNOWN_NODE_TYPE: Self = Self(100);
    pub const NOT_AN_EXPRESSION: Self = Self(101);
    pub const DUPLICATE_FRAGMENT: Self = Self(102);
    pub const REACTIVE_NOT_AT_ROOT: Self = Self(103);

    // ── Workspace structure (E200–E299) ──
    pub const CYCLIC_CHAIN: Self = Self(200);
    pub const DUPLICATE_NODE_ID: Self = Self(201);
    pub const DANGLING_LINK: Self = Self(202);
    pub const SHARED_NODE: Self = Self(203);
    pub const NESTING_TOO_DEEP: Self = Self(204);
    pub const INVALID_MODULE_NAME: Self = Self(205);
    pub const INVALID_WORKSPACE_JSON: Self = Self(206);

    // ── Host hooks (E300–E399) ──
    pub const HOOK_FAILED: Self = Self(300);

    // ── Field values (E400–E499) ──
    pub const MISSING_FIELD: Self = Self(400);

    // ── Configuration (E500–E599) ──
    pub const INVALID_CONFIG: Self = Self(500);

    /// Get the category for this code.
    pub fn category(self) -> ErrorCategory {
        match self.0 {
            100..=199 => ErrorCategory::Translation,
            200..=299 => ErrorCategory::Workspace,
            300..=399 => ErrorCategory::Hook,
            400..=499 => ErrorCategory::Field,
            500..=599 => ErrorCategory::Config,
            _ => ErrorCategory::Translation, // fallback
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Translation => write!(f, "translation"),
            Self::Workspace => write!(f, "workspace"),
            Self::Hook => write!(f, "hook"),
            Self::Field => write!(f, "field"),
            Self::Config => write!(f, "config"),
        }
    }
}

/// A structured compiler diagnostic.
///
/// Carries the offending block id so the editor can highlight it; the editor
/// renders these and must not parse free-form strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    /// Derived from `code`.
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Diagnostic {
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: Severity::Error,
            category: code.category(),
            message: message.into(),
            node_id: None,
            suggestion: None,
        }
    }

    pub fn warning(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(code, message)
        }
    }

    /// Attribute the diagnostic to a block.
    pub fn at(mut self, node_id: NodeId) -> Self {
        self.node_id = Some(node_id);
        self
    }

    /// Attach a fix suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.node_id {
            Some(id) => write!(f, "{id}: {} [{}] {}", self.code, self.category, self.message),
            None => write!(f, "{} [{}] {}", self.code, self.category, self.message),
        }
    }
}

impl std::error::Error for Diagnostic {}

/// Errors and warnings collected over one compilation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompileErrors {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
    pub total_errors: usize,
    pub total_warnings: usize,
}

impl CompileErrors {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }

    /// Route a diagnostic by severity.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => self.push_error(diagnostic),
            Severity::Warning => self.push_warning(diagnostic),
        }
    }

    /// Add an error, respecting the MAX_ERRORS limit.
    pub fn push_error(&mut self, error: Diagnostic) {
        if self.errors.len() < MAX_ERRORS {
            self.errors.push(error);
        }
        self.total_errors += 1;
    }

    pub fn push_warning(&mut self, warning: Diagnostic) {
        self.warnings.push(warning);
        self.total_warnings += 1;
    }

    /// All diagnostics attributed to one block.
    pub fn for_node<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = &'a Diagnostic> {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .filter(move |d| d.node_id.as_ref() == Some(id))
    }
}

impl Extend<Diagnostic> for CompileErrors {
    fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, iter: I) {
        for diagnostic in iter {
            self.push(diagnostic);
        }
    }
}
