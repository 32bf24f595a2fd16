//! Per-pass compilation state.

use std::collections::BTreeSet;

use cabbage_types::{CompileErrors, Diagnostic};
use tracing::trace;

use crate::prelude::{InsertionPoint, PreludeCatalog};

/// State owned by exactly one compilation pass: the requested prelude
/// fragment names and the diagnostics raised so far.
///
/// A fresh context is created for every pass, so concurrent passes never
/// share a request set.
#[derive(Debug, Default)]
pub struct CompilationContext {
    requested: BTreeSet<String>,
    diagnostics: CompileErrors,
}

/// A saved copy of the request set, used to undo the requests made by a
/// root chain that failed to translate.
#[derive(Debug, Clone)]
pub struct RequestSnapshot(BTreeSet<String>);

impl CompilationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all pass state. Only called at the start of a pass.
    pub fn reset(&mut self) {
        self.requested.clear();
        self.diagnostics = CompileErrors::empty();
    }

    /// Mark a prelude fragment as needed. Idempotent; returns `true` on the
    /// first request.
    pub fn request(&mut self, name: &str) -> bool {
        let fresh = self.requested.insert(name.to_string());
        if fresh {
            trace!(fragment = name, "prelude fragment requested");
        }
        fresh
    }

    pub fn is_requested(&self, name: &str) -> bool {
        self.requested.contains(name)
    }

    pub fn requested(&self) -> &BTreeSet<String> {
        &self.requested
    }

    pub fn snapshot(&self) -> RequestSnapshot {
        RequestSnapshot(self.requested.clone())
    }

    pub fn restore(&mut self, snapshot: RequestSnapshot) {
        self.requested = snapshot.0;
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &CompileErrors {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> CompileErrors {
        self.diagnostics
    }

    /// Render the requested fragments for `point` in catalog order.
    pub fn render_at(&self, catalog: &PreludeCatalog, point: InsertionPoint) -> String {
        catalog.render_at(&self.requested, point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cabbage_types::ErrorCode;

    #[test]
    fn request_is_idempotent() {
        let mut ctx = CompilationContext::new();
        assert!(ctx.request("keyboard"));
        assert!(!ctx.request("keyboard"));
        assert_eq!(ctx.requested().len(), 1);
    }

    #[test]
    fn reset_clears_everything() {
        let mut ctx = CompilationContext::new();
        ctx.request("time");
        ctx.report(Diagnostic::warning(ErrorCode::MISSING_FIELD, "x"));
        ctx.reset();
        assert!(ctx.requested().is_empty());
        assert_eq!(ctx.diagnostics().total_warnings, 0);
    }

    #[test]
    fn restore_undoes_requests() {
        let mut ctx = CompilationContext::new();
        ctx.request("time");
        let snapshot = ctx.snapshot();
        ctx.request("random");
        ctx.restore(snapshot);
        assert!(ctx.is_requested("time"));
        assert!(!ctx.is_requested("random"));
    }

    #[test]
    fn render_uses_catalog() {
        let mut ctx = CompilationContext::new();
        ctx.request("random");
        ctx.request("time");
        assert_eq!(
            ctx.render_at(&PreludeCatalog::builtin(), InsertionPoint::Global),
            "import time\nimport random"
        );
    }
}
