//! Final program layout.
//!
//! The assembler is pure string plumbing: it never looks at nodes, only at
//! the text streams the compiler hands it.

use crate::text::indent_block;

/// Name of the one-argument function receiving reactive events.
pub const HANDLER_NAME: &str = "handle";

/// Name of the zero-argument entry point invoked by the runtime loader.
pub const ENTRY_NAME: &str = "run";

/// Merges header, preludes and the two code streams into one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembler {
    indent: String,
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new("    ")
    }
}

impl Assembler {
    pub fn new(indent: impl Into<String>) -> Self {
        Self {
            indent: indent.into(),
        }
    }

    pub fn indent(&self) -> &str {
        &self.indent
    }

    /// Lay out the program:
    ///
    /// ```text
    /// <header>
    /// <global prelude>
    ///
    /// @Slot(str)
    /// def handle(key):
    ///     print("key:", key)
    ///     <handler stream>
    ///
    /// def run():
    ///     <prologue>
    ///     <main stream>
    ///     <epilogue>
    /// ```
    ///
    /// The handler section only appears when `handler` has content; an
    /// empty `run()` body becomes `pass`. The result ends with exactly one
    /// line break.
    ///
    /// `header` is copied verbatim; a line break is added only when it does
    /// not already end with one.
    ///
    /// `@Slot(str)` is emitted unconditionally; the `Slot` import comes from
    /// the `keyboard` prelude fragment, so a replacement catalog must keep it.
    pub fn assemble(
        &self,
        header: &str,
        global_prelude: &str,
        handler: &str,
        main: &str,
        run_prologue: &str,
        run_epilogue: &str,
    ) -> String {
        let i = &self.indent;
        let mut out = header.to_string();
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        let mut parts: Vec<String> = Vec::new();

        let global = global_prelude.trim_end();
        if !global.is_empty() {
            parts.push(global.to_string());
        }

        if !handler.trim().is_empty() {
            parts.push(String::new());
            parts.push(format!(
                "@Slot(str)\ndef {HANDLER_NAME}(key):\n{i}print(\"key:\", key)"
            ));
            parts.push(indent_block(handler, i));
        }

        parts.push(String::new());
        parts.push(format!("def {ENTRY_NAME}():"));

        let body: Vec<String> = [run_prologue, main, run_epilogue]
            .into_iter()
            .map(|section| indent_block(section, i))
            .filter(|section| !section.is_empty())
            .collect();
        if body.is_empty() {
            parts.push(format!("{i}pass"));
        } else {
            parts.extend(body);
        }

        out.push_str(&parts.join("\n"));
        out.truncate(out.trim_end().len());
        out.push('\n');
        out
    }
}
