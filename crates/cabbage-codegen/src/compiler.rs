//! Workspace compiler: one pass from a block workspace to program sections.
//!
//! The pass is split in two halves:
//! 1. [`WorkspaceCompiler::compile`] validates the graph, translates every
//!    enabled root and collects the raw streams plus rendered preludes into
//!    a [`CompiledProgram`].
//! 2. [`CompiledProgram::render`] hands those sections to the [`Assembler`].

use cabbage_types::{CompileErrors, Workspace};
use serde::Serialize;
use tracing::{debug, warn};

use crate::assemble::{Assembler, ENTRY_NAME, HANDLER_NAME};
use crate::error::CodegenResult;
use crate::graph::WorkspaceGraph;
use crate::header::Header;
use crate::hooks::HostHooks;
use crate::prelude::{InsertionPoint, PreludeCatalog};
use crate::text::ensure_trailing_newline;
use crate::translate::{Category, TranslationRegistry, Translator};

// ══════════════════════════════════════════════════════════════════════════════
// Output
// ══════════════════════════════════════════════════════════════════════════════

/// Body of the reactive handler function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandlerSection {
    pub name: String,
    pub body: String,
}

/// Prologue, body and epilogue of the entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MainSection {
    pub name: String,
    pub prologue: String,
    pub body: String,
    pub epilogue: String,
}

/// Everything one pass produced, before layout.
#[derive(Debug, Clone, Serialize)]
pub struct CompiledProgram {
    pub header: String,
    pub global_prelude: String,
    /// `None` when no enabled reactive root produced code.
    pub handler: Option<HandlerSection>,
    pub main: MainSection,
    /// Errors for roots that were skipped plus warnings; never fatal.
    pub diagnostics: CompileErrors,
}

impl CompiledProgram {
    pub fn render(&self, assembler: &Assembler) -> String {
        let handler = self.handler.as_ref().map_or("", |h| h.body.as_str());
        assembler.assemble(
            &self.header,
            &self.global_prelude,
            handler,
            &self.main.body,
            &self.main.prologue,
            &self.main.epilogue,
        )
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Compiler
// ══════════════════════════════════════════════════════════════════════════════

/// Holds the read-only configuration shared by every pass.
///
/// Passes keep their state in a fresh [`crate::CompilationContext`], so one
/// compiler may be shared across threads and used concurrently.
#[derive(Debug, Clone)]
pub struct WorkspaceCompiler {
    registry: TranslationRegistry,
    catalog: PreludeCatalog,
    header: Header,
    assembler: Assembler,
}

impl Default for WorkspaceCompiler {
    fn default() -> Self {
        Self {
            registry: TranslationRegistry::builtin(),
            catalog: PreludeCatalog::builtin(),
            header: Header::default(),
            assembler: Assembler::default(),
        }
    }
}

impl WorkspaceCompiler {
    /// Built-in translators, prelude catalog, header and 4-space indent.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(mut self, registry: TranslationRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_catalog(mut self, catalog: PreludeCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_header(mut self, header: Header) -> Self {
        self.header = header;
        self
    }

    pub fn with_assembler(mut self, assembler: Assembler) -> Self {
        self.assembler = assembler;
        self
    }

    pub fn registry(&self) -> &TranslationRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut TranslationRegistry {
        &mut self.registry
    }

    pub fn catalog(&self) -> &PreludeCatalog {
        &self.catalog
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn assembler(&self) -> &Assembler {
        &self.assembler
    }

    /// Compile without host hooks.
    pub fn compile(&self, workspace: &Workspace) -> CodegenResult<CompiledProgram> {
        self.compile_with_hooks(workspace, None)
    }

    /// Compile one workspace.
    ///
    /// Only a malformed graph fails the pass. A root whose translation fails
    /// is left out, its fragment requests are rolled back and the error is
    /// recorded in [`CompiledProgram::diagnostics`].
    pub fn compile_with_hooks(
        &self,
        workspace: &Workspace,
        hooks: Option<&mut dyn HostHooks>,
    ) -> CodegenResult<CompiledProgram> {
        let graph = WorkspaceGraph::build(workspace)?;
        debug!(
            blocks = graph.len(),
            roots = graph.roots().len(),
            "compiling workspace"
        );

        // Unsizing cast: shortens the object bound from the caller's lifetime
        // to the pass-local `graph` borrow (`&mut` is invariant).
        let hooks = hooks.map(|h| h as &mut dyn HostHooks);
        let mut translator = Translator::new(&self.registry, &graph, self.assembler.indent(), hooks);
        translator.context_mut().reset();

        let mut handler = String::new();
        let mut main = String::new();

        for root in graph.roots() {
            if !root.enabled {
                debug!(root = %root.id, kind = %root.kind, "skipping disabled root");
                continue;
            }
            debug!(root = %root.id, kind = %root.kind, "translating root");

            let snapshot = translator.context().snapshot();
            let mut chunk = match translator.translate_root(root) {
                Ok(chunk) => chunk,
                Err(err) => {
                    warn!(root = %root.id, error = %err, "root skipped");
                    let ctx = translator.context_mut();
                    ctx.restore(snapshot);
                    ctx.report(err.to_diagnostic());
                    continue;
                }
            };
            if chunk.trim().is_empty() {
                continue;
            }
            ensure_trailing_newline(&mut chunk);

            match self.registry.category(&root.kind) {
                Some(Category::Reactive) => handler.push_str(&chunk),
                _ => main.push_str(&chunk),
            }
        }

        let ctx = translator.finish();
        let global_prelude = ctx.render_at(&self.catalog, InsertionPoint::Global);
        let prologue = ctx.render_at(&self.catalog, InsertionPoint::Prologue);
        let epilogue = ctx.render_at(&self.catalog, InsertionPoint::Epilogue);
        debug!(
            fragments = ctx.requested().len(),
            has_handler = !handler.is_empty(),
            "workspace compiled"
        );

        Ok(CompiledProgram {
            header: self.header.render(),
            global_prelude,
            handler: (!handler.is_empty()).then(|| HandlerSection {
                name: HANDLER_NAME.to_string(),
                body: handler,
            }),
            main: MainSection {
                name: ENTRY_NAME.to_string(),
                prologue,
                body: main,
                epilogue,
            },
            diagnostics: ctx.into_diagnostics(),
        })
    }

    /// Render a compiled program with this compiler's layout.
    pub fn render(&self, program: &CompiledProgram) -> String {
        program.render(&self.assembler)
    }

    /// Compile and render in one step.
    pub fn compile_to_text(&self, workspace: &Workspace) -> CodegenResult<String> {
        Ok(self.render(&self.compile(workspace)?))
    }
}
