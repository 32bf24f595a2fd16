//! Cabbage code generator: lowers a block workspace to Python source text.
//!
//! # Architecture
//!
//! One compilation pass runs entirely inside [`WorkspaceCompiler::compile`]:
//!
//! 1. Validate the block graph ([`graph::WorkspaceGraph`]) and order roots
//!    top-to-bottom, left-to-right.
//! 2. Translate each enabled root chain through the
//!    [`TranslationRegistry`]; translators may request shared prelude
//!    fragments through the pass-local [`CompilationContext`].
//! 3. Route chunks from reactive roots into the handler stream and
//!    everything else into the main stream.
//! 4. Render the requested fragments per [`InsertionPoint`] in catalog order.
//! 5. [`Assembler`] merges header, global prelude, `handle(key)` and `run()`.
//!
//! ## Output contract
//!
//! The generated module always defines `run()`. It defines `handle(key)`
//! only when an enabled reactive root produced code; the `keyboard` prelude
//! wires that function to the host's input signal.

pub mod assemble;
pub mod compiler;
pub mod context;
pub mod error;
pub mod graph;
pub mod header;
pub mod hooks;
pub mod prelude;
pub mod python;
pub mod text;
pub mod translate;

pub use assemble::{Assembler, ENTRY_NAME, HANDLER_NAME};
pub use compiler::{CompiledProgram, HandlerSection, MainSection, WorkspaceCompiler};
pub use context::CompilationContext;
pub use error::{CodegenError, CodegenResult};
pub use header::Header;
pub use hooks::{HookError, HostHooks, ResourceKind, ResourceLog};
pub use prelude::{InsertionPoint, PreludeCatalog, PreludeFragment};
pub use python::Precedence;
pub use translate::{
    Category, Rule, TranslateFn, Translated, TranslatedExpression, TranslatedStatement,
    TranslationRegistry, Translator, MAX_NESTING_DEPTH,
};
