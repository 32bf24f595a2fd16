//! Cabbage compiler: entry points for the block-to-Python pipeline.
//!
//! ```text
//! Workspace JSON → Workspace → graph validation → translation → preludes → program text
//! ```
//!
//! The heavy lifting lives in [`cabbage_codegen`]; this crate adds
//! configuration, a serialisable [`CompileResult`] for editor bridges, the
//! output fingerprint and the launcher script.

pub mod config;
pub mod runner;

pub use cabbage_codegen::{CompiledProgram, HostHooks, WorkspaceCompiler};
pub use cabbage_types::{CompileErrors, Diagnostic, ErrorCode, Workspace};
pub use config::{CompilerConfig, ConfigError};
pub use runner::{render_runner, RunnerError, DEFAULT_SCRIPT_PACKAGE};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

/// Outcome of one compilation, serialisable for the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompileResult {
    /// `true` when no error-severity diagnostic was raised.
    pub success: bool,
    /// Program text; absent only when the workspace could not be compiled
    /// at all.
    pub program: Option<String>,
    /// SHA-256 of `program`, lowercase hex.
    pub fingerprint: Option<String>,
    pub errors: CompileErrors,
}

impl CompileResult {
    fn failed(diagnostic: Diagnostic) -> Self {
        let mut errors = CompileErrors::empty();
        errors.push(diagnostic);
        Self {
            success: false,
            program: None,
            fingerprint: None,
            errors,
        }
    }
}

/// Lowercase hex SHA-256 of `text`.
pub fn fingerprint(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Compile with the default configuration.
///
/// Fails only when the workspace itself is malformed. Roots that fail to
/// translate are left out of the program and their diagnostics are
/// discarded; use [`compile_to_result`] to keep them.
pub fn compile(workspace: &Workspace) -> Result<String, CompileErrors> {
    WorkspaceCompiler::new()
        .compile_to_text(workspace)
        .map_err(|err| {
            let mut errors = CompileErrors::empty();
            errors.push(err.to_diagnostic());
            errors
        })
}

/// Compile with an explicit compiler and optional host hooks.
pub fn compile_with(
    compiler: &WorkspaceCompiler,
    workspace: &Workspace,
    hooks: Option<&mut dyn HostHooks>,
) -> CompileResult {
    match compiler.compile_with_hooks(workspace, hooks) {
        Ok(program) => {
            let text = compiler.render(&program);
            let hash = fingerprint(&text);
            debug!(fingerprint = %hash, bytes = text.len(), "program rendered");
            CompileResult {
                success: !program.diagnostics.has_errors(),
                program: Some(text),
                fingerprint: Some(hash),
                errors: program.diagnostics,
            }
        }
        Err(err) => CompileResult::failed(err.to_diagnostic()),
    }
}

/// Compile `workspace` with `config`.
pub fn compile_to_result(workspace: &Workspace, config: &CompilerConfig) -> CompileResult {
    match config.build() {
        Ok(compiler) => compile_with(&compiler, workspace, None),
        Err(err) => CompileResult::failed(err.to_diagnostic()),
    }
}

/// Parse the editor's JSON workspace and compile it.
pub fn compile_json(json: &str, config: &CompilerConfig) -> CompileResult {
    match Workspace::from_json(json) {
        Ok(workspace) => compile_to_result(&workspace, config),
        Err(err) => CompileResult::failed(Diagnostic::error(
            ErrorCode::INVALID_WORKSPACE_JSON,
            format!("invalid workspace JSON: {err}"),
        )),
    }
}
