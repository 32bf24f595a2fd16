//! Launcher module importing every generated script.
//!
//! The host keeps one generated module per workspace in a script package
//! and starts them all through a single `run()`:
//!
//! ```python
//! from Backend.script import blockly_code
//! from Backend.script import blockly_code_2
//!
//!
//! def run():
//!     blockly_code.run()
//!     blockly_code_2.run()
//! ```

use std::collections::BTreeSet;

use cabbage_codegen::ENTRY_NAME;
use cabbage_types::{Diagnostic, ErrorCode};
use thiserror::Error;

/// Package the host stores generated scripts in.
pub const DEFAULT_SCRIPT_PACKAGE: &str = "Backend.script";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunnerError {
    #[error("'{0}' is not a valid Python module name")]
    InvalidModuleName(String),
    #[error("'{0}' is not a valid Python package path")]
    InvalidPackage(String),
}

impl RunnerError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(ErrorCode::INVALID_MODULE_NAME, self.to_string())
            .with_suggestion("use letters, digits and underscores, not starting with a digit")
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// Render the launcher for `modules` living in `package`.
///
/// Modules are sorted and deduplicated; an empty list yields a `run()` that
/// does nothing.
pub fn render_runner<S: AsRef<str>>(package: &str, modules: &[S]) -> Result<String, RunnerError> {
    if !package.split('.').all(is_identifier) {
        return Err(RunnerError::InvalidPackage(package.to_string()));
    }
    let mut names = BTreeSet::new();
    for module in modules {
        let module = module.as_ref();
        if !is_identifier(module) {
            return Err(RunnerError::InvalidModuleName(module.to_string()));
        }
        names.insert(module);
    }

    if names.is_empty() {
        return Ok(format!("def {ENTRY_NAME}():\n    pass\n"));
    }

    let mut out = String::new();
    for name in &names {
        out.push_str(&format!("from {package} import {name}\n"));
    }
    out.push_str(&format!("\n\ndef {ENTRY_NAME}():\n"));
    for name in &names {
        out.push_str(&format!("    {name}.{ENTRY_NAME}()\n"));
    }
    Ok(out)
}
