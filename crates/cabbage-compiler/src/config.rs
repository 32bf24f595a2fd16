//! Compiler configuration, loaded from TOML.
//!
//! ```toml
//! indent = "    "
//!
//! [header]
//! generator = "CabbageEditor"
//! loader_module = "Backend.utils.engine_import"
//!
//! [[prelude]]
//! name = "time"
//! global = "import time"
//! ```
//!
//! Every key is optional. A `[[prelude]]` list replaces the built-in
//! catalog as a whole.
//!
//! The handler is always emitted as `@Slot(str) def handle(key)`, so a
//! replacement `keyboard` fragment must bring `Slot` into scope:
//!
//! ```toml
//! [[prelude]]
//! name = "keyboard"
//! global = "from PySide6.QtCore import Slot"
//! prologue = "bridge.connect(handle)"
//! ```

use std::path::{Path, PathBuf};

use cabbage_codegen::{
    Assembler, CodegenError, Header, PreludeCatalog, PreludeFragment, WorkspaceCompiler,
};
use cabbage_types::{Diagnostic, ErrorCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_INDENT: &str = "    ";

/// Errors raised while loading or applying a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    /// The indent unit must be non-empty and made of spaces or tabs only.
    #[error("invalid indent unit {0:?}")]
    InvalidIndent(String),

    #[error(transparent)]
    Catalog(#[from] CodegenError),
}

impl ConfigError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Self::Catalog(err) => err.to_diagnostic(),
            _ => Diagnostic::error(ErrorCode::INVALID_CONFIG, self.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    pub header: Header,
    /// One indentation level in generated code.
    pub indent: String,
    /// Replacement prelude catalog; `None` keeps the built-in one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prelude: Option<Vec<PreludeFragment>>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            header: Header::default(),
            indent: DEFAULT_INDENT.to_string(),
            prelude: None,
        }
    }
}

impl CompilerConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    fn catalog(&self) -> Result<PreludeCatalog, ConfigError> {
        match &self.prelude {
            Some(fragments) => Ok(PreludeCatalog::new(fragments.clone())?),
            None => Ok(PreludeCatalog::builtin()),
        }
    }

    /// A compiler with the built-in translators and this configuration.
    pub fn build(&self) -> Result<WorkspaceCompiler, ConfigError> {
        if self.indent.is_empty() || !self.indent.chars().all(|c| c == ' ' || c == '\t') {
            return Err(ConfigError::InvalidIndent(self.indent.clone()));
        }
        Ok(WorkspaceCompiler::new()
            .with_header(self.header.clone())
            .with_catalog(self.catalog()?)
            .with_assembler(Assembler::new(self.indent.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        let config = CompilerConfig::from_toml_str("").unwrap();
        assert_eq!(config, CompilerConfig::default());
        assert_eq!(config.indent, "    ");
    }

    #[test]
    fn header_and_indent() {
        let config = CompilerConfig::from_toml_str(
            r#"
indent = "  "

[header]
generator = "Cabbage 2"
stamp = "build 7"
"#,
        )
        .unwrap();
        assert_eq!(config.indent, "  ");
        assert_eq!(config.header.generator, "Cabbage 2");
        assert_eq!(config.header.stamp.as_deref(), Some("build 7"));
        assert_eq!(config.header.loader_module, "Backend.utils.engine_import");
    }

    #[test]
    fn prelude_replaces_catalog() {
        let config = CompilerConfig::from_toml_str(
            r#"
[[prelude]]
name = "time"
global = "import time as _t"

[[prelude]]
name = "keyboard"
prologue = "bridge.connect(handle)"
"#,
        )
        .unwrap();
        let compiler = config.build().unwrap();
        let names: Vec<_> = compiler
            .catalog()
            .fragments()
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, ["time", "keyboard"]);
    }

    #[test]
    fn replacement_keyboard_fragment_imports_slot() {
        use cabbage_types::{Node, Workspace};

        let config = CompilerConfig::from_toml_str(
            r#"
[[prelude]]
name = "keyboard"
global = "from PySide6.QtCore import Slot"
prologue = "bridge.connect(handle)"
"#,
        )
        .unwrap();
        let ws = Workspace::new().with(Node::new("k", "event_keyboard").with_field("x", "w"));
        let text = config.build().unwrap().compile_to_text(&ws).unwrap();
        let import = text.find("from PySide6.QtCore import Slot").unwrap();
        let decorator = text.find("@Slot(str)\ndef handle(key):").unwrap();
        assert!(import < decorator);
        assert!(text.contains("    bridge.connect(handle)\n"));
    }

    #[test]
    fn duplicate_fragment_rejected() {
        let config = CompilerConfig::from_toml_str(
            r#"
[[prelude]]
name = "time"

[[prelude]]
name = "time"
"#,
        )
        .unwrap();
        assert!(matches!(
            config.build(),
            Err(ConfigError::Catalog(CodegenError::DuplicateFragment(ref name))) if name == "time"
        ));
    }

    #[test]
    fn unknown_key_rejected() {
        let err = CompilerConfig::from_toml_str("indnet = \"  \"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
        assert_eq!(err.to_diagnostic().code, ErrorCode::INVALID_CONFIG);
    }

    #[test]
    fn bad_indent_rejected() {
        for indent in ["", "ab", " x"] {
            let config = CompilerConfig {
                indent: indent.to_string(),
                ..CompilerConfig::default()
            };
            assert!(matches!(config.build(), Err(ConfigError::InvalidIndent(_))));
        }
    }

    #[test]
    fn missing_file_reports_path() {
        let err = CompilerConfig::load("/nonexistent/cabbage.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/cabbage.toml"));
    }
}
