//! The fixed header every generated module starts with.

use serde::{Deserialize, Serialize};

/// Header options.
///
/// The compiler never reads the clock: a caller that wants a generation
/// timestamp passes it as `stamp`, so recompiling an unchanged workspace
/// stays byte-identical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Header {
    /// Tool name written into the provenance comment.
    pub generator: String,
    /// Optional free-form stamp appended to the provenance comment.
    pub stamp: Option<String>,
    /// Module providing `load_corona_engine`.
    pub loader_module: String,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            generator: "CabbageEditor".to_string(),
            stamp: None,
            loader_module: "Backend.utils.engine_import".to_string(),
        }
    }
}

impl Header {
    /// Render the header lines, without a trailing line break.
    pub fn render(&self) -> String {
        let provenance = match &self.stamp {
            Some(stamp) => format!("# Generated from Blockly by {} @ {stamp}", self.generator),
            None => format!("# Generated from Blockly by {}", self.generator),
        };
        [
            "# -*- coding: utf-8 -*-".to_string(),
            provenance,
            format!("from {} import load_corona_engine", self.loader_module),
            "CoronaEngine = load_corona_engine()".to_string(),
        ]
        .join("\n")
    }
}
