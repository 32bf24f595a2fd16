//! Prelude fragments: shared support code requested by translators.
//!
//! A fragment contributes text at up to three fixed places in the output:
//! module level (`global`), the start of `run()` (`prologue`) and the end of
//! `run()` (`epilogue`). However often a fragment is requested during a
//! pass, it is rendered at most once per insertion point, and fragments are
//! always rendered in catalog order rather than request order.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{CodegenError, CodegenResult};

/// Where a fragment's text lands in the assembled module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertionPoint {
    Global,
    Prologue,
    Epilogue,
}

impl InsertionPoint {
    pub const ALL: [InsertionPoint; 3] = [Self::Global, Self::Prologue, Self::Epilogue];
}

/// A named block of support code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreludeFragment {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prologue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epilogue: Option<String>,
}

impl PreludeFragment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            global: None,
            prologue: None,
            epilogue: None,
        }
    }

    pub fn with_global(mut self, text: impl Into<String>) -> Self {
        self.global = Some(text.into());
        self
    }

    pub fn with_prologue(mut self, text: impl Into<String>) -> Self {
        self.prologue = Some(text.into());
        self
    }

    pub fn with_epilogue(mut self, text: impl Into<String>) -> Self {
        self.epilogue = Some(text.into());
        self
    }

    /// Text for `point` with trailing line breaks removed, or `None` when
    /// the fragment contributes nothing there.
    pub fn text_at(&self, point: InsertionPoint) -> Option<&str> {
        let text = match point {
            InsertionPoint::Global => self.global.as_deref(),
            InsertionPoint::Prologue => self.prologue.as_deref(),
            InsertionPoint::Epilogue => self.epilogue.as_deref(),
        }?;
        let text = text.trim_end_matches(['\r', '\n']);
        (!text.is_empty()).then_some(text)
    }
}

/// The ordered set of known fragments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PreludeCatalog {
    fragments: Vec<PreludeFragment>,
}

impl PreludeCatalog {
    /// Build a catalog; the order given is the rendering order.
    pub fn new(fragments: Vec<PreludeFragment>) -> CodegenResult<Self> {
        let mut seen = HashSet::new();
        for fragment in &fragments {
            if !seen.insert(fragment.name.as_str()) {
                return Err(CodegenError::DuplicateFragment(fragment.name.clone()));
            }
        }
        Ok(Self { fragments })
    }

    pub fn empty() -> Self {
        Self {
            fragments: Vec::new(),
        }
    }

    /// The fragments the built-in translators request.
    pub fn builtin() -> Self {
        let keyboard = PreludeFragment::new("keyboard")
            .with_global(
                [
                    "# keyboard / event bridge",
                    "from PySide6.QtCore import Slot",
                    "from Backend.ui.main_window import get_window",
                ]
                .join("\n"),
            )
            .with_prologue(
                [
                    "wb = get_window()",
                    "bw = wb.browser_widget",
                    "try:",
                    "    if bw is not None:",
                    "        prev = getattr(bw, \"_blockly_handle_slot\", None)",
                    "        if prev is not None:",
                    "            try:",
                    "                bw.input_code_signal.disconnect(prev)",
                    "            except Exception:",
                    "                pass",
                    "        bw.input_code_signal.connect(handle)",
                    "        bw._blockly_handle_slot = handle",
                    "except Exception:",
                    "    pass",
                ]
                .join("\n"),
            )
            .with_epilogue("# keyboard events ready");

        Self {
            fragments: vec![
                keyboard,
                PreludeFragment::new("time").with_global("import time"),
                PreludeFragment::new("random").with_global("import random"),
                PreludeFragment::new("variables").with_global("variables = {}"),
            ],
        }
    }

    pub fn get(&self, name: &str) -> Option<&PreludeFragment> {
        self.fragments.iter().find(|f| f.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn fragments(&self) -> &[PreludeFragment] {
        &self.fragments
    }

    /// Render the requested fragments' text for `point`.
    ///
    /// Iterates in catalog order, skips fragments with nothing at `point`
    /// and joins the rest with single line breaks. Requested names that are
    /// not in the catalog are ignored. Returns an empty string when nothing
    /// contributes.
    pub fn render_at(&self, requested: &BTreeSet<String>, point: InsertionPoint) -> String {
        self.fragments
            .iter()
            .filter(|f| requested.contains(&f.name))
            .filter_map(|f| f.text_at(point))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for PreludeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
