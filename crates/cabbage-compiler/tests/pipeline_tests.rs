//! End-to-end pipeline tests: JSON workspace → CompileResult.

use cabbage_compiler::{
    compile, compile_json, compile_to_result, compile_with, fingerprint, CompileResult,
    CompilerConfig, ErrorCode, WorkspaceCompiler,
};
use cabbage_codegen::{HookError, HostHooks, ResourceKind};
use cabbage_types::{Node, Workspace};

// ══════════════════════════════════════════════════════════════════════════════
// Workspaces
// ══════════════════════════════════════════════════════════════════════════════

const PLATFORMER: &str = r#"
{
  "nodes": [
    { "id": "start", "type": "event_gameStart", "next": "set",
      "position": { "x": 10, "y": 10 } },
    { "id": "set", "type": "variable_set", "fields": { "VAR": "score" },
      "inputs": { "VALUE": "zero" }, "next": "loop" },
    { "id": "zero", "type": "math_number", "fields": { "NUM": "0" } },
    { "id": "loop", "type": "control_forX", "statements": { "DO": "fall" } },
    { "id": "fall", "type": "engine_Yadd", "inputs": { "VALUE": "g" }, "next": "tick" },
    { "id": "g", "type": "math_number", "fields": { "NUM": "-1" } },
    { "id": "tick", "type": "control_wait", "inputs": { "SECONDS": "dt" } },
    { "id": "dt", "type": "math_number", "fields": { "NUM": "0.02" } },

    { "id": "jump", "type": "event_keyboard", "fields": { "x": "Space" },
      "statements": { "DO": "up" }, "position": { "x": 400, "y": 10 } },
    { "id": "up", "type": "engine_Yadd", "inputs": { "VALUE": "h" }, "next": "inc" },
    { "id": "h", "type": "math_number", "fields": { "NUM": "20" } },
    { "id": "inc", "type": "variable_add", "fields": { "VAR": "score" },
      "inputs": { "VALUE": "one" } },
    { "id": "one", "type": "math_number", "fields": { "NUM": "1" } },

    { "id": "old", "type": "appearance_hide", "enabled": false,
      "position": { "x": 10, "y": 500 } }
  ]
}
"#;

const PLATFORMER_PY: &str = "\
# -*- coding: utf-8 -*-
# Generated from Blockly by CabbageEditor
from Backend.utils.engine_import import load_corona_engine
CoronaEngine = load_corona_engine()
# keyboard / event bridge
from PySide6.QtCore import Slot
from Backend.ui.main_window import get_window
import time
variables = {}

@Slot(str)
def handle(key):
    print(\"key:\", key)
    if key == \"Space\":
        CoronaEngine.changeY(20)
        variables[\"score\"] = variables.get(\"score\", 0) + 1

def run():
    wb = get_window()
    bw = wb.browser_widget
    try:
        if bw is not None:
            prev = getattr(bw, \"_blockly_handle_slot\", None)
            if prev is not None:
                try:
                    bw.input_code_signal.disconnect(prev)
                except Exception:
                    pass
            bw.input_code_signal.connect(handle)
            bw._blockly_handle_slot = handle
    except Exception:
        pass
    CoronaEngine.gameStart()
    variables[\"score\"] = 0
    while True:
        CoronaEngine.changeY(-1)
        time.sleep(0.02)
    # keyboard events ready
";

fn default_config() -> CompilerConfig {
    CompilerConfig::default()
}

// ══════════════════════════════════════════════════════════════════════════════
// Full pipeline
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn platformer_compiles_to_expected_program() {
    let result = compile_json(PLATFORMER, &default_config());
    assert!(result.success, "errors: {:?}", result.errors);
    assert_eq!(result.program.as_deref(), Some(PLATFORMER_PY));
    assert_eq!(
        result.fingerprint.as_deref(),
        Some(fingerprint(PLATFORMER_PY).as_str())
    );
    assert!(result.errors.warnings.is_empty());
}

#[test]
fn compile_matches_compile_json() {
    let ws = Workspace::from_json(PLATFORMER).unwrap();
    assert_eq!(compile(&ws).unwrap(), PLATFORMER_PY);
}

#[test]
fn fingerprint_is_stable() {
    let first = compile_json(PLATFORMER, &default_config());
    for _ in 0..100 {
        let again = compile_json(PLATFORMER, &default_config());
        assert_eq!(again.fingerprint, first.fingerprint);
        assert_eq!(again.program, first.program);
    }
}

#[test]
fn result_json_round_trip() {
    let result = compile_json(PLATFORMER, &default_config());
    let json = serde_json::to_string(&result).unwrap();
    let rt: CompileResult = serde_json::from_str(&json).unwrap();
    assert_eq!(rt, result);
}

// ══════════════════════════════════════════════════════════════════════════════
// Failures
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn invalid_json_reports_e206() {
    let result = compile_json("{ nodes: ", &default_config());
    assert!(!result.success);
    assert!(result.program.is_none());
    assert!(result.fingerprint.is_none());
    assert_eq!(result.errors.errors[0].code, ErrorCode::INVALID_WORKSPACE_JSON);
}

#[test]
fn malformed_workspace_has_no_program() {
    let ws = Workspace::new()
        .with(Node::new("a", "appearance_show"))
        .with(Node::new("a", "appearance_hide"));
    let result = compile_to_result(&ws, &default_config());
    assert!(!result.success);
    assert!(result.program.is_none());
    let error = &result.errors.errors[0];
    assert_eq!(error.code, ErrorCode::DUPLICATE_NODE_ID);
    assert_eq!(error.node_id.as_ref().unwrap().as_str(), "a");

    let errors = compile(&ws).unwrap_err();
    assert!(errors.has_errors());
}

#[test]
fn unknown_block_keeps_partial_program() {
    let ws = Workspace::new()
        .with(Node::new("x", "pen_down").at(0.0, 0.0))
        .with(Node::new("s", "appearance_show").at(0.0, 20.0));
    let result = compile_to_result(&ws, &default_config());
    assert!(!result.success);
    let program = result.program.unwrap();
    assert!(program.ends_with("def run():\n    CoronaEngine.show()\n"));
    assert_eq!(result.errors.total_errors, 1);
    assert_eq!(result.errors.errors[0].code, ErrorCode::UNKNOWN_NODE_TYPE);
    assert!(result.errors.errors[0].suggestion.is_some());
}

#[test]
fn compile_returns_partial_program_without_diagnostics() {
    let ws = Workspace::new()
        .with(Node::new("x", "pen_down").at(0.0, 0.0))
        .with(Node::new("s", "appearance_show").at(0.0, 20.0));
    let text = compile(&ws).unwrap();
    assert!(text.ends_with("def run():\n    CoronaEngine.show()\n"));
    assert_eq!(
        compile_to_result(&ws, &default_config()).program.as_deref(),
        Some(text.as_str())
    );
}

#[test]
fn missing_fields_only_warn() {
    let ws = Workspace::new().with(Node::new("k", "event_keyboard"));
    let result = compile_to_result(&ws, &default_config());
    assert!(result.success);
    assert_eq!(result.errors.warnings[0].code, ErrorCode::MISSING_FIELD);
    assert!(result.program.unwrap().contains("if key == \"\":"));
}

#[test]
fn bad_config_fails_cleanly() {
    let config = CompilerConfig {
        indent: "xx".into(),
        ..CompilerConfig::default()
    };
    let result = compile_json(PLATFORMER, &config);
    assert!(!result.success);
    assert!(result.program.is_none());
    assert_eq!(result.errors.errors[0].code, ErrorCode::INVALID_CONFIG);
}

// ══════════════════════════════════════════════════════════════════════════════
// Configuration & hooks
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn toml_config_changes_layout() {
    let config = CompilerConfig::from_toml_str(
        r#"
indent = "\t"

[header]
generator = "cabbage-cli"
stamp = "2026-01-01"
loader_module = "engine"

[[prelude]]
name = "time"
global = "import time"
"#,
    )
    .unwrap();
    let ws = Workspace::new()
        .with(Node::new("r", "control_forX").with_statements("DO", "w"))
        .with(Node::new("w", "control_wait"));
    let program = compile_to_result(&ws, &config).program.unwrap();
    assert_eq!(
        program,
        "# -*- coding: utf-8 -*-\n\
         # Generated from Blockly by cabbage-cli @ 2026-01-01\n\
         from engine import load_corona_engine\n\
         CoronaEngine = load_corona_engine()\n\
         import time\n\
         \n\
         def run():\n\
         \twhile True:\n\
         \t\ttime.sleep(1)\n"
    );
}

#[derive(Default)]
struct Recorder {
    seen: Vec<String>,
    refuse: bool,
}

impl HostHooks for Recorder {
    fn create_resource(&mut self, kind: ResourceKind, name: &str) -> Result<(), HookError> {
        self.seen.push(format!("{kind}:{name}"));
        if self.refuse {
            return Err(HookError::Unavailable("bridge closed".into()));
        }
        Ok(())
    }
}

#[test]
fn hooks_see_resources_and_failures_warn() {
    let ws = Workspace::from_json(PLATFORMER).unwrap();
    let compiler = WorkspaceCompiler::new();

    let mut ok = Recorder::default();
    let result = compile_with(&compiler, &ws, Some(&mut ok));
    assert!(result.success);
    assert_eq!(ok.seen, ["variable:score"]);

    let mut refusing = Recorder {
        refuse: true,
        ..Recorder::default()
    };
    let refused = compile_with(&compiler, &ws, Some(&mut refusing));
    assert!(refused.success);
    assert_eq!(refused.program, result.program);
    assert_eq!(refused.errors.warnings[0].code, ErrorCode::HOOK_FAILED);
}
