//! Cabbage compiler as a WASM module for the browser editor.
//!
//! # Usage (JavaScript)
//!
//! ```js
//! import init, { compile } from 'cabbage-wasm';
//!
//! await init();
//!
//! const result = JSON.parse(compile(JSON.stringify(workspace)));
//! // { success: true, program: "# -*- coding: utf-8 -*-\n...", fingerprint: "9f2c...", errors: { ... } }
//! ```

use cabbage_compiler::{CompileResult, CompilerConfig, Workspace};
use wasm_bindgen::prelude::*;

fn to_json(result: &CompileResult) -> String {
    serde_json::to_string(result).unwrap_or_else(|e| {
        format!(
            r#"{{"success":false,"program":null,"fingerprint":null,"errors":{{"errors":[{{"message":"Serialization error: {}"}}],"warnings":[],"total_errors":1,"total_warnings":0}}}}"#,
            e
        )
    })
}

fn config_from(config_toml: Option<String>) -> Result<CompilerConfig, CompileResult> {
    match config_toml {
        None => Ok(CompilerConfig::default()),
        Some(text) => CompilerConfig::from_toml_str(&text).map_err(|err| {
            let mut errors = cabbage_types::CompileErrors::empty();
            errors.push(err.to_diagnostic());
            CompileResult {
                success: false,
                program: None,
                fingerprint: None,
                errors,
            }
        }),
    }
}

/// Compile a workspace given as JSON text.
///
/// Returns a JSON string containing a `CompileResult`. On failure `success`
/// is `false`; `program` is `null` only when nothing could be compiled.
#[wasm_bindgen]
pub fn compile(workspace_json: &str) -> String {
    to_json(&cabbage_compiler::compile_json(
        workspace_json,
        &CompilerConfig::default(),
    ))
}

/// Like [`compile`], with an optional TOML configuration.
#[wasm_bindgen]
pub fn compile_with_config(workspace_json: &str, config_toml: Option<String>) -> String {
    match config_from(config_toml) {
        Ok(config) => to_json(&cabbage_compiler::compile_json(workspace_json, &config)),
        Err(result) => to_json(&result),
    }
}

/// Compile a workspace passed as a JS object, returning the result as a JS
/// object.
#[wasm_bindgen]
pub fn compile_value(workspace: JsValue) -> Result<JsValue, JsValue> {
    let workspace: Workspace = serde_wasm_bindgen::from_value(workspace)?;
    let result = cabbage_compiler::compile_to_result(&workspace, &CompilerConfig::default());
    Ok(serde_wasm_bindgen::to_value(&result)?)
}

/// Launcher module for the given generated script modules.
#[wasm_bindgen]
pub fn runner(modules: Vec<String>) -> Result<String, JsValue> {
    cabbage_compiler::render_runner(cabbage_compiler::DEFAULT_SCRIPT_PACKAGE, &modules)
        .map_err(|err| JsValue::from_str(&err.to_string()))
}

/// Return the compiler version string.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_returns_result_json() {
        let out = compile(r#"{ "nodes": [ { "id": "a", "type": "appearance_show" } ] }"#);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["success"], true);
        assert!(value["program"]
            .as_str()
            .unwrap()
            .ends_with("def run():\n    CoronaEngine.show()\n"));
        assert_eq!(value["fingerprint"].as_str().unwrap().len(), 64);
    }

    #[test]
    fn bad_json_is_reported() {
        let value: serde_json::Value = serde_json::from_str(&compile("[")).unwrap();
        assert_eq!(value["success"], false);
        assert!(value["program"].is_null());
        assert_eq!(value["errors"]["errors"][0]["code"], 206);
    }

    #[test]
    fn config_is_applied() {
        let out = compile_with_config(
            r#"{ "nodes": [] }"#,
            Some("[header]\ngenerator = \"web\"\n".to_string()),
        );
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(value["program"]
            .as_str()
            .unwrap()
            .contains("# Generated from Blockly by web\n"));

        let bad = compile_with_config(r#"{ "nodes": [] }"#, Some("nope = 1".to_string()));
        let value: serde_json::Value = serde_json::from_str(&bad).unwrap();
        assert_eq!(value["errors"]["errors"][0]["code"], 500);
    }

    #[test]
    fn version_matches_package() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }
}
