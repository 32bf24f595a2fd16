//! Variables, stored in the `variables` dict declared by the prelude.

use cabbage_types::Node;

use super::{Category, Translated, TranslationRegistry, Translator};
use crate::error::CodegenResult;
use crate::hooks::ResourceKind;
use crate::python::{engine_call, string_literal, Precedence};

const STORE: &str = "variables";

pub(super) fn register(reg: &mut TranslationRegistry) {
    reg.register("variable_set", Category::Statement, set);
    reg.register("variable_add", Category::Statement, add);
    reg.register("variable_get", Category::Expression, get);
    reg.register("variable_show", Category::Statement, show);
    reg.register("variable_hide", Category::Statement, hide);
}

/// Read the variable name and make sure the store exists.
fn variable_name(node: &Node, t: &mut Translator<'_, '_>) -> String {
    t.request(STORE);
    t.field(node, "VAR")
}

fn variable(node: &Node, t: &mut Translator<'_, '_>) -> String {
    string_literal(&variable_name(node, t))
}

fn set(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    let name = variable_name(node, t);
    t.create_resource(node, ResourceKind::Variable, &name);
    let key = string_literal(&name);
    let value = t.value(node, "VALUE", Precedence::None, "0")?;
    Ok(Translated::statement(format!("{STORE}[{key}] = {value}")))
}

fn add(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    let key = variable(node, t);
    let value = t.value(node, "VALUE", Precedence::Additive, "0")?;
    Ok(Translated::statement(format!(
        "{STORE}[{key}] = {STORE}.get({key}, 0) + {value}"
    )))
}

fn get(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    let key = variable(node, t);
    Ok(Translated::expression(
        format!("{STORE}.get({key}, 0)"),
        Precedence::Call,
    ))
}

fn show(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    let key = variable(node, t);
    Ok(Translated::statement(engine_call("showVariable", &[key])))
}

fn hide(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    let key = variable(node, t);
    Ok(Translated::statement(engine_call("hideVariable", &[key])))
}
