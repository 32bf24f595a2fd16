//! Sensing: touch, distance, input state, questions and attributes.

use cabbage_types::Node;

use super::{Category, Translated, TranslationRegistry, Translator};
use crate::error::CodegenResult;
use crate::python::{engine_call, string_literal, Precedence};

pub(super) fn register(reg: &mut TranslationRegistry) {
    reg.register("detect_touch", Category::Expression, touching);
    reg.register("detect_distance", Category::Expression, distance);
    reg.register("detect_ask", Category::Statement, ask);
    reg.register("detect_keyboard1", Category::Expression, key_pressed);
    reg.register("detect_keyboard0", Category::Expression, key_released);
    reg.register("detect_mouse1", Category::Expression, mouse_down);
    reg.register("detect_mouse0", Category::Expression, mouse_up);
    reg.register("detect_attribute", Category::Expression, attribute);
}

fn call_expr(code: String) -> CodegenResult<Translated> {
    Ok(Translated::expression(code, Precedence::Call))
}

fn negated(code: String) -> CodegenResult<Translated> {
    Ok(Translated::expression(
        format!("not {code}"),
        Precedence::LogicalNot,
    ))
}

fn touching(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    let target = t.field(node, "x");
    call_expr(engine_call("isTouching", &[string_literal(&target)]))
}

fn distance(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    let target = t.field(node, "x");
    call_expr(engine_call("distanceTo", &[string_literal(&target)]))
}

fn ask(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    let question = t.value(node, "QUESTION", Precedence::None, "\"\"")?;
    Ok(Translated::statement(engine_call("ask", &[question])))
}

fn key_pressed(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    let key = t.field(node, "x");
    call_expr(engine_call("isKeyPressed", &[string_literal(&key)]))
}

fn key_released(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    let key = t.field(node, "x");
    negated(engine_call("isKeyPressed", &[string_literal(&key)]))
}

fn mouse_down(_: &Node, _: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    call_expr(engine_call::<&str>("isMouseDown", &[]))
}

fn mouse_up(_: &Node, _: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    negated(engine_call::<&str>("isMouseDown", &[]))
}

fn attribute(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    let name = t.field(node, "ATTRIBUTE");
    let target = t.field(node, "TARGET");
    call_expr(engine_call(
        "attributeOf",
        &[string_literal(&target), string_literal(&name)],
    ))
}
