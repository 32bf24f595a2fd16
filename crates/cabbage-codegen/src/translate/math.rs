//! Literals and operators.

use cabbage_types::Node;

use super::{Category, Translated, TranslationRegistry, Translator};
use crate::error::CodegenResult;
use crate::python::{string_literal, Precedence};

pub(super) fn register(reg: &mut TranslationRegistry) {
    reg.register("math_number", Category::Expression, number);
    reg.register("text", Category::Expression, text);
    reg.register("math_add", Category::Expression, add);
    reg.register("math_sub", Category::Expression, sub);
    reg.register("math_mul", Category::Expression, mul);
    reg.register("math_div", Category::Expression, div);
    reg.register("math_random", Category::Expression, random);
    reg.register("math_G", Category::Expression, greater);
    reg.register("math_L", Category::Expression, less);
    reg.register("math_E", Category::Expression, equal);
    reg.register("math_AND", Category::Expression, and);
    reg.register("math_OR", Category::Expression, or);
    reg.register("math_NOT", Category::Expression, not);
    reg.register("math_connect", Category::Expression, join);
}

/// Number literal, embedded verbatim.
fn number(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    let value = t.field(node, "NUM");
    let precedence = if value.trim_start().starts_with('-') {
        Precedence::Unary
    } else {
        Precedence::Atomic
    };
    Ok(Translated::expression(value.trim().to_string(), precedence))
}

fn text(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    let value = t.field(node, "TEXT");
    Ok(Translated::expression(string_literal(&value), Precedence::Atomic))
}

/// `A <op> B` where both operands sit in a slot of the operator's own
/// precedence.
fn binary(
    node: &Node,
    t: &mut Translator<'_, '_>,
    op: &str,
    precedence: Precedence,
    default: &str,
) -> CodegenResult<Translated> {
    let a = t.value(node, "A", precedence, default)?;
    let b = t.value(node, "B", precedence, default)?;
    Ok(Translated::expression(format!("{a} {op} {b}"), precedence))
}

fn add(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    binary(node, t, "+", Precedence::Additive, "0")
}

fn sub(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    binary(node, t, "-", Precedence::Additive, "0")
}

fn mul(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    binary(node, t, "*", Precedence::Multiplicative, "0")
}

fn div(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    binary(node, t, "/", Precedence::Multiplicative, "1")
}

fn greater(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    binary(node, t, ">", Precedence::Relational, "0")
}

fn less(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    binary(node, t, "<", Precedence::Relational, "0")
}

fn equal(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    binary(node, t, "==", Precedence::Relational, "0")
}

fn and(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    binary(node, t, "and", Precedence::LogicalAnd, "False")
}

fn or(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    binary(node, t, "or", Precedence::LogicalOr, "False")
}

fn not(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    let a = t.value(node, "A", Precedence::LogicalNot, "True")?;
    Ok(Translated::expression(format!("not {a}"), Precedence::LogicalNot))
}

fn random(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    t.request("random");
    let from = t.value(node, "FROM", Precedence::None, "1")?;
    let to = t.value(node, "TO", Precedence::None, "10")?;
    Ok(Translated::expression(
        format!("random.randint({from}, {to})"),
        Precedence::Call,
    ))
}

/// String concatenation of any two values.
fn join(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    let a = t.value(node, "A", Precedence::None, "\"\"")?;
    let b = t.value(node, "B", Precedence::None, "\"\"")?;
    Ok(Translated::expression(
        format!("str({a}) + str({b})"),
        Precedence::Additive,
    ))
}
