//! Motion blocks driving the actor through the engine object.

use cabbage_types::Node;

use super::{Category, Translated, TranslationRegistry, Translator};
use crate::error::CodegenResult;
use crate::python::{engine_call, string_literal, Precedence};

pub(super) fn register(reg: &mut TranslationRegistry) {
    reg.register("engine_move", Category::Statement, move_steps);
    reg.register("engine_rotateX", Category::Statement, rotate_x);
    reg.register("engine_rotateY", Category::Statement, rotate_y);
    reg.register("engine_face", Category::Statement, face);
    reg.register("engine_moveto", Category::Statement, move_to);
    reg.register("engine_movetoXYZ", Category::Statement, move_to_xyz);
    reg.register("engine_movetoXYZtime", Category::Statement, glide_to_xyz);
    reg.register("engine_Xset", Category::Statement, set_x);
    reg.register("engine_Yset", Category::Statement, set_y);
    reg.register("engine_Zset", Category::Statement, set_z);
    reg.register("engine_Xadd", Category::Statement, change_x);
    reg.register("engine_Yadd", Category::Statement, change_y);
    reg.register("engine_Zadd", Category::Statement, change_z);
    reg.register("engine_X", Category::Expression, get_x);
    reg.register("engine_Y", Category::Expression, get_y);
    reg.register("engine_Z", Category::Expression, get_z);
}

/// `CoronaEngine.<method>(<input>)` with a single numeric input.
fn unary_call(
    method: &str,
    input: &str,
    node: &Node,
    t: &mut Translator<'_, '_>,
) -> CodegenResult<Translated> {
    let arg = t.value(node, input, Precedence::None, "0")?;
    Ok(Translated::statement(engine_call(method, &[arg])))
}

fn getter(method: &str) -> CodegenResult<Translated> {
    Ok(Translated::expression(
        engine_call::<&str>(method, &[]),
        Precedence::Call,
    ))
}

fn xyz(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<[String; 3]> {
    Ok([
        t.value(node, "X", Precedence::None, "0")?,
        t.value(node, "Y", Precedence::None, "0")?,
        t.value(node, "Z", Precedence::None, "0")?,
    ])
}

fn move_steps(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    unary_call("move", "STEPS", node, t)
}

fn rotate_x(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    unary_call("rotateX", "DEGREES", node, t)
}

fn rotate_y(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    unary_call("rotateY", "DEGREES", node, t)
}

fn face(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    unary_call("face", "DIRECTION", node, t)
}

fn move_to(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    let target = t.field(node, "x");
    Ok(Translated::statement(engine_call(
        "moveTo",
        &[string_literal(&target)],
    )))
}

fn move_to_xyz(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    let coords = xyz(node, t)?;
    Ok(Translated::statement(engine_call("moveToXYZ", &coords)))
}

fn glide_to_xyz(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    let seconds = t.value(node, "TIME", Precedence::None, "1")?;
    let [x, y, z] = xyz(node, t)?;
    Ok(Translated::statement(engine_call(
        "glideToXYZ",
        &[seconds, x, y, z],
    )))
}

fn set_x(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    unary_call("setX", "VALUE", node, t)
}

fn set_y(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    unary_call("setY", "VALUE", node, t)
}

fn set_z(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    unary_call("setZ", "VALUE", node, t)
}

fn change_x(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    unary_call("changeX", "VALUE", node, t)
}

fn change_y(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    unary_call("changeY", "VALUE", node, t)
}

fn change_z(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    unary_call("changeZ", "VALUE", node, t)
}

fn get_x(_: &Node, _: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    getter("getX")
}

fn get_y(_: &Node, _: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    getter("getY")
}

fn get_z(_: &Node, _: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    getter("getZ")
}
