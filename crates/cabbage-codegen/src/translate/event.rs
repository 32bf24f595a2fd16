//! Event blocks: game start, keyboard triggers, broadcasts, mouse callbacks.

use cabbage_types::Node;

use super::{Category, Translated, TranslationRegistry, Translator};
use crate::error::CodegenResult;
use crate::hooks::ResourceKind;
use crate::python::{comment_text, engine_call, identifier_part, string_literal};

pub(super) fn register(reg: &mut TranslationRegistry) {
    reg.register("event_gameStart", Category::Statement, game_start);
    reg.register("event_keyboard", Category::Reactive, keyboard);
    reg.register("event_keyboard_combo", Category::Reactive, keyboard_combo);
    reg.register("event_RB", Category::Statement, receive_broadcast);
    reg.register("event_broadcast", Category::Statement, broadcast);
    reg.register("event_broadcastWait", Category::Statement, broadcast_wait);
    reg.register("event_mouse_click", Category::Statement, mouse_click);
    reg.register("event_mouse_move", Category::Statement, mouse_move);
    reg.register("event_mouse_wheel", Category::Statement, mouse_wheel);
    reg.register("event_mouse_contextmenu", Category::Statement, mouse_contextmenu);
}

fn game_start(_: &Node, _: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    Ok(Translated::statement(engine_call::<&str>("gameStart", &[])))
}

/// `if key == "<key>":` inside `handle(key)`.
fn keyboard(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    t.request("keyboard");
    let key = t.field(node, "x");
    let body = t.statements(node, "DO")?;
    Ok(Translated::statement(format!(
        "if key == {}:\n{body}",
        string_literal(&key)
    )))
}

fn keyboard_combo(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    t.request("keyboard");
    let combo = t.field(node, "combo");
    let body = t.statements(node, "DO")?;
    Ok(Translated::statement(format!(
        "# key combo: {}\nif key == {}:\n{body}",
        comment_text(&combo),
        string_literal(&combo)
    )))
}

fn broadcast_call(
    method: &str,
    node: &Node,
    t: &mut Translator<'_, '_>,
) -> CodegenResult<Translated> {
    let name = t.field(node, "x");
    t.create_resource(node, ResourceKind::Broadcast, &name);
    Ok(Translated::statement(engine_call(
        method,
        &[string_literal(&name)],
    )))
}

fn receive_broadcast(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    broadcast_call("RB", node, t)
}

fn broadcast(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    broadcast_call("broadcast", node, t)
}

fn broadcast_wait(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    broadcast_call("broadcastWait", node, t)
}

/// A nested callback definition with an optional `DO` body.
fn callback(
    comment: &str,
    signature: &str,
    node: &Node,
    t: &mut Translator<'_, '_>,
) -> CodegenResult<Translated> {
    let body = t.statements(node, "DO")?;
    Ok(Translated::statement(format!(
        "# {comment}\ndef {signature}:\n{body}"
    )))
}

fn mouse_click(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    let button = t.field(node, "button");
    callback(
        &format!("when the {} mouse button is clicked", comment_text(&button)),
        &format!("on_mouse_click_{}()", identifier_part(&button)),
        node,
        t,
    )
}

fn mouse_move(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    callback("when the mouse moves", "on_mouse_move(x, y)", node, t)
}

fn mouse_wheel(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    callback("when the mouse wheel scrolls", "on_mouse_wheel(delta)", node, t)
}

fn mouse_contextmenu(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    callback(
        "when the context menu is requested",
        "on_mouse_contextmenu(x, y)",
        node,
        t,
    )
}
