//! Control flow: waits, loops, conditionals, stopping, clones and scenes.

use cabbage_types::Node;

use super::{Category, Translated, TranslationRegistry, Translator};
use crate::error::CodegenResult;
use crate::python::{engine_call, string_literal, Precedence};

/// Poll interval of `wait until`, in seconds.
const POLL_INTERVAL: &str = "0.01";

pub(super) fn register(reg: &mut TranslationRegistry) {
    reg.register("control_wait", Category::Statement, wait);
    reg.register("control_for", Category::Statement, repeat);
    reg.register("control_forX", Category::Statement, forever);
    reg.register("control_if", Category::Statement, if_then);
    reg.register("control_else", Category::Statement, if_else);
    reg.register("control_wait2", Category::Statement, wait_until);
    reg.register("control_until", Category::Statement, repeat_until);
    reg.register("control_stop", Category::Statement, stop);
    reg.register("control_cloneStart", Category::Statement, clone_start);
    reg.register("control_clone", Category::Statement, clone);
    reg.register("control_cloneDEL", Category::Statement, delete_clone);
    reg.register("control_senceSet", Category::Statement, set_scene);
    reg.register("control_nextSence", Category::Statement, next_scene);
}

fn wait(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    t.request("time");
    let seconds = t.value(node, "SECONDS", Precedence::None, "1")?;
    Ok(Translated::statement(format!("time.sleep({seconds})")))
}

fn repeat(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    let times = t.value(node, "TIMES", Precedence::None, "10")?;
    let body = t.statements(node, "DO")?;
    Ok(Translated::statement(format!(
        "for _ in range(int({times})):\n{body}"
    )))
}

fn forever(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    let body = t.statements(node, "DO")?;
    Ok(Translated::statement(format!("while True:\n{body}")))
}

fn if_then(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    let condition = t.value(node, "CONDITION", Precedence::None, "False")?;
    let body = t.statements(node, "DO")?;
    Ok(Translated::statement(format!("if {condition}:\n{body}")))
}

fn if_else(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    let condition = t.value(node, "CONDITION", Precedence::None, "False")?;
    let then_body = t.statements(node, "DO")?;
    let else_body = t.statements(node, "ELSE")?;
    Ok(Translated::statement(format!(
        "if {condition}:\n{then_body}else:\n{else_body}"
    )))
}

fn wait_until(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    t.request("time");
    let condition = t.value(node, "CONDITION", Precedence::LogicalNot, "False")?;
    Ok(Translated::statement(format!(
        "while not {condition}:\n{}time.sleep({POLL_INTERVAL})",
        t.indent()
    )))
}

fn repeat_until(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    let condition = t.value(node, "CONDITION", Precedence::LogicalNot, "False")?;
    let body = t.statements(node, "DO")?;
    Ok(Translated::statement(format!(
        "while not {condition}:\n{body}"
    )))
}

/// `MODE` is `all`, `other` or `this` (the default).
fn stop(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    let mode = t.field(node, "MODE");
    let code = match mode.as_str() {
        "all" => engine_call::<&str>("stopAll", &[]),
        "other" => engine_call::<&str>("stopOtherScripts", &[]),
        _ => "return".to_string(),
    };
    Ok(Translated::statement(code))
}

fn clone_start(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    let body = t.statements(node, "DO")?;
    Ok(Translated::statement(format!(
        "def on_clone_start():\n{body}{}",
        engine_call("onCloneStart", &["on_clone_start"])
    )))
}

fn clone(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    let target = t.field(node, "x");
    Ok(Translated::statement(engine_call(
        "clone",
        &[string_literal(&target)],
    )))
}

fn delete_clone(_: &Node, _: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    Ok(Translated::statement(engine_call::<&str>("deleteClone", &[])))
}

fn set_scene(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    let scene = t.field(node, "x");
    Ok(Translated::statement(engine_call(
        "setScene",
        &[string_literal(&scene)],
    )))
}

fn next_scene(_: &Node, _: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    Ok(Translated::statement(engine_call::<&str>("nextScene", &[])))
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use cabbage_types::{Node, Workspace};

    fn number(id: &str, value: &str) -> Node {
        Node::new(id, "math_number").with_field("NUM", value)
    }

    #[test]
    fn wait_requests_time() {
        let ws = Workspace::new()
            .with(Node::new("w", "control_wait").with_input("SECONDS", "s"))
            .with(number("s", "0.5"));
        assert_eq!(code(&ws), "time.sleep(0.5)\n");
        assert_eq!(requested(&ws), vec!["time"]);
    }

    #[test]
    fn if_else_both_branches() {
        let ws = Workspace::new()
            .with(
                Node::new("i", "control_else")
                    .with_input("CONDITION", "c")
                    .with_statements("DO", "a"),
            )
            .with(Node::new("c", "detect_mouse1"))
            .with(Node::new("a", "appearance_show"));
        assert_eq!(
            code(&ws),
            "if CoronaEngine.isMouseDown():\n    CoronaEngine.show()\nelse:\n    pass\n"
        );
    }

    #[test]
    fn if_without_condition_is_false() {
        let ws = Workspace::new().with(Node::new("i", "control_if"));
        assert_eq!(code(&ws), "if False:\n    pass\n");
    }

    #[test]
    fn wait_until_polls() {
        let ws = Workspace::new()
            .with(Node::new("w", "control_wait2").with_input("CONDITION", "c"))
            .with(Node::new("c", "math_AND").with_input("A", "a").with_input("B", "b"))
            .with(Node::new("a", "detect_mouse1"))
            .with(Node::new("b", "detect_keyboard1").with_field("x", "KeyW"));
        assert_eq!(
            code(&ws),
            "while not (CoronaEngine.isMouseDown() and CoronaEngine.isKeyPressed(\"KeyW\")):\n    time.sleep(0.01)\n"
        );
        assert_eq!(requested(&ws), vec!["time"]);
    }

    #[test]
    fn repeat_until_does_not_wrap_comparison() {
        let ws = Workspace::new()
            .with(Node::new("u", "control_until").with_input("CONDITION", "c").with_statements("DO", "m"))
            .with(Node::new("c", "math_G").with_input("A", "x").with_input("B", "n"))
            .with(Node::new("x", "engine_X"))
            .with(number("n", "100"))
            .with(Node::new("m", "engine_Xadd").with_input("VALUE", "one"))
            .with(number("one", "1"));
        assert_eq!(
            code(&ws),
            "while not CoronaEngine.getX() > 100:\n    CoronaEngine.changeX(1)\n"
        );
    }

    #[test]
    fn stop_modes() {
        let stop = |mode: &str| {
            let ws = Workspace::new().with(Node::new("s", "control_stop").with_field("MODE", mode));
            code(&ws)
        };
        assert_eq!(stop("all"), "CoronaEngine.stopAll()\n");
        assert_eq!(stop("other"), "CoronaEngine.stopOtherScripts()\n");
        assert_eq!(stop("this"), "return\n");
    }

    #[test]
    fn clone_start_registers_callback() {
        let ws = Workspace::new()
            .with(Node::new("c", "control_cloneStart").with_statements("DO", "s"))
            .with(Node::new("s", "appearance_show"));
        assert_eq!(
            code(&ws),
            "def on_clone_start():\n    CoronaEngine.show()\nCoronaEngine.onCloneStart(on_clone_start)\n"
        );
    }

    #[test]
    fn clones_and_scenes() {
        let ws = Workspace::new()
            .with(Node::new("c", "control_clone").with_field("x", "myself").with_next("d"))
            .with(Node::new("d", "control_cloneDEL").with_next("s"))
            .with(Node::new("s", "control_senceSet").with_field("x", "level2").with_next("n"))
            .with(Node::new("n", "control_nextSence"));
        assert_eq!(
            code(&ws),
            "CoronaEngine.clone(\"myself\")\nCoronaEngine.deleteClone()\n\
             CoronaEngine.setScene(\"level2\")\nCoronaEngine.nextScene()\n"
        );
    }
}
