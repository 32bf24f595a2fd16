//! List visibility.

use cabbage_types::Node;

use super::{Category, Translated, TranslationRegistry, Translator};
use crate::error::CodegenResult;
use crate::hooks::ResourceKind;
use crate::python::{engine_call, string_literal};

pub(super) fn register(reg: &mut TranslationRegistry) {
    reg.register("list_show", Category::Statement, show);
    reg.register("list_hide", Category::Statement, hide);
}

/// List name, reported to the host.
fn list_name(node: &Node, t: &mut Translator<'_, '_>) -> String {
    let name = t.field(node, "x");
    t.create_resource(node, ResourceKind::List, &name);
    name
}

fn show(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    let name = list_name(node, t);
    Ok(Translated::statement(engine_call("showList", &[string_literal(&name)])))
}

fn hide(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    let name = list_name(node, t);
    Ok(Translated::statement(engine_call("hideList", &[string_literal(&name)])))
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use cabbage_types::{Node, Workspace};

    #[test]
    fn show_then_hide() {
        let ws = Workspace::new()
            .with(Node::new("s", "list_show").with_field("x", "items").with_next("h"))
            .with(Node::new("h", "list_hide").with_field("x", "items"));
        assert_eq!(
            code(&ws),
            "CoronaEngine.showList(\"items\")\nCoronaEngine.hideList(\"items\")\n"
        );
        assert!(requested(&ws).is_empty());
    }
}
