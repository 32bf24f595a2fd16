//! Looks: costumes, animations, size and visibility.

use cabbage_types::Node;

use super::{Category, Translated, TranslationRegistry, Translator};
use crate::error::CodegenResult;
use crate::python::{engine_call, string_literal, Precedence};

pub(super) fn register(reg: &mut TranslationRegistry) {
    reg.register("appearance_cartoonSet", Category::Statement, set_costume);
    reg.register("appearance_nextCartoon", Category::Statement, next_costume);
    reg.register("appearance_playCartoon", Category::Statement, play_animation);
    reg.register("appearance_stopCartoon", Category::Statement, stop_animation);
    reg.register("appearance_resetCartoon", Category::Statement, reset_animation);
    reg.register("appearance_sizeAdd", Category::Statement, change_size);
    reg.register("appearance_sizeSet", Category::Statement, set_size);
    reg.register("appearance_show", Category::Statement, show);
    reg.register("appearance_hide", Category::Statement, hide);
    reg.register("appearance_cartoon", Category::Expression, costume);
    reg.register("appearance_size", Category::Expression, size);
}

fn plain(method: &str) -> CodegenResult<Translated> {
    Ok(Translated::statement(engine_call::<&str>(method, &[])))
}

fn named(method: &str, node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    let name = t.field(node, "x");
    Ok(Translated::statement(engine_call(method, &[string_literal(&name)])))
}

fn set_costume(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    named("setCostume", node, t)
}

fn next_costume(_: &Node, _: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    plain("nextCostume")
}

fn play_animation(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    named("playAnimation", node, t)
}

fn stop_animation(_: &Node, _: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    plain("stopAnimation")
}

fn reset_animation(_: &Node, _: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    plain("resetAnimation")
}

fn change_size(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    let delta = t.value(node, "VALUE", Precedence::None, "0")?;
    Ok(Translated::statement(engine_call("changeSize", &[delta])))
}

fn set_size(node: &Node, t: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    let percent = t.value(node, "VALUE", Precedence::None, "100")?;
    Ok(Translated::statement(engine_call("setSize", &[percent])))
}

fn show(_: &Node, _: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    plain("show")
}

fn hide(_: &Node, _: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    plain("hide")
}

fn costume(_: &Node, _: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    Ok(Translated::expression(
        engine_call::<&str>("costume", &[]),
        Precedence::Call,
    ))
}

fn size(_: &Node, _: &mut Translator<'_, '_>) -> CodegenResult<Translated> {
    Ok(Translated::expression(
        engine_call::<&str>("size", &[]),
        Precedence::Call,
    ))
}
