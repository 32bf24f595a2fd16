//! Block translation: the registry of per-type rules and the [`Translator`]
//! that walks chains and inputs on their behalf.
//!
//! Every rule is a plain function registered under a type tag together with
//! its [`Category`]. Rules read fields, pull translated children through the
//! translator and may request prelude fragments or call host hooks; they
//! never touch anything else.

mod appearance;
mod control;
mod detect;
mod engine;
mod event;
mod list;
mod math;
mod variable;

use std::collections::HashMap;

use cabbage_types::{Diagnostic, ErrorCode, Node, NodeId};
use tracing::warn;

use crate::context::CompilationContext;
use crate::error::{CodegenError, CodegenResult};
use crate::graph::WorkspaceGraph;
use crate::hooks::{HostHooks, ResourceKind};
use crate::python::Precedence;
use crate::text::{ensure_trailing_newline, indent_block};

/// Deepest allowed nesting of statement bodies and value inputs.
pub const MAX_NESTING_DEPTH: usize = 128;

/// How a block's output is routed, fixed per type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Event trigger whose chain runs inside `handle(key)`.
    Reactive,
    /// Ordinary statement; roots run inside `run()`.
    Statement,
    /// Pure value.
    Expression,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedStatement {
    /// One or more complete lines.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedExpression {
    pub text: String,
    pub precedence: Precedence,
}

/// What a rule returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translated {
    Statement(TranslatedStatement),
    Expression(TranslatedExpression),
}

impl Translated {
    /// A statement; a trailing line break is added when missing.
    pub fn statement(text: impl Into<String>) -> Self {
        let mut text = text.into();
        ensure_trailing_newline(&mut text);
        Self::Statement(TranslatedStatement { text })
    }

    pub fn expression(text: impl Into<String>, precedence: Precedence) -> Self {
        Self::Expression(TranslatedExpression {
            text: text.into(),
            precedence,
        })
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Statement(s) => &s.text,
            Self::Expression(e) => &e.text,
        }
    }
}

pub type TranslateFn = fn(&Node, &mut Translator<'_, '_>) -> CodegenResult<Translated>;

/// A registered translation rule.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub category: Category,
    pub translate: TranslateFn,
}

/// Type tag → translation rule.
#[derive(Debug, Clone, Default)]
pub struct TranslationRegistry {
    rules: HashMap<String, Rule>,
}

impl TranslationRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every built-in block category.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        event::register(&mut registry);
        engine::register(&mut registry);
        appearance::register(&mut registry);
        control::register(&mut registry);
        detect::register(&mut registry);
        math::register(&mut registry);
        variable::register(&mut registry);
        list::register(&mut registry);
        registry
    }

    /// Register (or replace) the rule for `tag`, returning the old one.
    pub fn register(
        &mut self,
        tag: impl Into<String>,
        category: Category,
        translate: TranslateFn,
    ) -> Option<Rule> {
        self.rules.insert(
            tag.into(),
            Rule {
                category,
                translate,
            },
        )
    }

    pub fn get(&self, tag: &str) -> Option<&Rule> {
        self.rules.get(tag)
    }

    pub fn category(&self, tag: &str) -> Option<Category> {
        self.get(tag).map(|rule| rule.category)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.rules.contains_key(tag)
    }

    /// Registered tags, sorted.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Walks the validated graph for one pass and hands rules their children.
pub struct Translator<'a, 'w> {
    registry: &'a TranslationRegistry,
    graph: &'a WorkspaceGraph<'w>,
    ctx: CompilationContext,
    hooks: Option<&'a mut dyn HostHooks>,
    indent: &'a str,
    depth: usize,
}

impl<'a, 'w> Translator<'a, 'w> {
    pub fn new(
        registry: &'a TranslationRegistry,
        graph: &'a WorkspaceGraph<'w>,
        indent: &'a str,
        hooks: Option<&'a mut dyn HostHooks>,
    ) -> Self {
        Self {
            registry,
            graph,
            ctx: CompilationContext::new(),
            hooks,
            indent,
            depth: 0,
        }
    }

    pub fn context(&self) -> &CompilationContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut CompilationContext {
        &mut self.ctx
    }

    /// Hand the pass state back once every root is translated.
    pub fn finish(self) -> CompilationContext {
        self.ctx
    }

    /// One indentation level.
    pub fn indent(&self) -> &str {
        self.indent
    }

    // ── Walking ─────────────────────────────────────────────────────────

    /// Translate a single block with its registered rule.
    pub fn translate_node(&mut self, node: &Node) -> CodegenResult<Translated> {
        let rule = *self
            .registry
            .get(&node.kind)
            .ok_or_else(|| CodegenError::UnknownNodeType {
                node_id: node.id.clone(),
                kind: node.kind.clone(),
            })?;
        (rule.translate)(node, self)
    }

    /// Translate a chain starting at `head`, following `next` links.
    ///
    /// Disabled blocks are skipped together with everything nested in them;
    /// the chain continues after them. Each block's text is terminated by a
    /// line break.
    ///
    /// Event blocks may only head a root stack; anywhere in a chain they fail
    /// with [`CodegenError::ReactiveNotAtRoot`].
    pub fn translate_chain(&mut self, head: &NodeId) -> CodegenResult<String> {
        self.walk_chain(head, false)
    }

    /// Translate a whole root chain.
    pub fn translate_root(&mut self, root: &Node) -> CodegenResult<String> {
        self.depth = 0;
        self.walk_chain(&root.id, true)
    }

    fn walk_chain(&mut self, head: &NodeId, reactive_head: bool) -> CodegenResult<String> {
        let mut out = String::new();
        let mut cursor = self.graph.node(head);
        let mut first = true;
        while let Some(node) = cursor {
            let at_head = std::mem::replace(&mut first, false);
            if node.enabled {
                if !(reactive_head && at_head)
                    && self.registry.category(&node.kind) == Some(Category::Reactive)
                {
                    return Err(CodegenError::ReactiveNotAtRoot {
                        node_id: node.id.clone(),
                        kind: node.kind.clone(),
                    });
                }
                let translated = self.translate_node(node)?;
                let text = translated.text();
                if !text.is_empty() {
                    out.push_str(text);
                    ensure_trailing_newline(&mut out);
                }
            }
            cursor = node.next.as_ref().and_then(|id| self.graph.node(id));
        }
        Ok(out)
    }

    fn descend<T>(
        &mut self,
        parent: &Node,
        f: impl FnOnce(&mut Self) -> CodegenResult<T>,
    ) -> CodegenResult<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(CodegenError::NestingTooDeep {
                node_id: parent.id.clone(),
                limit: MAX_NESTING_DEPTH,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    // ── Helpers for rules ───────────────────────────────────────────────

    /// Field value; a missing field reads as the empty string and raises a
    /// warning.
    pub fn field(&mut self, node: &Node, name: &str) -> String {
        match node.fields.get(name) {
            Some(value) => value.clone(),
            None => {
                self.ctx.report(
                    Diagnostic::warning(
                        ErrorCode::MISSING_FIELD,
                        format!("field '{name}' of '{}' is not set", node.kind),
                    )
                    .at(node.id.clone()),
                );
                String::new()
            }
        }
    }

    /// Translated value input, parenthesised for `slot`.
    ///
    /// Absent, disabled or empty inputs yield `default`.
    pub fn value(
        &mut self,
        node: &Node,
        input: &str,
        slot: Precedence,
        default: &str,
    ) -> CodegenResult<String> {
        let child = node
            .inputs
            .get(input)
            .and_then(|id| self.graph.node(id))
            .filter(|child| child.enabled);
        let Some(child) = child else {
            return Ok(default.to_string());
        };
        match self.descend(node, |t| t.translate_node(child))? {
            Translated::Expression(expr) if expr.text.trim().is_empty() => Ok(default.to_string()),
            Translated::Expression(expr) => Ok(expr.precedence.wrap(&expr.text, slot)),
            Translated::Statement(_) => Err(CodegenError::NotAnExpression {
                node_id: child.id.clone(),
                kind: child.kind.clone(),
            }),
        }
    }

    /// Body for a nested statement input, indented one level and ending
    /// with a line break. An empty or absent body becomes `pass`.
    pub fn statements(&mut self, node: &Node, input: &str) -> CodegenResult<String> {
        let body = match node.statements.get(input) {
            Some(head) => self.descend(node, |t| t.translate_chain(head))?,
            None => String::new(),
        };
        let indented = indent_block(&body, self.indent);
        if indented.is_empty() {
            Ok(format!("{}pass\n", self.indent))
        } else {
            Ok(indented + "\n")
        }
    }

    /// Declare a dependency on a prelude fragment.
    pub fn request(&mut self, fragment: &str) {
        self.ctx.request(fragment);
    }

    /// Ask the host to create a named resource. Missing hooks are a no-op;
    /// a failing hook becomes a warning on `node`.
    pub fn create_resource(&mut self, node: &Node, kind: ResourceKind, name: &str) {
        if name.is_empty() {
            return;
        }
        let Some(hooks) = self.hooks.as_deref_mut() else {
            return;
        };
        if let Err(err) = hooks.create_resource(kind, name) {
            warn!(node = %node.id, %kind, name, error = %err, "host hook failed");
            self.ctx.report(
                Diagnostic::warning(ErrorCode::HOOK_FAILED, err.to_string()).at(node.id.clone()),
            );
        }
    }
}
