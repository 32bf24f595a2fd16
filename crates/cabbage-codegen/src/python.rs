//! Python target helpers: operator precedence and literal formatting.

/// Name of the engine object every generated module binds at load time.
pub const ENGINE: &str = "CoronaEngine";

/// Python operator precedence, tightest binding first.
///
/// A child expression is parenthesised when it binds no tighter than the
/// slot it is placed in; `None` slots (call arguments, conditions) never
/// add parentheses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    Atomic,
    Call,
    Unary,
    Multiplicative,
    Additive,
    Relational,
    LogicalNot,
    LogicalAnd,
    LogicalOr,
    None,
}

impl Precedence {
    /// Whether an expression of this precedence needs parentheses in `slot`.
    pub fn needs_parens_in(self, slot: Precedence) -> bool {
        slot != Precedence::None && self != Precedence::Atomic && self >= slot
    }

    pub fn wrap(self, text: &str, slot: Precedence) -> String {
        if self.needs_parens_in(slot) {
            format!("({text})")
        } else {
            text.to_string()
        }
    }
}

/// Double-quoted Python string literal.
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Text safe to place after `#`: line breaks become spaces.
pub fn comment_text(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}

/// Identifier fragment: anything outside `[A-Za-z0-9_]` becomes `_`.
pub fn identifier_part(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// `CoronaEngine.<method>(<args>)`.
pub fn engine_call<S: AsRef<str>>(method: &str, args: &[S]) -> String {
    let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
    format!("{ENGINE}.{method}({})", args.join(", "))
}
