//! Line-level text helpers shared by translators and the assembler.

/// Strip blank lines at both ends of `text` and trailing whitespace on the
/// last line. Indentation of the first content line is kept.
pub fn trim_blank_edges(text: &str) -> &str {
    let body = text.trim_end();
    let first_content = body.len() - body.trim_start().len();
    let line_start = body[..first_content]
        .rfind('\n')
        .map_or(0, |newline| newline + 1);
    &body[line_start..]
}

/// Indent every non-blank line of `text` by `unit`.
///
/// Blank (or whitespace-only) lines are emitted empty so the output never
/// carries trailing whitespace. The result has no trailing line break and is
/// empty when `text` has no content.
pub fn indent_block(text: &str, unit: &str) -> String {
    trim_blank_edges(text)
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{unit}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Append a line break unless `text` is empty or already ends with one.
pub fn ensure_trailing_newline(text: &mut String) {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_keeps_first_line_indentation() {
        assert_eq!(trim_blank_edges("\n\n  a\n    b\n\n  \n"), "  a\n    b");
        assert_eq!(trim_blank_edges("   \n\t\n"), "");
        assert_eq!(trim_blank_edges(""), "");
    }

    #[test]
    fn indent_skips_blank_lines() {
        let out = indent_block("a = 1\n\nif a:\n    pass\n", "    ");
        assert_eq!(out, "    a = 1\n\n    if a:\n        pass");
    }

    #[test]
    fn indent_blanks_whitespace_only_lines() {
        let out = indent_block("x()\n   \ny()", "  ");
        assert_eq!(out, "  x()\n\n  y()");
    }

    #[test]
    fn indent_empty_is_empty() {
        assert_eq!(indent_block("\n\n", "    "), "");
    }

    #[test]
    fn indent_handles_crlf() {
        assert_eq!(indent_block("a\r\nb\r\n", "  "), "  a\n  b");
    }

    #[test]
    fn ensure_newline() {
        let mut s = String::from("x");
        ensure_trailing_newline(&mut s);
        ensure_trailing_newline(&mut s);
        assert_eq!(s, "x\n");

        let mut empty = String::new();
        ensure_trailing_newline(&mut empty);
        assert!(empty.is_empty());
    }
}
