//! Quoting of strings embedded in generated Lua source.

use std::fmt::Write;

/// Render `value` as a double-quoted Lua string literal.
///
/// Named escapes are used where Lua has them; other control bytes become
/// three-digit decimal escapes so the literal stays valid on Lua 5.1.
pub fn quote_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0B}' => out.push_str("\\v"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            c if c.is_ascii_control() => {
                // Writing to a String cannot fail.
                let _ = write!(out, "\\{:03}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn named_escapes() {
        assert_eq!(quote_literal("\t"), r#""\t""#);
        assert_eq!(quote_literal("a\nb"), r#""a\nb""#);
        assert_eq!(quote_literal("\"quoted\""), r#""\"quoted\"""#);
        assert_eq!(quote_literal("back\\slash"), r#""back\\slash""#);
    }

    #[test]
    fn other_controls_use_decimal_escapes() {
        assert_eq!(quote_literal("\u{01}"), r#""\001""#);
        assert_eq!(quote_literal("\u{1F}"), r#""\031""#);
        assert_eq!(quote_literal("\u{7F}"), r#""\127""#);
    }

    #[test]
    fn printable_text_is_verbatim() {
        assert_eq!(quote_literal("(empty)"), r#""(empty)""#);
        assert_eq!(quote_literal("-"), r#""-""#);
        assert_eq!(quote_literal(""), r#""""#);
        assert_eq!(quote_literal("id.orig_h"), r#""id.orig_h""#);
    }

    proptest! {
        #[test]
        fn output_never_contains_raw_controls(value in "\\PC*|[\\x00-\\x1f\\x7f]{0,8}") {
            let quoted = quote_literal(&value);
            prop_assert!(quoted.starts_with('"') && quoted.ends_with('"'));
            prop_assert!(!quoted.chars().any(|c| c.is_ascii_control()));
        }
    }
}
