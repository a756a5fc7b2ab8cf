//! Light, syck-compatible YAML for a single string scalar.
//!
//! The output is always a `--- ` document holding one scalar, in the first
//! style that fits:
//!
//! 1. a literal block (`|`, `|-` or `|+`) when the text spans several lines,
//! 2. a plain scalar when the text reads back as the very same string,
//! 3. a single-quoted scalar,
//! 4. a double-quoted scalar with escapes for non-printable characters.
//!
//! Lines are never folded, so no `\` continuation appears, and non-ASCII
//! characters are always written literally.

use core::fmt::Write;
use std::sync::OnceLock;

use regex::Regex;
use serde_yaml::Value;

use super::{TextEncoder, needs_escape};
use crate::errors::Error;

/// Words a YAML 1.1 reader would resolve to a boolean.
const YAML11_BOOLEANS: [&str; 8] = ["y", "yes", "n", "no", "on", "off", "true", "false"];

/// Integers, floats and timestamps as a YAML 1.1 reader resolves them,
/// including `_` digit separators, `0b` binary and leading-zero octal.
fn yaml11_scalar_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(?:[-+]?(?:0b[01_]+|0x[0-9a-fA-F_]+|[0-9][0-9_]*(?:\.[0-9_]*)?(?:[eE][-+]?[0-9]+)?)|[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}(?:[Tt ].*)?)$",
        )
        .unwrap()
    })
}

/// Punctuation allowed after the first character of a plain scalar.
const PLAIN_PUNCTUATION: &str = " .,-_/()+=~$^;'!?";

/// Encoder producing the lightest markup that reads back unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompactEncoder;

impl TextEncoder for CompactEncoder {
    fn encode_text(&self, text: &str) -> Result<String, Error> {
        let mut out = String::with_capacity(text.len() + 8);
        out.push_str("---");
        if is_literal_block(text) {
            write_literal_block(&mut out, text);
        } else if is_plain(text) {
            out.push(' ');
            out.push_str(text);
            out.push('\n');
        } else if is_single_quotable(text) {
            write_single_quoted(&mut out, text);
        } else {
            write_double_quoted(&mut out, text);
        }
        Ok(out)
    }
}

fn is_literal_block(text: &str) -> bool {
    let content = text.trim_end_matches('\n');
    if !text.contains('\n') || content.is_empty() || content.starts_with([' ', '\n']) {
        return false;
    }
    if text.chars().any(|c| c != '\n' && (c == '\t' || needs_escape(c))) {
        return false;
    }
    content
        .split('\n')
        .all(|line| line.is_empty() || !line.trim_start_matches(' ').is_empty())
}

fn write_literal_block(out: &mut String, text: &str) {
    let content = text.trim_end_matches('\n');
    let trailing = text.len() - content.len();
    out.push_str(match trailing {
        0 => " |-\n",
        1 => " |\n",
        _ => " |+\n",
    });
    for line in content.split('\n') {
        if !line.is_empty() {
            out.push_str("  ");
            out.push_str(line);
        }
        out.push('\n');
    }
    for _ in 1..trailing {
        out.push('\n');
    }
}

fn is_plain(text: &str) -> bool {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_alphanumeric() || text.ends_with(' ') {
        return false;
    }
    if !chars.all(|c| c.is_alphanumeric() || PLAIN_PUNCTUATION.contains(c)) {
        return false;
    }
    if YAML11_BOOLEANS
        .iter()
        .any(|word| word.eq_ignore_ascii_case(text))
    {
        return false;
    }
    if yaml11_scalar_regex().is_match(text) {
        return false;
    }
    resolves_to_itself(text)
}

/// Whether `text` written as a plain scalar is read back as the same string,
/// rather than as a number, boolean or null.
fn resolves_to_itself(text: &str) -> bool {
    matches!(
        serde_yaml::from_str::<Value>(&format!("--- {text}")),
        Ok(Value::String(parsed)) if parsed == text
    )
}

fn is_single_quotable(text: &str) -> bool {
    !text.chars().any(|c| c == '\t' || needs_escape(c))
}

fn write_single_quoted(out: &mut String, text: &str) {
    out.push_str(" '");
    out.push_str(&text.replace('\'', "''"));
    out.push_str("'\n");
}

fn write_double_quoted(out: &mut String, text: &str) {
    out.push_str(" \"");
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\0' => out.push_str("\\0"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c if needs_escape(c) => {
                let code = u32::from(c);
                // Writing into a String cannot fail.
                let _ = if code <= 0xFFFF {
                    write!(out, "\\u{code:04X}")
                } else {
                    write!(out, "\\U{code:08X}")
                };
            }
            c => out.push(c),
        }
    }
    out.push_str("\"\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(text: &str) -> String {
        CompactEncoder.encode_text(text).unwrap()
    }

    fn decode(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_plain_scalar() {
        assert_eq!(encode("hello"), "--- hello\n");
        assert_eq!(encode("Café au lait"), "--- Café au lait\n");
        assert_eq!(encode("日本語"), "--- 日本語\n");
    }

    #[test]
    fn test_ambiguous_words_are_quoted() {
        assert_eq!(encode("true"), "--- 'true'\n");
        assert_eq!(encode("Yes"), "--- 'Yes'\n");
        assert_eq!(encode("null"), "--- 'null'\n");
        assert_eq!(encode("42"), "--- '42'\n");
        assert_eq!(encode("1.5"), "--- '1.5'\n");
    }

    #[test]
    fn test_yaml11_numbers_and_dates_are_quoted() {
        assert_eq!(encode("2001-12-14"), "--- '2001-12-14'\n");
        assert_eq!(encode("2001-12-14 note"), "--- '2001-12-14 note'\n");
        assert_eq!(encode("1_000"), "--- '1_000'\n");
        assert_eq!(encode("017"), "--- '017'\n");
        assert_eq!(encode("0b1010"), "--- '0b1010'\n");
        assert_eq!(encode("1_000.5"), "--- '1_000.5'\n");
    }

    #[test]
    fn test_words_with_digits_stay_plain() {
        assert_eq!(encode("1st place"), "--- 1st place\n");
        assert_eq!(encode("version 2"), "--- version 2\n");
        assert_eq!(encode("snake_case"), "--- snake_case\n");
        assert_eq!(encode("2001-12-14x"), "--- 2001-12-14x\n");
    }

    #[test]
    fn test_indicators_are_quoted() {
        assert_eq!(encode(""), "--- ''\n");
        assert_eq!(encode("- item"), "--- '- item'\n");
        assert_eq!(encode("key: value"), "--- 'key: value'\n");
        assert_eq!(encode("it's #1"), "--- 'it''s #1'\n");
        assert_eq!(encode(" padded "), "--- ' padded '\n");
    }

    #[test]
    fn test_literal_block_chomping() {
        assert_eq!(encode("one\ntwo"), "--- |-\n  one\n  two\n");
        assert_eq!(encode("one\ntwo\n"), "--- |\n  one\n  two\n");
        assert_eq!(encode("one\ntwo\n\n"), "--- |+\n  one\n  two\n\n");
    }

    #[test]
    fn test_literal_block_keeps_blank_and_indented_lines() {
        assert_eq!(
            encode("title\n\n  indented\nlast"),
            "--- |-\n  title\n\n    indented\n  last\n"
        );
    }

    #[test]
    fn test_unsuitable_multiline_text_is_double_quoted() {
        assert_eq!(encode(" lead\nline"), "--- \" lead\\nline\"\n");
        assert_eq!(encode("a\n   \nb"), "--- \"a\\n   \\nb\"\n");
        assert_eq!(encode("\n"), "--- \"\\n\"\n");
        assert_eq!(encode("a\r\nb"), "--- \"a\\r\\nb\"\n");
    }

    #[test]
    fn test_control_characters_are_escaped() {
        assert_eq!(encode("tab\there"), "--- \"tab\\there\"\n");
        assert_eq!(encode("nul\0"), "--- \"nul\\0\"\n");
        assert_eq!(encode("bell\u{7}"), "--- \"bell\\u0007\"\n");
        assert_eq!(encode("q\"\\\t"), "--- \"q\\\"\\\\\\t\"\n");
    }

    #[test]
    fn test_no_hex_escapes_for_non_ascii() {
        let yaml = encode("é\tü");
        assert_eq!(yaml, "--- \"é\\tü\"\n");
        assert!(!yaml.contains("\\x"));
    }

    #[test]
    fn test_no_line_continuations() {
        let long = "word ".repeat(40);
        let text = format!("{long}\n{long}end");
        let yaml = encode(&text);
        assert!(!yaml.contains("\\\n"));
        assert_eq!(decode(&yaml), Value::String(text));
    }

    #[test]
    fn test_every_style_reads_back() {
        for text in [
            "hello",
            "true",
            "",
            "- item",
            "it's",
            "one\ntwo\n\n",
            "title\n\n  indented\nlast",
            " lead\nline",
            "tab\there",
            "bell\u{7}\u{85}\u{2028}\u{FEFF}",
            "back\\slash",
            "Grüße\nnaïve\ncafé",
        ] {
            assert_eq!(
                decode(&encode(text)),
                Value::String(text.to_string()),
                "Failed for {text:?}"
            );
        }
    }
}
