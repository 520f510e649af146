//! Shared quoting and escaping rules for ARFF text.
//!
//! The same escape alphabet is applied in both directions: the tokenizer in
//! `arff-read` decodes these sequences inside quoted tokens, and
//! [`quote`] re-applies them when a value is rendered back to text.

/// The universal escape character, written as `\u001E` in ARFF text.
pub const UNIT_SEPARATOR: char = '\u{001E}';

/// The literal that denotes a missing value when unquoted.
pub const MISSING_LITERAL: &str = "?";

/// Whether `text` must be quoted to survive a round trip through the tokenizer.
///
/// Quote characters, `%`, backslash, control characters, space, comma, and
/// braces would all terminate or alter an unquoted token. The empty string and
/// the bare `?` literal also need quotes: unquoted they read back as nothing
/// and as a missing value respectively.
pub fn needs_quoting(text: &str) -> bool {
    if text.is_empty() || text == MISSING_LITERAL {
        return true;
    }
    text.chars().any(|ch| {
        matches!(ch, '\'' | '"' | '%' | '\\' | ' ' | ',' | '{' | '}') || ch.is_control()
    })
}

/// Escape the characters of `text` using the shared escape alphabet.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\'' => out.push_str("\\'"),
            '%' => out.push_str("\\%"),
            '\\' => out.push_str("\\\\"),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            UNIT_SEPARATOR => out.push_str("\\u001E"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render `text` as a single ARFF token, quoting only when required.
pub fn quote(text: &str) -> String {
    if needs_quoting(text) {
        format!("'{}'", escape(text))
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_quoting() {
        assert!(!needs_quoting("plain"));
        assert!(!needs_quoting("a-b_c.d"));
        assert!(needs_quoting("two words"));
        assert!(needs_quoting("a,b"));
        assert!(needs_quoting("50%"));
        assert!(needs_quoting("{x}"));
        assert!(needs_quoting("tab\there"));
        assert!(needs_quoting(""));
        assert!(needs_quoting("?"));
    }

    #[test]
    fn test_escape_alphabet() {
        assert_eq!(escape("a'b"), "a\\'b");
        assert_eq!(escape("a\"b"), "a\\\"b");
        assert_eq!(escape("100%"), "100\\%");
        assert_eq!(escape("a\\b"), "a\\\\b");
        assert_eq!(escape("line\nbreak"), "line\\nbreak");
        assert_eq!(escape("\u{001E}"), "\\u001E");
    }

    #[test]
    fn test_quote_wraps_only_when_needed() {
        assert_eq!(quote("plain"), "plain");
        assert_eq!(quote("two words"), "'two words'");
        assert_eq!(quote("it's"), "'it\\'s'");
        assert_eq!(quote("?"), "'?'");
    }
}
