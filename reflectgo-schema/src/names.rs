//! Go lexical helpers.
//!
//! Identifier checks, package identifiers derived from import paths, and
//! interpreted string literal quoting.

/// Go reserved keywords.
const KEYWORDS: [&str; 25] = [
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Returns true if `s` is a Go keyword.
#[must_use]
pub fn is_keyword(s: &str) -> bool {
    KEYWORDS.contains(&s)
}

/// Returns true if `s` is a valid Go identifier that is not a keyword.
#[must_use]
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !is_letter(first) {
        return false;
    }
    chars.all(|c| is_letter(c) || c.is_ascii_digit()) && !is_keyword(s)
}

/// Letters exclude the letter-like numerals (`Ⅻ`) that `char::is_alphabetic`
/// accepts. Digits are limited to `0-9`.
fn is_letter(c: char) -> bool {
    c == '_' || (c.is_alphabetic() && !c.is_numeric())
}

/// Returns the default package identifier for an import path: its last
/// `/`-separated segment.
#[must_use]
pub fn package_ident(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return path;
    }
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Quotes `s` as a Go interpreted string literal.
#[must_use]
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\u{0b}' => out.push_str("\\v"),
            c if c.is_control() => {
                let code = c as u32;
                if code < 0x80 {
                    out.push_str(&format!("\\x{:02x}", code));
                } else if code < 0x10000 {
                    out.push_str(&format!("\\u{:04x}", code));
                } else {
                    out.push_str(&format!("\\U{:08x}", code));
                }
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Unquotes a Go interpreted string literal produced by [`quote`] or written
/// by hand.
///
/// Returns `None` if `s` is not a complete double-quoted literal or contains
/// an unknown escape.
#[must_use]
pub fn unquote(s: &str) -> Option<String> {
    let inner = s.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' | '\n' => return None,
            '\\' => {
                let escaped = match chars.next()? {
                    '"' => '"',
                    '\\' => '\\',
                    '\'' => '\'',
                    'n' => '\n',
                    'r' => '\r',
                    't' => '\t',
                    'a' => '\u{07}',
                    'b' => '\u{08}',
                    'f' => '\u{0c}',
                    'v' => '\u{0b}',
                    'x' => hex_escape(&mut chars, 2)?,
                    'u' => hex_escape(&mut chars, 4)?,
                    'U' => hex_escape(&mut chars, 8)?,
                    _ => return None,
                };
                out.push(escaped);
            }
            c => out.push(c),
        }
    }

    Some(out)
}

fn hex_escape(chars: &mut std::str::Chars<'_>, digits: usize) -> Option<char> {
    let mut code = 0u32;
    for _ in 0..digits {
        code = code * 16 + chars.next()?.to_digit(16)?;
    }
    char::from_u32(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("Foo"));
        assert!(is_identifier("_"));
        assert!(is_identifier("x1"));
        assert!(is_identifier("héllo"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("1x"));
        assert!(!is_identifier("a-b"));
        assert!(!is_identifier("type"));
    }

    #[test]
    fn test_is_identifier_rejects_non_decimal_numerals() {
        assert!(!is_identifier("x²"));
        assert!(!is_identifier("Ⅻ"));
        assert!(!is_identifier("aⅫ"));
        assert!(!is_identifier("½"));
        assert!(is_identifier("x2"));
    }

    #[test]
    fn test_is_keyword() {
        assert!(is_keyword("chan"));
        assert!(is_keyword("struct"));
        assert!(!is_keyword("int"));
    }

    #[test]
    fn test_package_ident() {
        assert_eq!(package_ident("path/to/pkg"), "pkg");
        assert_eq!(package_ident("pkg"), "pkg");
        assert_eq!(package_ident("github.com/AdamSLevy/reflect2go/"), "reflect2go");
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("fmt"), "\"fmt\"");
        assert_eq!(quote("a\"b"), "\"a\\\"b\"");
        assert_eq!(quote("line\nbreak"), "\"line\\nbreak\"");
        assert_eq!(quote("\u{01}"), "\"\\x01\"");
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"a\"").as_deref(), Some("a"));
        assert_eq!(unquote("\"a\\\"b\\n\"").as_deref(), Some("a\"b\n"));
        assert_eq!(unquote("\"\\x41\\u00e9\"").as_deref(), Some("Aé"));
        assert_eq!(unquote("a"), None);
        assert_eq!(unquote("\"a"), None);
        assert_eq!(unquote("\"\\q\""), None);
    }

    #[test]
    fn test_quote_unquote_escapes() {
        let original = "tab\there \\ \"quoted\"";
        assert_eq!(unquote(&quote(original)).as_deref(), Some(original));
    }
}
