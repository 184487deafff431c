//! Escaping of shader text for embedding in C string literals and comments.

use std::borrow::Cow;
use std::fmt::Write as _;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How shader text is escaped before it is quoted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscapeMode {
    /// Full C string literal escaping.
    #[default]
    Escaped,
    /// Raw lines, byte compatible with the old Python packer. Quotes and
    /// backslashes in the shader break the generated header.
    Compat,
}

impl EscapeMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Escaped => "escaped",
            Self::Compat => "compat",
        }
    }
}

impl FromStr for EscapeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "escaped" | "escape" => Ok(Self::Escaped),
            "compat" | "raw" => Ok(Self::Compat),
            _ => Err(format!("Unknown escape mode: {s}. Options: escaped, compat")),
        }
    }
}

/// Escape one line (without its terminator) for use inside `"..."`.
pub fn escape_line(line: &str, mode: EscapeMode) -> Cow<'_, str> {
    match mode {
        EscapeMode::Compat => Cow::Borrowed(line),
        EscapeMode::Escaped => escape_c_string(line),
    }
}

fn escape_c_string(line: &str) -> Cow<'_, str> {
    let needs_escape = line
        .chars()
        .any(|c| matches!(c, '\\' | '"' | '?') || c.is_ascii_control());
    if !needs_escape {
        return Cow::Borrowed(line);
    }

    let mut out = String::with_capacity(line.len() + 8);
    let mut prev = '\0';
    for c in line.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            // `??x` is a trigraph in older C dialects.
            '?' if prev == '?' => out.push_str("\\?"),
            c if c.is_ascii_control() => {
                // Octal escapes stop after three digits, unlike `\x`.
                let _ = write!(out, "\\{:03o}", c as u32);
            }
            c => out.push(c),
        }
        prev = c;
    }
    Cow::Owned(out)
}

/// Make shader text safe to place between `/*` and `*/`.
pub fn escape_comment(text: &str, mode: EscapeMode) -> Cow<'_, str> {
    match mode {
        EscapeMode::Escaped if text.contains("*/") => Cow::Owned(text.replace("*/", "* /")),
        _ => Cow::Borrowed(text),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Inverse of `escape_c_string`, enough to check what a C compiler would see.
    pub(crate) fn unescape(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars().peekable();
        while let Some(c) = chars.next() {
            if c != '\\' {
                out.push(c);
                continue;
            }
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some(d @ '0'..='7') => {
                    let mut value = d.to_digit(8).unwrap();
                    for _ in 0..2 {
                        match chars.peek().and_then(|c| c.to_digit(8)) {
                            Some(v) => {
                                value = value * 8 + v;
                                chars.next();
                            }
                            None => break,
                        }
                    }
                    out.push(char::from_u32(value).unwrap());
                }
                Some(other) => out.push(other),
                None => out.push('\\'),
            }
        }
        out
    }

    #[test]
    fn test_plain_line_is_borrowed() {
        let line = "gl_Position = vec4(aPos, 0.0, 1.0);";
        assert!(matches!(escape_line(line, EscapeMode::Escaped), Cow::Borrowed(_)));
    }

    #[test]
    fn test_quotes_and_backslashes_escaped() {
        let line = r#"#include "common.glsl" // C:\path"#;
        let escaped = escape_line(line, EscapeMode::Escaped);
        assert_eq!(escaped, r#"#include \"common.glsl\" // C:\\path"#);
        assert_eq!(unescape(&escaped), line);
    }

    #[test]
    fn test_control_chars_use_octal() {
        let escaped = escape_line("a\u{1}7\tb", EscapeMode::Escaped);
        assert_eq!(escaped, "a\\0017\\tb");
        assert_eq!(unescape(&escaped), "a\u{1}7\tb");
    }

    #[test]
    fn test_trigraph_guard() {
        let escaped = escape_line("x ??= y", EscapeMode::Escaped);
        assert_eq!(escaped, "x ?\\?= y");
        assert_eq!(unescape(&escaped), "x ??= y");
    }

    #[test]
    fn test_compat_is_raw() {
        let line = r#"say "hi" \ bye"#;
        assert_eq!(escape_line(line, EscapeMode::Compat), line);
    }

    #[test]
    fn test_comment_terminator_broken_only_when_escaped() {
        let text = "/* nested */ void main() {}";
        assert_eq!(
            escape_comment(text, EscapeMode::Escaped),
            "/* nested * / void main() {}"
        );
        assert_eq!(escape_comment(text, EscapeMode::Compat), text);
    }

    #[test]
    fn test_escape_mode_from_str() {
        assert_eq!("compat".parse::<EscapeMode>().unwrap(), EscapeMode::Compat);
        assert_eq!("Escaped".parse::<EscapeMode>().unwrap(), EscapeMode::Escaped);
        assert!("quoted".parse::<EscapeMode>().is_err());
    }
}
