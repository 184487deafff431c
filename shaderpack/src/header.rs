//! Rendering of the generated C header text.

use std::borrow::Cow;
use std::fmt::Write as _;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::escape::{escape_comment, escape_line, EscapeMode};

pub const PREAMBLE: &str = "#pragma once\n/*\nAUTO GENERATED DO NOT EDIT\n*/\n\n";

/// Bytes per value line in the `Bytes` encoding.
const BYTES_PER_LINE: usize = 16;

/// Shape of the generated constant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// `static const char* x = "line\n" ...;`, one literal per source line.
    #[default]
    Lines,
    /// `static const char x[] = "\x23\x76...";`, exact bytes.
    Bytes,
}

impl Encoding {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Lines => "lines",
            Self::Bytes => "bytes",
        }
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lines" | "text" => Ok(Self::Lines),
            "bytes" | "hex" => Ok(Self::Bytes),
            _ => Err(format!("Unknown encoding: {s}. Options: lines, bytes")),
        }
    }
}

fn write_source_comment(out: &mut String, text: &str, mode: EscapeMode) {
    out.push_str("/*\n");
    out.push_str(&escape_comment(text, mode));
    out.push_str("\n*/\n");
}

/// `\r\n` and lone `\r` read as `\n`, like a text-mode read with universal newlines.
fn universal_newlines(source: &str) -> Cow<'_, str> {
    if source.contains('\r') {
        Cow::Owned(source.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(source)
    }
}

/// Line breaks recognised by the old packer's line splitting, besides `\n`.
fn is_compat_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

fn source_lines(source: &str, mode: EscapeMode) -> Vec<&str> {
    match mode {
        EscapeMode::Escaped => source.lines().collect(),
        EscapeMode::Compat => {
            let mut lines: Vec<&str> = source.split(is_compat_line_break).collect();
            // A trailing break does not start another line.
            if source.ends_with(is_compat_line_break) || source.is_empty() {
                lines.pop();
            }
            lines
        }
    }
}

/// Header embedding `source` line by line as a `const char*`.
///
/// In compat mode line endings are normalised first, so carriage returns never
/// end up inside a literal.
pub fn render_lines(identifier: &str, source: &str, mode: EscapeMode) -> String {
    let source = match mode {
        EscapeMode::Compat => universal_newlines(source),
        EscapeMode::Escaped => Cow::Borrowed(source),
    };
    let mut out = String::with_capacity(PREAMBLE.len() + source.len() * 2 + 64);
    out.push_str(PREAMBLE);
    write_source_comment(&mut out, &source, mode);

    let _ = writeln!(out, "static const char* {identifier} = ");
    for line in source_lines(&source, mode) {
        out.push_str("\t\"");
        out.push_str(&escape_line(line, mode));
        out.push_str("\\n\"\n");
    }
    if source.is_empty() && mode == EscapeMode::Escaped {
        out.push_str("\t\"\"\n");
    }
    out.push(';');
    out
}

/// Header embedding `source` as a `char[]` of hex byte escapes.
pub fn render_bytes(identifier: &str, source: &[u8], mode: EscapeMode) -> String {
    let mut out = String::with_capacity(PREAMBLE.len() + source.len() * 5 + 64);
    out.push_str(PREAMBLE);
    write_source_comment(&mut out, &String::from_utf8_lossy(source), mode);

    let _ = writeln!(out, "static const char {identifier}[] = ");
    if source.is_empty() {
        out.push_str("\t\"\"\n");
    }
    // Each chunk is its own literal so a hex escape never runs into the next byte.
    for chunk in source.chunks(BYTES_PER_LINE) {
        out.push_str("\t\"");
        for byte in chunk {
            let _ = write!(out, "\\x{byte:02x}");
        }
        out.push_str("\"\n");
    }
    out.push(';');
    out
}
