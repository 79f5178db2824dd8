// crates/scadflat/src/classify/mod.rs

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;


lazy_static! {
    static ref MODULE_RE: Regex =
        Regex::new(r"^\s*module\s+(\w+)").expect("Invalid module pattern");
    static ref ASSIGN_RE: Regex = Regex::new(r"^\s*\w+\s*=").expect("Invalid assignment pattern");
}

/// One classified region of a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    /// A `name = value;` line, kept verbatim.
    Assignment(String),
    /// A brace-balanced `module` block: name plus the full body text.
    Module { name: String, body: String },
    /// Any other non-blank line (invocations, comments).
    Statement(String),
}

/// Split `text` into classified spans, in source order.
///
/// Blank lines produce no span. A `module` header opens a block that
/// consumes lines until its braces balance; a block that never balances
/// yields nothing and scanning resumes on the line after the header.
pub fn classify(text: &str) -> Vec<Span> {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut spans = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        if line.trim().is_empty() {
            i += 1;
            continue;
        }

        if let Some(caps) = MODULE_RE.captures(line) {
            if let Some((body, next)) = balanced_block(&lines, i) {
                trace!("module {} covers lines {}..{}", &caps[1], i + 1, next);
                spans.push(Span::Module {
                    name: caps[1].to_string(),
                    body,
                });
                i = next;
            } else {
                trace!("module {} never balances, header dropped", &caps[1]);
                i += 1;
            }
            continue;
        }

        if ASSIGN_RE.is_match(line) && line.contains(';') {
            spans.push(Span::Assignment(line.to_string()));
        } else {
            spans.push(Span::Statement(line.to_string()));
        }
        i += 1;
    }

    spans
}

/// Consume lines from `start` while the running brace balance stays
/// positive. Returns the joined block and the index just past it, or
/// `None` when the balance ends anywhere but exactly zero.
fn balanced_block(lines: &[&str], start: usize) -> Option<(String, usize)> {
    let mut depth = brace_delta(lines[start]);
    let mut end = start + 1;
    while end < lines.len() && depth > 0 {
        depth += brace_delta(lines[end]);
        end += 1;
    }
    if depth == 0 {
        Some((lines[start..end].join("\n"), end))
    } else {
        None
    }
}

/// Net `{`/`}` balance of a single line. Braces inside double-quoted
/// strings (backslash escapes honored) or after `//` do not count; an
/// unterminated quote silences the rest of the line.
pub fn brace_delta(line: &str) -> i32 {
    let bytes = line.as_bytes();
    let mut delta = 0;
    let mut in_string = false;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if in_string {
            match b {
                b'\\' => i += 1,
                b'"' => in_string = false,
                _ => {}
            }
        } else {
            match b {
                b'"' => in_string = true,
                b'/' if bytes.get(i + 1) == Some(&b'/') => break,
                b'{' => delta += 1,
                b'}' => delta -= 1,
                _ => {}
            }
        }
        i += 1;
    }
    delta
}
