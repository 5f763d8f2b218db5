//! Stub syntax parser
//!
//! Splits a stub into literal runs and `{{ name }}` placeholders. A run of
//! three or more opening braces is an escape: one brace is consumed and the
//! rest are emitted verbatim, so `{{{ $user->name }}` renders as
//! `{{ $user->name }}`.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Result, StubError};
use crate::part::StubPart;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

lazy_static! {
    static ref PLACEHOLDER_BODY: Regex =
        Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*$").expect("placeholder pattern is valid");
}

/// Stub parser
pub struct StubParser;

impl StubParser {
    /// Parse stub content into an ordered list of parts
    ///
    /// # Errors
    /// Returns a [`StubError`] naming the line and column of the first
    /// malformed, multi-line or unterminated placeholder.
    pub fn parse(template: &str) -> Result<Vec<StubPart>> {
        let bytes = template.as_bytes();
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut cursor = 0;

        while let Some(offset) = template[cursor..].find(OPEN) {
            let start = cursor + offset;
            literal.push_str(&template[cursor..start]);

            let run = bytes[start..].iter().take_while(|&&b| b == b'{').count();
            if run > OPEN.len() {
                literal.push_str(&template[start + 1..start + run]);
                cursor = start + run;
                continue;
            }

            let (line, column) = position(template, start);
            let body_start = start + OPEN.len();
            let body_len = template[body_start..]
                .find(CLOSE)
                .ok_or(StubError::Unterminated { line, column })?;
            let body = &template[body_start..body_start + body_len];

            if body.contains('\n') {
                return Err(StubError::EmbeddedNewline { line, column });
            }

            let name = PLACEHOLDER_BODY
                .captures(body)
                .and_then(|captures| captures.get(1))
                .ok_or_else(|| StubError::MalformedPlaceholder {
                    content: body.to_string(),
                    line,
                    column,
                })?
                .as_str();

            let end = body_start + body_len + CLOSE.len();
            let (remove_before, remove_after) = elision_span(bytes, start, end);

            if !literal.is_empty() {
                parts.push(StubPart::literal(std::mem::take(&mut literal)));
            }
            parts.push(StubPart::placeholder(
                name,
                indentation(template, start),
                remove_before,
                remove_after,
            ));

            cursor = end;
        }

        literal.push_str(&template[cursor..]);
        if !literal.is_empty() {
            parts.push(StubPart::literal(literal));
        }

        Ok(parts)
    }
}

fn is_blank(byte: u8) -> bool {
    byte == b' ' || byte == b'\t'
}

/// Whitespace removable around a placeholder that sits alone on its line.
///
/// The trailing count includes the line break so the whole line collapses.
fn elision_span(bytes: &[u8], start: usize, end: usize) -> (usize, usize) {
    let mut before = start;
    while before > 0 && is_blank(bytes[before - 1]) {
        before -= 1;
    }
    let starts_line = before == 0 || bytes[before - 1] == b'\n';

    let mut after = end;
    while after < bytes.len() && is_blank(bytes[after]) {
        after += 1;
    }
    let ends_line = match bytes.get(after) {
        None => true,
        Some(b'\n') => {
            after += 1;
            true
        }
        Some(b'\r') if bytes.get(after + 1) == Some(&b'\n') => {
            after += 2;
            true
        }
        Some(_) => false,
    };

    if starts_line && ends_line {
        (start - before, after - end)
    } else {
        (0, 0)
    }
}

/// Leading horizontal whitespace of the line holding `offset`
fn indentation(template: &str, offset: usize) -> String {
    let line_start = template[..offset].rfind('\n').map_or(0, |i| i + 1);
    template[line_start..offset]
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect()
}

/// 1-based line and column of a byte offset
fn position(template: &str, offset: usize) -> (usize, usize) {
    let prefix = &template[..offset];
    let line = prefix.matches('\n').count() + 1;
    let line_start = prefix.rfind('\n').map_or(0, |i| i + 1);
    let column = prefix[line_start..].chars().count() + 1;
    (line, column)
}
