//! Parsed stub tokens

/// Kind of a parsed stub part
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartKind {
    /// Verbatim text
    Literal,
    /// Named placeholder
    Placeholder,
}

/// A single token produced by [`StubParser`](crate::StubParser)
///
/// For literals `payload` is the text and the remaining fields are empty.
/// For placeholders `payload` is the trimmed name, `indentation` is the
/// horizontal whitespace that starts the placeholder's source line, and the
/// two removal counts describe how much surrounding whitespace disappears
/// when the placeholder renders empty. Both counts are zero unless the
/// placeholder is alone on its line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubPart {
    /// Literal or placeholder
    pub kind: PartKind,
    /// Literal text or placeholder name
    pub payload: String,
    /// Prefix applied to continuation lines of a replacement
    pub indentation: String,
    /// Characters trimmed from the end of the preceding output
    pub remove_before: usize,
    /// Characters trimmed from the start of the following literal
    pub remove_after: usize,
}

impl StubPart {
    /// Create a literal part
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            kind: PartKind::Literal,
            payload: text.into(),
            indentation: String::new(),
            remove_before: 0,
            remove_after: 0,
        }
    }

    /// Create a placeholder part
    pub fn placeholder(
        name: impl Into<String>,
        indentation: impl Into<String>,
        remove_before: usize,
        remove_after: usize,
    ) -> Self {
        Self {
            kind: PartKind::Placeholder,
            payload: name.into(),
            indentation: indentation.into(),
            remove_before,
            remove_after,
        }
    }

    /// Whether this part is a placeholder
    pub fn is_placeholder(&self) -> bool {
        self.kind == PartKind::Placeholder
    }
}
