//! Placeholder substitution
//!
//! Renders parsed stubs against a set of values. Multi-line values are
//! re-indented to the placeholder's line and placeholders that sit alone on
//! their line take the whole line with them when they resolve to nothing.

use std::collections::HashMap;

use tracing::debug;

use crate::error::Result;
use crate::parser::StubParser;
use crate::part::{PartKind, StubPart};

/// Replacement for a single placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StubValue {
    /// Text, split into lines on `\n`
    Text(String),
    /// One entry per output line
    Lines(Vec<String>),
}

impl StubValue {
    /// Lines making up this value
    pub fn lines(&self) -> Vec<&str> {
        match self {
            StubValue::Text(text) => text.split('\n').collect(),
            StubValue::Lines(lines) => lines.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for StubValue {
    fn from(value: &str) -> Self {
        StubValue::Text(value.to_string())
    }
}

impl From<String> for StubValue {
    fn from(value: String) -> Self {
        StubValue::Text(value)
    }
}

impl From<Vec<String>> for StubValue {
    fn from(value: Vec<String>) -> Self {
        StubValue::Lines(value)
    }
}

impl From<Vec<&str>> for StubValue {
    fn from(value: Vec<&str>) -> Self {
        StubValue::Lines(value.into_iter().map(str::to_string).collect())
    }
}

/// Placeholder name to value mapping
///
/// Names without a value render as the empty string.
#[derive(Debug, Clone, Default)]
pub struct StubValues {
    values: HashMap<String, StubValue>,
}

impl StubValues {
    /// Create an empty value set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, replacing any previous one
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<StubValue>) -> &mut Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Builder-style [`set`](Self::set)
    pub fn with(mut self, name: impl Into<String>, value: impl Into<StubValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Look up a value
    pub fn get(&self, name: &str) -> Option<&StubValue> {
        self.values.get(name)
    }

    /// Whether a value is present
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Names with a value, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.values.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Merge another value set into this one, overriding on conflict
    pub fn extend(&mut self, other: StubValues) {
        self.values.extend(other.values);
    }
}

/// A parsed stub ready for rendering
#[derive(Debug, Clone)]
pub struct Stub {
    parts: Vec<StubPart>,
}

impl Stub {
    /// Parse stub content
    pub fn parse(template: &str) -> Result<Self> {
        let parts = StubParser::parse(template)?;
        debug!("Parsed stub into {} parts", parts.len());
        Ok(Self { parts })
    }

    /// Parsed parts in source order
    pub fn parts(&self) -> &[StubPart] {
        &self.parts
    }

    /// Placeholder names in order of first appearance
    pub fn placeholder_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for part in self.parts.iter().filter(|p| p.is_placeholder()) {
            if !names.contains(&part.payload.as_str()) {
                names.push(&part.payload);
            }
        }
        names
    }

    /// Render the stub with the given values
    pub fn render(&self, values: &StubValues) -> String {
        let mut emitted: Vec<String> = Vec::with_capacity(self.parts.len());
        let mut pending_strip = 0;

        for part in &self.parts {
            match part.kind {
                PartKind::Literal => {
                    let skip = floor_boundary(&part.payload, pending_strip);
                    emitted.push(part.payload[skip..].to_string());
                    pending_strip = 0;
                }
                PartKind::Placeholder => {
                    let text = substitute(part, values.get(&part.payload));
                    if text.is_empty() {
                        if let Some(previous) = emitted.last_mut() {
                            if part.remove_before > 0 {
                                let keep = previous.len().saturating_sub(part.remove_before);
                                let keep = floor_boundary(previous, keep);
                                previous.truncate(keep);
                            }
                        }
                        pending_strip = part.remove_after;
                    } else {
                        emitted.push(text);
                    }
                }
            }
        }

        emitted.concat()
    }
}

/// Parse and render in one step
pub fn render(template: &str, values: &StubValues) -> Result<String> {
    Ok(Stub::parse(template)?.render(values))
}

fn substitute(part: &StubPart, value: Option<&StubValue>) -> String {
    let Some(value) = value else {
        return String::new();
    };

    value
        .lines()
        .into_iter()
        .enumerate()
        .map(|(index, line)| {
            let line = line.trim_end_matches('\r');
            if index == 0 {
                line.to_string()
            } else {
                format!("{}{}", part.indentation, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn floor_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}
