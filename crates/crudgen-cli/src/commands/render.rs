// Render an arbitrary stub from the command line

use std::fs;
use std::path::PathBuf;

use crudgen_stub::{Stub, StubValue, StubValues};

use super::Command;
use crate::error::{CliError, CliResult};

/// Render a stub file with `name=value` pairs and print the result
pub struct RenderCommand {
    pub stub: PathBuf,
    pub values: Vec<String>,
}

impl RenderCommand {
    pub fn new(stub: PathBuf, values: Vec<String>) -> Self {
        Self { stub, values }
    }

    /// Rendered stub text
    pub fn render(&self) -> CliResult<String> {
        let template = fs::read_to_string(&self.stub)?;
        let stub = Stub::parse(&template)?;
        Ok(stub.render(&parse_values(&self.values)?))
    }
}

impl Command for RenderCommand {
    fn execute(&self) -> CliResult<()> {
        print!("{}", self.render()?);
        Ok(())
    }
}

/// Build placeholder values from `name=value` pairs
///
/// A name given more than once becomes a multi-line value, one line per
/// occurrence, in order.
pub fn parse_values(pairs: &[String]) -> CliResult<StubValues> {
    let mut lines: Vec<(String, Vec<String>)> = Vec::new();
    for pair in pairs {
        let (name, value) = pair.split_once('=').ok_or_else(|| CliError::InvalidArgument {
            message: format!("expected NAME=VALUE, got '{}'", pair),
        })?;
        let name = name.trim();
        if name.is_empty() {
            return Err(CliError::InvalidArgument {
                message: format!("missing placeholder name in '{}'", pair),
            });
        }
        match lines.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, values)) => values.push(value.to_string()),
            None => lines.push((name.to_string(), vec![value.to_string()])),
        }
    }

    let mut values = StubValues::new();
    for (name, mut entries) in lines {
        let value = if entries.len() == 1 {
            StubValue::Text(entries.remove(0))
        } else {
            StubValue::Lines(entries)
        };
        values.set(name, value);
    }
    Ok(values)
}
