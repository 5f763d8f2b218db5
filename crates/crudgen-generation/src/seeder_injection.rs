//! Registers generated seeders in the orchestration seeder
//!
//! Adds `$this->call(<Seeder>::class);` lines at the end of `run()` in
//! `database/seeders/DatabaseSeeder.php`, in the order given, skipping
//! seeders already called. This is a read-modify-write of a shared file and
//! assumes a single writer.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{GenerationError, Result};

/// Default location of the orchestration seeder
pub const DATABASE_SEEDER: &str = "database/seeders/DatabaseSeeder.php";

const INDENT: &str = "    ";

/// Add calls for `seeders` (class names) to the seeder at `path`
///
/// Creates the file when missing. Returns the seeders that were added; in
/// dry-run mode nothing is written but the return value is the same.
pub fn inject_seeder_calls(path: &Path, seeders: &[String], dry_run: bool) -> Result<Vec<String>> {
    let existing = if path.exists() {
        fs::read_to_string(path)?
    } else {
        debug!("Creating {}", path.display());
        default_seeder()
    };

    let (updated, added) = insert_calls(&existing, seeders).map_err(|message| {
        GenerationError::Injection {
            path: path.display().to_string(),
            message,
        }
    })?;

    if !added.is_empty() && !dry_run {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, updated)?;
        info!("Registered {} seeders in {}", added.len(), path.display());
    }

    Ok(added)
}

fn default_seeder() -> String {
    [
        "<?php",
        "",
        "namespace Database\\Seeders;",
        "",
        "use Illuminate\\Database\\Seeder;",
        "",
        "class DatabaseSeeder extends Seeder",
        "{",
        "    public function run(): void",
        "    {",
        "    }",
        "}",
        "",
    ]
    .join("\n")
}

/// Insert missing calls before the closing brace of `run()`
fn insert_calls(source: &str, seeders: &[String]) -> std::result::Result<(String, Vec<String>), String> {
    let mut added: Vec<String> = Vec::new();
    for seeder in seeders {
        let reference = format!("{}::class", seeder);
        if !source.contains(&reference) && !added.contains(seeder) {
            added.push(seeder.clone());
        }
    }
    if added.is_empty() {
        return Ok((source.to_string(), added));
    }

    let run = source
        .find("function run")
        .ok_or_else(|| "no run() method".to_string())?;
    let open = source[run..]
        .find('{')
        .map(|offset| run + offset)
        .ok_or_else(|| "run() has no body".to_string())?;
    let close = matching_brace(source, open).ok_or_else(|| "unbalanced braces in run()".to_string())?;

    let line_start = source[..close].rfind('\n').map_or(0, |i| i + 1);
    let closing_indent: String = source[line_start..close]
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect();
    let brace_alone = source[line_start..close].trim().is_empty();

    let mut calls = String::new();
    for seeder in &added {
        calls.push_str(&format!(
            "{}{}$this->call({}::class);\n",
            closing_indent, INDENT, seeder
        ));
    }

    let mut updated = String::with_capacity(source.len() + calls.len());
    if brace_alone {
        updated.push_str(&source[..line_start]);
        updated.push_str(&calls);
        updated.push_str(&source[line_start..]);
    } else {
        updated.push_str(source[..close].trim_end());
        updated.push('\n');
        updated.push_str(&calls);
        updated.push_str(&closing_indent);
        updated.push_str(&source[close..]);
    }

    Ok((updated, added))
}

/// Offset of the brace closing the one at `open`
///
/// Braces inside quoted strings and `//`, `#` or `/* */` comments are not
/// counted. Heredocs are not recognised.
fn matching_brace(source: &str, open: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            quote @ (b'\'' | b'"') => {
                i += 1;
                while i < bytes.len() && bytes[i] != quote {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = source[i + 2..].find("*/").map_or(bytes.len(), |end| i + 2 + end + 1);
            }
            b'#' if bytes.get(i + 1) != Some(&b'[') => i = line_end(source, i),
            b'/' if bytes.get(i + 1) == Some(&b'/') => i = line_end(source, i),
            _ => {}
        }
        i += 1;
    }
    None
}

/// Offset of the newline ending the line that holds `from`
fn line_end(source: &str, from: usize) -> usize {
    source[from..].find('\n').map_or(source.len(), |end| from + end)
}
