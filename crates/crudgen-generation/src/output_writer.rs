//! Output writer for generated artifacts
//!
//! Writes artifacts under the project root, creating parent directories.
//! Existing files are skipped unless forced; append-line artifacts are added
//! to shared files only when missing. Dry-run mode reports what would happen
//! without touching the disk.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::artifact::{Artifact, WriteMode};
use crate::error::{GenerationError, Result};

/// Configuration for output writing
#[derive(Debug, Clone)]
pub struct OutputWriterConfig {
    /// Whether to run in dry-run mode (report only)
    pub dry_run: bool,
    /// Whether to overwrite existing files
    pub force: bool,
    /// Whether to strip trailing whitespace from every line before writing
    pub format_code: bool,
}

impl Default for OutputWriterConfig {
    fn default() -> Self {
        Self {
            dry_run: false,
            force: false,
            format_code: true,
        }
    }
}

/// What happened to one artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteAction {
    /// New file
    Created,
    /// Existing file replaced
    Overwritten,
    /// Existing file left alone
    Skipped,
    /// Line appended to a shared file
    Appended,
    /// Line already present
    Unchanged,
}

impl WriteAction {
    /// Whether the disk changed (or would have, in dry-run mode)
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            WriteAction::Created | WriteAction::Overwritten | WriteAction::Appended
        )
    }
}

impl fmt::Display for WriteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self {
            WriteAction::Created => "created",
            WriteAction::Overwritten => "overwritten",
            WriteAction::Skipped => "skipped (exists)",
            WriteAction::Appended => "appended",
            WriteAction::Unchanged => "unchanged",
        };
        f.write_str(action)
    }
}

/// Result of writing a single artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileWriteResult {
    /// Absolute or root-joined path
    pub path: PathBuf,
    /// Action taken
    pub action: WriteAction,
}

/// Result of writing a batch of artifacts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    /// Results for each artifact
    pub files: Vec<FileWriteResult>,
    /// Whether this was a dry-run
    pub dry_run: bool,
}

impl WriteReport {
    /// Artifacts that changed the disk
    pub fn files_written(&self) -> usize {
        self.files.iter().filter(|f| f.action.is_write()).count()
    }

    /// Artifacts left alone
    pub fn files_skipped(&self) -> usize {
        self.files.len() - self.files_written()
    }

    /// Merge another report into this one
    pub fn extend(&mut self, other: WriteReport) {
        self.files.extend(other.files);
    }

    /// One-line summary
    pub fn summary(&self) -> String {
        format!(
            "Files written: {}, Files skipped: {}{}",
            self.files_written(),
            self.files_skipped(),
            if self.dry_run { " (dry-run)" } else { "" }
        )
    }
}

/// Writes generated artifacts to disk
#[derive(Debug, Clone, Default)]
pub struct OutputWriter {
    config: OutputWriterConfig,
}

impl OutputWriter {
    /// Create a new output writer with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new output writer with custom configuration
    pub fn with_config(config: OutputWriterConfig) -> Self {
        Self { config }
    }

    /// Current configuration
    pub fn config(&self) -> &OutputWriterConfig {
        &self.config
    }

    /// Write artifacts under `root`
    pub fn write(&self, artifacts: &[Artifact], root: &Path) -> Result<WriteReport> {
        let mut report = WriteReport {
            files: Vec::with_capacity(artifacts.len()),
            dry_run: self.config.dry_run,
        };

        for artifact in artifacts {
            let path = root.join(&artifact.path);
            let action = match artifact.mode {
                WriteMode::Create => self.write_file(&path, &artifact.content)?,
                WriteMode::AppendLine => self.append_line(&path, &artifact.content)?,
            };
            debug!("{} {}", path.display(), action);
            report.files.push(FileWriteResult { path, action });
        }

        Ok(report)
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<WriteAction> {
        let action = if !path.exists() {
            WriteAction::Created
        } else if self.config.force {
            WriteAction::Overwritten
        } else {
            warn!("Not overwriting existing {}", path.display());
            return Ok(WriteAction::Skipped);
        };

        if !self.config.dry_run {
            self.create_parent(path)?;
            fs::write(path, self.format_code(content)).map_err(|e| {
                GenerationError::WriteFailed(format!("Failed to write {}: {}", path.display(), e))
            })?;
        }

        Ok(action)
    }

    fn append_line(&self, path: &Path, line: &str) -> Result<WriteAction> {
        let existing = if path.exists() {
            fs::read_to_string(path)?
        } else {
            String::new()
        };

        if existing.lines().any(|l| l.trim() == line.trim()) {
            return Ok(WriteAction::Unchanged);
        }

        if !self.config.dry_run {
            let mut content = existing;
            if content.is_empty() && path.extension().is_some_and(|ext| ext == "php") {
                content.push_str("<?php\n\n");
            }
            if !content.is_empty() && !content.ends_with('\n') {
                content.push('\n');
            }
            content.push_str(line);
            content.push('\n');

            self.create_parent(path)?;
            fs::write(path, content).map_err(|e| {
                GenerationError::WriteFailed(format!("Failed to write {}: {}", path.display(), e))
            })?;
        }

        Ok(WriteAction::Appended)
    }

    fn create_parent(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    GenerationError::WriteFailed(format!(
                        "Failed to create directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }
        Ok(())
    }

    /// Strip trailing whitespace left by indented blank lines
    fn format_code(&self, content: &str) -> String {
        if !self.config.format_code {
            return content.to_string();
        }
        let mut formatted: String = content
            .lines()
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("\n");
        if content.ends_with('\n') {
            formatted.push('\n');
        }
        formatted
    }
}
