//! Generated artifacts

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// Kind of generated artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// Eloquent model
    Model,
    /// Resource controller
    Controller,
    /// Form request with validation rules
    Request,
    /// Model factory
    Factory,
    /// Table seeder
    Seeder,
    /// Blade views
    Views,
    /// Resource route line
    Route,
}

impl ArtifactKind {
    /// Every kind, in generation order
    pub const ALL: [ArtifactKind; 7] = [
        ArtifactKind::Model,
        ArtifactKind::Controller,
        ArtifactKind::Request,
        ArtifactKind::Factory,
        ArtifactKind::Seeder,
        ArtifactKind::Views,
        ArtifactKind::Route,
    ];

    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Model => "model",
            ArtifactKind::Controller => "controller",
            ArtifactKind::Request => "request",
            ArtifactKind::Factory => "factory",
            ArtifactKind::Seeder => "seeder",
            ArtifactKind::Views => "views",
            ArtifactKind::Route => "route",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactKind {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        ArtifactKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name || (name == "view" && *kind == ArtifactKind::Views))
            .ok_or_else(|| GenerationError::UnknownKind(s.to_string()))
    }
}

/// How an artifact lands on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Whole file, subject to the overwrite policy
    Create,
    /// Line appended to a shared file unless already present
    AppendLine,
}

/// A rendered file, relative to the project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Kind that produced it
    pub kind: ArtifactKind,
    /// Path relative to the project root
    pub path: PathBuf,
    /// Rendered content
    pub content: String,
    /// Write mode
    pub mode: WriteMode,
}

impl Artifact {
    /// Whole-file artifact
    pub fn file(kind: ArtifactKind, path: impl Into<PathBuf>, content: String) -> Self {
        Self {
            kind,
            path: path.into(),
            content,
            mode: WriteMode::Create,
        }
    }

    /// Line appended to a shared file
    pub fn line(kind: ArtifactKind, path: impl Into<PathBuf>, content: String) -> Self {
        Self {
            kind,
            path: path.into(),
            content,
            mode: WriteMode::AppendLine,
        }
    }
}
