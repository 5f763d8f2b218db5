//! Stub loading
//!
//! Stubs are looked up by name (e.g. `model` or `views/index`). A file named
//! `<name>.stub` under the override directory wins over the built-in copy,
//! which lets a project customise generated code without forking.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, StubError};
use crate::renderer::Stub;

/// File extension of stub files
pub const STUB_EXTENSION: &str = "stub";

/// Loads stubs from an override directory or the built-in set
#[derive(Debug, Clone)]
pub struct StubLoader {
    builtins: BTreeMap<&'static str, &'static str>,
    override_dir: Option<PathBuf>,
}

impl StubLoader {
    /// Create a loader over the given `(name, content)` built-ins
    pub fn new(builtins: &[(&'static str, &'static str)]) -> Self {
        Self {
            builtins: builtins.iter().copied().collect(),
            override_dir: None,
        }
    }

    /// Look in `dir` before falling back to the built-ins
    pub fn with_override_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.override_dir = Some(dir.into());
        self
    }

    /// Path an override for `name` would live at
    pub fn override_path(&self, name: &str) -> Option<PathBuf> {
        self.override_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.{}", name, STUB_EXTENSION)))
    }

    /// Raw stub content
    pub fn source(&self, name: &str) -> Result<Cow<'static, str>> {
        if let Some(path) = self.override_path(name) {
            if path.is_file() {
                debug!("Using stub override {}", path.display());
                return Ok(Cow::Owned(fs::read_to_string(&path)?));
            }
        }

        self.builtins
            .get(name)
            .map(|content| Cow::Borrowed(*content))
            .ok_or_else(|| StubError::StubNotFound(name.to_string()))
    }

    /// Load and parse a stub
    pub fn load(&self, name: &str) -> Result<Stub> {
        Stub::parse(&self.source(name)?)
    }

    /// Names of all built-in stubs
    pub fn names(&self) -> Vec<&'static str> {
        self.builtins.keys().copied().collect()
    }

    /// Copy the built-in stubs into `dir` so they can be customised
    ///
    /// Existing files are left alone. Returns the paths that were written.
    pub fn publish(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        for (name, content) in &self.builtins {
            let path = dir.join(format!("{}.{}", name, STUB_EXTENSION));
            if path.exists() {
                debug!("Keeping existing stub {}", path.display());
                continue;
            }
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, content)?;
            written.push(path);
        }

        Ok(written)
    }
}
