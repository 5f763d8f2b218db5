#![warn(missing_docs)]

//! Stub rendering for crudgen
//!
//! Stubs are source-code skeletons with flat `{{ name }}` placeholders. The
//! renderer re-indents multi-line replacements to the placeholder's line and
//! collapses lines whose only content is a placeholder that resolved to
//! nothing, so generated files never carry stray blank lines.

pub mod error;
pub mod loader;
pub mod parser;
pub mod part;
pub mod renderer;

// Re-export public API
pub use error::{Result, StubError};
pub use loader::StubLoader;
pub use parser::StubParser;
pub use part::{PartKind, StubPart};
pub use renderer::{render, Stub, StubValue, StubValues};
