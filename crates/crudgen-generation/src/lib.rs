#![warn(missing_docs)]

//! Laravel CRUD artifact generation for crudgen
//!
//! Turns schema tables into Eloquent models, resource controllers, form
//! requests, factories, seeders, Blade views and route lines by rendering
//! stubs, then writes them into a Laravel project and registers the seeders.

pub mod artifact;
pub mod error;
pub mod generation_manager;
pub mod generators;
pub mod output_writer;
pub mod seeder_injection;
pub mod stubs;

// Re-export public API
pub use artifact::{Artifact, ArtifactKind, WriteMode};
pub use error::{GenerationError, Result};
pub use generation_manager::{BatchOutcome, GenerationManager};
pub use generators::{
    generator_for, ControllerGenerator, FactoryGenerator, GenerationContext, GenerationOptions,
    Generator, ModelGenerator, RequestGenerator, RouteGenerator, SeederGenerator, ViewsGenerator,
};
pub use output_writer::{FileWriteResult, OutputWriter, OutputWriterConfig, WriteAction, WriteReport};
pub use seeder_injection::{inject_seeder_calls, DATABASE_SEEDER};
pub use stubs::{stub_loader, BUILTIN_STUBS};
