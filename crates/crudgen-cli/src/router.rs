// Command routing and dispatch

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use crudgen_config::{ConfigLoader, ConfigManager, CrudgenConfig};
use tracing::debug;

use crate::commands::*;
use crate::error::CliResult;

/// crudgen - Laravel CRUD scaffolding from a database schema
#[derive(Parser, Debug)]
#[command(name = "crudgen")]
#[command(bin_name = "crudgen")]
#[command(about = "Generate Laravel CRUD scaffolding from a database schema")]
#[command(
    long_about = "crudgen reads a schema snapshot and generates Eloquent models, resource controllers,\nform requests, factories, seeders, Blade views and resource routes for each table.\n\nQuick Start:\n  • crudgen inspect --schema schema.yaml\n  • crudgen generate posts users --schema schema.yaml\n  • crudgen generate --all --dry-run"
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (default: ./crudgen.toml, then the user config directory)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate CRUD artifacts for tables
    #[command(about = "Generate CRUD artifacts for one or more tables")]
    Generate {
        /// Tables to generate
        #[arg(value_name = "TABLE")]
        tables: Vec<String>,

        /// Generate every table in the schema
        #[arg(long, conflicts_with = "tables")]
        all: bool,

        /// Schema snapshot file (JSON or YAML)
        #[arg(long, value_name = "FILE")]
        schema: Option<PathBuf>,

        /// Laravel project root
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Directory whose stubs replace the built-in ones
        #[arg(long, value_name = "DIR")]
        stubs: Option<PathBuf>,

        /// Overwrite existing files
        #[arg(long)]
        force: bool,

        /// Report what would be written without touching the project
        #[arg(long)]
        dry_run: bool,

        /// Only generate these artifact kinds (model, controller, request, factory, seeder, views, route)
        #[arg(long, value_delimiter = ',', value_name = "KINDS")]
        only: Vec<String>,
    },

    /// Show what is inferred for a table
    #[command(about = "Show columns, relationships, rules and fakes inferred for a table")]
    Inspect {
        /// Table to inspect; lists all tables when omitted
        #[arg(value_name = "TABLE")]
        table: Option<String>,

        /// Schema snapshot file (JSON or YAML)
        #[arg(long, value_name = "FILE")]
        schema: Option<PathBuf>,
    },

    /// Render an arbitrary stub
    #[command(about = "Render a stub file with placeholder values")]
    Render {
        /// Stub file
        #[arg(value_name = "STUB")]
        stub: PathBuf,

        /// Placeholder value; repeat a name to give a multi-line value
        #[arg(long = "set", value_name = "NAME=VALUE")]
        values: Vec<String>,
    },

    /// Copy the built-in stubs for customisation
    #[command(about = "Copy the built-in stubs into a directory for customisation")]
    PublishStubs {
        /// Target directory (default: configured stubs_dir, else ./stubs)
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,
    },
}

/// Command router
pub struct CommandRouter;

impl CommandRouter {
    /// Parse CLI arguments and route to appropriate handler
    pub fn route() -> CliResult<()> {
        let cli = Cli::parse();

        // Initialize logging based on CLI flags
        crate::logging::init_logging(cli.verbose, cli.quiet);

        Self::execute(&cli)
    }

    /// Load configuration for this invocation
    pub fn load_config(cli: &Cli) -> CliResult<CrudgenConfig> {
        let manager = match &cli.config {
            Some(path) => ConfigManager::with_path(path.clone()),
            None => ConfigManager::new(),
        };
        debug!("Configuration file: {}", manager.config_path().display());
        Ok(manager.load_config()?)
    }

    /// Execute a command
    pub fn execute(cli: &Cli) -> CliResult<()> {
        let config = Self::load_config(cli)?;

        match &cli.command {
            Commands::Generate {
                tables,
                all,
                schema,
                output,
                stubs,
                force,
                dry_run,
                only,
            } => {
                let mut config = config;
                if let Some(schema) = schema {
                    config.schema = Some(schema.clone());
                }
                if let Some(output) = output {
                    config.output_dir = output.clone();
                }
                if let Some(stubs) = stubs {
                    config.stubs_dir = Some(stubs.clone());
                }
                config.force |= *force;

                let cmd = GenerateCommand::new(config, tables.clone())
                    .with_all(*all)
                    .with_dry_run(*dry_run)
                    .with_kinds(only)?;
                cmd.execute()
            }
            Commands::Inspect { table, schema } => {
                let schema = schema.clone().or(config.schema);
                let cmd = InspectCommand::new(schema, table.clone());
                cmd.execute()
            }
            Commands::Render { stub, values } => {
                let cmd = RenderCommand::new(stub.clone(), values.clone());
                cmd.execute()
            }
            Commands::PublishStubs { dir } => {
                let dir = dir
                    .clone()
                    .or(config.stubs_dir)
                    .unwrap_or_else(|| PathBuf::from("stubs"));
                let cmd = PublishStubsCommand::new(dir);
                cmd.execute()
            }
        }
    }
}
