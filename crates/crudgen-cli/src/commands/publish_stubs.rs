// Copy built-in stubs into a project for customisation

use std::path::PathBuf;

use crudgen_generation::stub_loader;

use super::Command;
use crate::error::CliResult;
use crate::output::OutputStyle;

/// Write every built-in stub that is not already present in `dir`
pub struct PublishStubsCommand {
    pub dir: PathBuf,
}

impl PublishStubsCommand {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl Command for PublishStubsCommand {
    fn execute(&self) -> CliResult<()> {
        let style = OutputStyle::default();
        let written = stub_loader(None).publish(&self.dir)?;

        for path in &written {
            println!("{}", style.success(&format!("created {}", path.display())));
        }
        println!(
            "{}",
            style.info(&format!(
                "{} stubs published to {}; existing files were kept",
                written.len(),
                self.dir.display()
            ))
        );
        Ok(())
    }
}
