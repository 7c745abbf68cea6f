//! Project XML dump command.

use clap::Args;
use mswmm_project::Project;
use std::path::PathBuf;

/// Print the embedded project XML.
#[derive(Args, Debug)]
pub struct CmdXml {
    /// Path to the .MSWMM project file.
    pub file: PathBuf,
}

impl CmdXml {
    pub fn run(&self) -> anyhow::Result<()> {
        let project = Project::load(&self.file)?;
        println!("{}", project.xml());
        Ok(())
    }
}
