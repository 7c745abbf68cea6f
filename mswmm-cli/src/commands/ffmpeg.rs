//! ffmpeg command generation.

use clap::Args;
use mswmm_project::Project;
use std::path::PathBuf;

/// Generate an ffmpeg command that renders the video timeline.
#[derive(Args, Debug)]
pub struct CmdFfmpeg {
    /// Path to the .MSWMM project file.
    pub file: PathBuf,

    /// Path substitution applied to source paths, as FIND=REPLACE.
    /// May be repeated; rules apply in the order given.
    #[arg(
        short = 's',
        long = "sub",
        value_name = "FIND=REPLACE",
        value_parser = parse_substitution
    )]
    pub substitutions: Vec<(String, String)>,
}

fn parse_substitution(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((find, replace)) if !find.is_empty() => {
            Ok((find.to_string(), replace.to_string()))
        }
        _ => Err("expected FIND=REPLACE with a non-empty FIND".to_string()),
    }
}

impl CmdFfmpeg {
    pub fn run(&self) -> anyhow::Result<()> {
        let project = Project::load(&self.file)?;
        let command = project.ffmpeg_command(&self.substitutions)?;
        println!("{command}");
        Ok(())
    }
}
