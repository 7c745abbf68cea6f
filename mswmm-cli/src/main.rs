//! mswmm CLI - inspect Windows Movie Maker project files.

use clap::{Parser, Subcommand};
use console::style;

mod commands;

use commands::{CmdFfmpeg, CmdInfo, CmdXml};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "mswmm")]
#[command(version)]
#[command(about = "Read Windows Movie Maker (.MSWMM) project files")]
struct Args {
    /// Verbose diagnostics.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the embedded project XML.
    Xml(CmdXml),
    /// Show project metadata, source files and timelines.
    Info(CmdInfo),
    /// Generate an ffmpeg command that renders the video timeline.
    Ffmpeg(CmdFfmpeg),
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // clap renders usage/help itself; keep failure exits at 1.
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .with_target(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let result = match &args.command {
        Command::Xml(cmd) => cmd.run(),
        Command::Info(cmd) => cmd.run(),
        Command::Ffmpeg(cmd) => cmd.run(),
    };

    if let Err(e) = result {
        eprintln!("{} {e:#}", style("Error:").red().bold());
        std::process::exit(1);
    }
}
