//! Project inspection command.

use clap::Args;
use console::style;
use mswmm_project::{Project, TimelineItem, TrackKind};
use serde::Serialize;
use std::path::PathBuf;

/// Show project metadata, source files and timelines.
#[derive(Args, Debug)]
pub struct CmdInfo {
    /// Path to the .MSWMM project file.
    pub file: PathBuf,

    /// Output in JSON format.
    #[arg(long)]
    pub json: bool,
}

/// Project information for JSON output.
#[derive(Debug, Serialize)]
struct ProjectInfo<'a> {
    file: String,
    author: &'a str,
    title: &'a str,
    description: &'a str,
    copyright: &'a str,
    rating: &'a str,
    aspect_ratio: String,
    has_title_sequences: bool,
    source_files: &'a [String],
    video_timeline: &'a [TimelineItem],
    audio_timeline: &'a [TimelineItem],
}

impl CmdInfo {
    pub fn run(&self) -> anyhow::Result<()> {
        let project = Project::load(&self.file)?;

        if self.json {
            let info = ProjectInfo {
                file: self.file.display().to_string(),
                author: project.author(),
                title: project.title(),
                description: project.description(),
                copyright: project.copyright(),
                rating: project.rating(),
                aspect_ratio: project.aspect_ratio().to_string(),
                has_title_sequences: project.has_title_sequences(),
                source_files: project.source_files(),
                video_timeline: project.video_timeline(),
                audio_timeline: project.audio_timeline(),
            };
            println!("{}", serde_json::to_string_pretty(&info)?);
            return Ok(());
        }

        println!("{}", style("Metadata:").cyan().bold());
        println!("  Aspect ratio: {}", project.aspect_ratio());
        println!("  Author:       {}", project.author());
        println!("  Title:        {}", project.title());
        println!("  Description:  {}", project.description());
        println!("  Copyright:    {}", project.copyright());
        println!("  Rating:       {}", project.rating());
        println!();

        println!("{}", style("Files used in project:").cyan().bold());
        for file in project.source_files() {
            println!("  {file}");
        }
        println!();

        println!("{}", style("Video timeline:").cyan().bold());
        print_timeline(project.timeline(TrackKind::Video));
        println!();

        println!("{}", style("Audio timeline:").cyan().bold());
        print_timeline(project.timeline(TrackKind::Audio));

        Ok(())
    }
}

fn print_timeline(items: &[TimelineItem]) {
    if items.is_empty() {
        println!("  (empty)");
        return;
    }
    for item in items {
        let span = format!(
            "{:.2}s - {:.2}s",
            item.timeline_start(),
            item.timeline_end()
        );
        match item {
            TimelineItem::Title(_) => {
                println!("  {} {span}", style("title").yellow());
            }
            TimelineItem::Still(still) => {
                println!(
                    "  {} {span}  '{}' ({}, {} px, size {})",
                    style("still").yellow(),
                    still.name,
                    still.src_path,
                    still.src_size_px,
                    still.file_size
                );
            }
            TimelineItem::Video(video) => {
                println!(
                    "  {} {span}  '{}' ({}, {} px, size {}), trim {:.2}s - {:.2}s",
                    style("video").yellow(),
                    video.name,
                    video.src_path,
                    video.src_size_px,
                    video.file_size,
                    video.source_start,
                    video.source_end
                );
            }
            TimelineItem::Audio(audio) => {
                let mut flags = Vec::new();
                if audio.is_muted {
                    flags.push("muted");
                }
                if audio.fades_in {
                    flags.push("fades in");
                }
                if audio.fades_out {
                    flags.push("fades out");
                }
                let flags = if flags.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", flags.join(", "))
                };
                println!(
                    "  {} {span}  '{}' ({}), trim {:.2}s - {:.2}s, volume {:.2}{flags}",
                    style("audio").yellow(),
                    audio.name,
                    audio.src_path,
                    audio.source_start,
                    audio.source_end,
                    audio.volume
                );
            }
        }
        for effect in item.effects() {
            println!("         effect: {effect}");
        }
    }
}
