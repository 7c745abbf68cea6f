//! # mswmm-project
//!
//! Read Windows Movie Maker (`.MSWMM`) project files.
//!
//! A `.MSWMM` file is an OLE compound container holding an embedded UTF-16
//! XML script that describes the edit timeline: clips, still images, title
//! cards, audio, trims, effects and fades. This crate reconstructs a typed
//! [`Project`] model from that script and can synthesize an ffmpeg command
//! line that renders the video track.
//!
//! # Example
//!
//! ```no_run
//! use mswmm_project::Project;
//!
//! let project = Project::load("holiday.MSWMM")?;
//! for item in project.video_timeline() {
//!     println!("{}s..{}s", item.timeline_start(), item.timeline_end());
//! }
//! let subs = vec![("\\".to_string(), "/".to_string())];
//! let command = project.ffmpeg_command(&subs)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod container;
mod error;
mod item;
mod project;
mod render;
mod resolve;
mod timeline;

pub use error::{Error, RenderError, Result};
pub use item::{AudioItem, PixelSize, StillItem, TimelineItem, TitleItem, TrackKind, VideoItem};
pub use project::{AspectRatio, Project};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
