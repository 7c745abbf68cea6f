//! Timeline item model.
//!
//! Pure data produced by track reconstruction; presentation lives with the
//! consumer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pixel dimensions of a visual source. Zero for non-visual items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for PixelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// The video or audio lane of the edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackKind {
    Video,
    Audio,
}

impl TrackKind {
    /// Numeric `TrackTyp` value used by the schema.
    pub(crate) fn type_id(self) -> u32 {
        match self {
            TrackKind::Video => 0,
            TrackKind::Audio => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TrackKind::Video => "video",
            TrackKind::Audio => "audio",
        }
    }
}

/// A title card. Title sources have no source media.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleItem {
    pub timeline_start: f64,
    pub timeline_end: f64,
    pub effects: Vec<String>,
}

/// A still image scheduled on the timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StillItem {
    pub timeline_start: f64,
    pub timeline_end: f64,
    pub effects: Vec<String>,
    pub name: String,
    pub src_path: String,
    /// As recorded by the schema; the unit varies across schema versions.
    pub file_size: u64,
    pub src_size_px: PixelSize,
}

/// A video clip with a trim window into its source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoItem {
    pub timeline_start: f64,
    pub timeline_end: f64,
    pub effects: Vec<String>,
    pub name: String,
    pub src_path: String,
    /// As recorded by the schema; the unit varies across schema versions.
    pub file_size: u64,
    pub src_size_px: PixelSize,
    pub source_start: f64,
    pub source_end: f64,
}

/// An audio clip with a trim window into its source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioItem {
    pub timeline_start: f64,
    pub timeline_end: f64,
    pub effects: Vec<String>,
    pub name: String,
    pub src_path: String,
    pub file_size: u64,
    pub src_size_px: PixelSize,
    pub source_start: f64,
    pub source_end: f64,
    pub is_muted: bool,
    pub fades_in: bool,
    pub fades_out: bool,
    /// Volume multiplier, 1.0 = unmodified.
    pub volume: f64,
}

/// One scheduled unit on a track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TimelineItem {
    Title(TitleItem),
    Still(StillItem),
    Video(VideoItem),
    Audio(AudioItem),
}

impl TimelineItem {
    /// Position of the item on the overall timeline, in seconds.
    pub fn timeline_start(&self) -> f64 {
        match self {
            TimelineItem::Title(t) => t.timeline_start,
            TimelineItem::Still(s) => s.timeline_start,
            TimelineItem::Video(v) => v.timeline_start,
            TimelineItem::Audio(a) => a.timeline_start,
        }
    }

    pub fn timeline_end(&self) -> f64 {
        match self {
            TimelineItem::Title(t) => t.timeline_end,
            TimelineItem::Still(s) => s.timeline_end,
            TimelineItem::Video(v) => v.timeline_end,
            TimelineItem::Audio(a) => a.timeline_end,
        }
    }

    /// Effect names applied to the item, in insertion order.
    pub fn effects(&self) -> &[String] {
        match self {
            TimelineItem::Title(t) => &t.effects,
            TimelineItem::Still(s) => &s.effects,
            TimelineItem::Video(v) => &v.effects,
            TimelineItem::Audio(a) => &a.effects,
        }
    }

    /// Lower-case kind name for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            TimelineItem::Title(_) => "title",
            TimelineItem::Still(_) => "still",
            TimelineItem::Video(_) => "video",
            TimelineItem::Audio(_) => "audio",
        }
    }
}
