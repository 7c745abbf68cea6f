//! The project aggregate root.

use roxmltree::{Document, Node};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::container;
use crate::error::{Error, RenderError, Result};
use crate::item::{TimelineItem, TrackKind};
use crate::render;
use crate::resolve::{attr_u32, first_child, RecordIndex};
use crate::timeline::reconstruct_track;

/// Project aspect ratio; zero when the schema version lacks it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AspectRatio {
    pub x: u32,
    pub y: u32,
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.x, self.y)
    }
}

/// A fully reconstructed Movie Maker project.
///
/// Construction is all-or-nothing: any container, encoding, XML or schema
/// failure aborts before a `Project` exists. The model is immutable once
/// built.
#[derive(Debug, Clone)]
pub struct Project {
    author: String,
    title: String,
    description: String,
    copyright: String,
    rating: String,
    aspect_ratio: AspectRatio,
    source_files: Vec<String>,
    video_timeline: Vec<TimelineItem>,
    audio_timeline: Vec<TimelineItem>,
    has_title_sequences: bool,
    xml: String,
}

/// Everything extracted from the parsed document, minus the raw text.
#[derive(Default)]
struct Analyzed {
    author: String,
    title: String,
    description: String,
    copyright: String,
    rating: String,
    aspect_ratio: AspectRatio,
    source_files: Vec<String>,
    video_timeline: Vec<TimelineItem>,
    audio_timeline: Vec<TimelineItem>,
}

impl Project {
    /// Load a project from a `.MSWMM` compound file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let xml = container::read_project_xml(path.as_ref())?;
        Self::from_xml_owned(xml)
    }

    /// Reconstruct a project from already-decoded project XML.
    pub fn from_xml(xml: &str) -> Result<Self> {
        Self::from_xml_owned(xml.to_string())
    }

    fn from_xml_owned(xml: String) -> Result<Self> {
        let analyzed = {
            let doc = Document::parse(&xml).map_err(|e| {
                let pos = e.pos();
                Error::XmlParse {
                    line: pos.row,
                    column: pos.col,
                    message: e.to_string(),
                }
            })?;
            analyze(&doc)?
        };

        let has_title_sequences = analyzed
            .video_timeline
            .iter()
            .any(|item| matches!(item, TimelineItem::Title(_)));

        Ok(Self {
            author: analyzed.author,
            title: analyzed.title,
            description: analyzed.description,
            copyright: analyzed.copyright,
            rating: analyzed.rating,
            aspect_ratio: analyzed.aspect_ratio,
            source_files: analyzed.source_files,
            video_timeline: analyzed.video_timeline,
            audio_timeline: analyzed.audio_timeline,
            has_title_sequences,
            xml,
        })
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn copyright(&self) -> &str {
        &self.copyright
    }

    pub fn rating(&self) -> &str {
        &self.rating
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }

    /// Source file paths referenced by the project, in document order.
    /// Duplicates are preserved.
    pub fn source_files(&self) -> &[String] {
        &self.source_files
    }

    pub fn video_timeline(&self) -> &[TimelineItem] {
        &self.video_timeline
    }

    pub fn audio_timeline(&self) -> &[TimelineItem] {
        &self.audio_timeline
    }

    /// The ordered item list of the given track.
    pub fn timeline(&self, kind: TrackKind) -> &[TimelineItem] {
        match kind {
            TrackKind::Video => &self.video_timeline,
            TrackKind::Audio => &self.audio_timeline,
        }
    }

    pub fn has_title_sequences(&self) -> bool {
        self.has_title_sequences
    }

    /// The decoded project XML, exactly as embedded (trimmed).
    pub fn xml(&self) -> &str {
        &self.xml
    }

    /// Synthesize an ffmpeg command that renders the video timeline.
    ///
    /// `substitutions` are `(find, replace)` rules applied to every source
    /// path in list order. Pure function of the model; may be called any
    /// number of times, and a failure leaves the project untouched.
    pub fn ffmpeg_command(
        &self,
        substitutions: &[(String, String)],
    ) -> std::result::Result<String, RenderError> {
        render::ffmpeg_command(&self.video_timeline, substitutions)
    }
}

fn analyze(doc: &Document<'_>) -> Result<Analyzed> {
    let data_str = first_child(doc.root_element(), "Project")
        .and_then(|project| first_child(project, "DataStr"))
        .ok_or_else(|| Error::MissingElement("DataStr (project definition container)".into()))?;

    let index = RecordIndex::new(data_str);

    let mut analyzed = Analyzed::default();
    read_metadata(data_str, &mut analyzed);
    read_file_registry(data_str, &mut analyzed);
    analyzed.video_timeline = reconstruct_track(data_str, &index, TrackKind::Video)?;
    analyzed.audio_timeline = reconstruct_track(data_str, &index, TrackKind::Audio)?;
    Ok(analyzed)
}

/// Key/value metadata records plus the aspect ratio attributes.
fn read_metadata(data_str: Node<'_, '_>, out: &mut Analyzed) {
    let Some(props) = first_child(data_str, "ProducerProperties") else {
        return;
    };
    out.aspect_ratio = AspectRatio {
        x: attr_u32(props, "ProjectAspectRatioX"),
        y: attr_u32(props, "ProjectAspectRatioY"),
    };

    for record in props
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "MetDat")
    {
        let key = record.attribute("MDTag").unwrap_or_default();
        let value = record.attribute("MDVal").unwrap_or_default();
        match key {
            "Author" => out.author = value.to_string(),
            "PresentationTitle" => out.title = value.to_string(),
            "Copyright" => out.copyright = value.to_string(),
            "Rating" => out.rating = value.to_string(),
            "Description" => out.description = value.to_string(),
            _ => {}
        }
    }
}

/// All `FileInfo` records, one path each, document order, no dedup.
fn read_file_registry(data_str: Node<'_, '_>, out: &mut Analyzed) {
    for record in data_str
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "FileInfo")
    {
        let path = record.attribute("SrceFn").unwrap_or_default();
        out.source_files.push(path.to_string());
    }
}
