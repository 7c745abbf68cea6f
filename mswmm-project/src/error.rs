//! Error types for reading MSWMM project files.

use thiserror::Error;

use crate::item::PixelSize;

/// Errors raised while loading a project file.
///
/// Loading is all-or-nothing: any of these aborts construction before a
/// [`crate::Project`] exists.
#[derive(Error, Debug)]
pub enum Error {
    /// The file could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The compound container is malformed.
    #[error("Can't parse compound container: {0}")]
    Container(String),

    /// The project definition stream is missing from the container.
    #[error("Can't find project definition XML ({0})")]
    MissingStream(String),

    /// The project definition stream is not UTF-16 encoded.
    #[error("Project XML is not encoded as UTF-16")]
    NotUtf16,

    /// The embedded script is not well-formed XML.
    #[error("Can't parse project XML at line {line}, column {column}: {message}")]
    XmlParse {
        line: u32,
        column: u32,
        message: String,
    },

    /// A required schema record is missing.
    #[error("Missing required element: {0}")]
    MissingElement(String),

    /// A timeline entry kind is not allowed on the track it appears on.
    #[error("{kind} in {track} timeline")]
    MisplacedItem {
        kind: &'static str,
        track: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Validation errors raised during ffmpeg command synthesis.
///
/// Scoped to the synthesis call; the loaded project stays fully usable.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Empty video timeline")]
    EmptyTimeline,

    #[error("Timeline items overlap at {at}s, but transitions are not supported")]
    OverlappingItems { at: f64 },

    #[error("Only videos and images are supported on the timeline, found a {kind} item")]
    UnsupportedItem { kind: &'static str },

    #[error("Timelines with both videos and images are not supported")]
    MixedMedia,

    #[error("Images don't have the same size: {expected} vs {found}")]
    SizeMismatch {
        expected: PixelSize,
        found: PixelSize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MisplacedItem {
            kind: "Title sequence",
            track: "audio",
        };
        assert_eq!(err.to_string(), "Title sequence in audio timeline");
    }

    #[test]
    fn test_render_error_display() {
        let err = RenderError::SizeMismatch {
            expected: PixelSize {
                width: 640,
                height: 480,
            },
            found: PixelSize {
                width: 800,
                height: 600,
            },
        };
        assert_eq!(
            err.to_string(),
            "Images don't have the same size: 640x480 vs 800x600"
        );
    }
}
