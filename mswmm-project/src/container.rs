//! Compound-container access and stream decoding.
//!
//! The `.MSWMM` envelope is an OLE/CFB compound file; the project script
//! lives in the `ProducerData\Producer.Dat` stream as UTF-16LE text.

use byteorder::{LittleEndian, ReadBytesExt};
use std::fs;
use std::io::{Cursor, Read, Seek};
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Full path of the project definition stream inside the container.
const PROJECT_STREAM: &str = "ProducerData\\Producer.Dat";

/// Read the embedded project XML out of a `.MSWMM` file.
///
/// The file is read completely into memory up front; no handle outlives
/// this call.
pub(crate) fn read_project_xml(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    let mut container =
        cfb::CompoundFile::open(Cursor::new(bytes)).map_err(|e| Error::Container(e.to_string()))?;

    let stream_path = find_stream(&container, PROJECT_STREAM)
        .ok_or_else(|| Error::MissingStream(PROJECT_STREAM.to_string()))?;
    tracing::debug!("Found project stream at {}", stream_path.display());

    let mut raw = Vec::new();
    container
        .open_stream(&stream_path)
        .and_then(|mut stream| stream.read_to_end(&mut raw))
        .map_err(|e| Error::Container(e.to_string()))?;

    decode_utf16le(&raw)
}

/// Locate a stream by its backslash-joined full path.
fn find_stream<F: Read + Seek>(container: &cfb::CompoundFile<F>, target: &str) -> Option<PathBuf> {
    for entry in container.walk() {
        if !entry.is_stream() {
            continue;
        }
        let joined = entry
            .path()
            .components()
            .filter_map(|c| match c {
                Component::Normal(segment) => segment.to_str(),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\\");
        if joined == target {
            return Some(entry.path().to_path_buf());
        }
    }
    None
}

/// Decode a UTF-16LE stream into trimmed XML text.
fn decode_utf16le(raw: &[u8]) -> Result<String> {
    if raw.len() % 2 != 0 {
        return Err(Error::NotUtf16);
    }
    let mut units = vec![0u16; raw.len() / 2];
    Cursor::new(raw)
        .read_u16_into::<LittleEndian>(&mut units)
        .map_err(|_| Error::NotUtf16)?;
    let text = String::from_utf16(&units).map_err(|_| Error::NotUtf16)?;
    Ok(text.trim_start_matches('\u{feff}').trim().to_string())
}
