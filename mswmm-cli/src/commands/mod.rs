//! CLI subcommand implementations.

pub mod ffmpeg;
pub mod info;
pub mod xml;

pub use ffmpeg::CmdFfmpeg;
pub use info::CmdInfo;
pub use xml::CmdXml;
