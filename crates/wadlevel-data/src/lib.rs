//! Decoding Doom-engine levels from container lumps.
//!
//! [`LevelDataFinder`] groups a container's lumps into per-level bundles,
//! [`decode_level`] turns a bundle into a [`wadlevel_types::Level`] whether
//! it is stored as binary records or UDMF text, and [`LevelExtractor`] does
//! both for a whole container, per-map sub-containers included.

pub mod archive;
pub mod binary_reader;
pub mod decode;
pub mod extractor;
pub mod flags;
pub mod level_finder;
pub mod lexer;
pub mod mapinfo;
pub mod settings;
pub mod udmf_lexer;
pub mod udmf_parser;

pub use archive::{ArchiveError, LumpEntry, LumpSource, MemoryArchive};
pub use decode::{DecodeError, decode_level};
pub use extractor::{Extraction, LevelExtractor, SkipReason, SkippedLevel};
pub use level_finder::{LevelData, LevelDataFinder};
pub use settings::{Settings, SettingsError};
pub use udmf_parser::{ParseError, UdmfError, UdmfMap, parse_udmf};
