//! Locating level lump bundles in a container directory.
//!
//! A level is a header lump (its name, e.g. `MAP01`) followed by the lumps
//! that make it up. Binary levels start with `THINGS` and run while the
//! names are known level lumps; UDMF levels start with `TEXTMAP` and run to
//! `ENDMAP`. Either way a bundle spans at most [`MAX_LEVEL_LUMPS`] entries
//! counted from the header.

use std::collections::BTreeMap;
use std::ops::Range;

use wadlevel_types::{LevelFormat, LevelNamespace};

use crate::archive::{ArchiveError, LumpEntry, LumpSource};

pub const MAX_LEVEL_LUMPS: usize = 20;

/// Level names are truncated to this many characters.
pub const LEVEL_NAME_LENGTH: usize = 8;

/// Lumps that may follow `THINGS` in a binary level.
pub const LEVEL_LUMP_NAMES: [&str; 13] = [
    "THINGS", "LINEDEFS", "SIDEDEFS", "VERTEXES", "SEGS", "SSECTORS", "NODES", "SECTORS", "REJECT",
    "BLOCKMAP", "BEHAVIOR", "SCRIPTS", "DIALOGUE",
];

/// True for names that belong to a binary level bundle, including GL node lumps.
pub fn is_level_lump(name: &str) -> bool {
    LEVEL_LUMP_NAMES.contains(&name) || name.starts_with("GL_")
}

/// Where a level's lumps sit in a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelSpan {
    /// Upper-cased header lump name.
    pub name: String,
    pub header: usize,
    /// Entries after the header that belong to the level.
    pub lumps: Range<usize>,
}

/// Find every level bundle in `entries` without reading any lump data.
pub fn locate_levels(entries: &[LumpEntry], max_lumps: usize) -> Vec<LevelSpan> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.name == "THINGS" || entry.name == "TEXTMAP")
        .filter_map(|(index, marker)| {
            let Some(header) = index.checked_sub(1) else {
                log::debug!("{} is the first lump and has no level header, skipping", marker.name);
                return None;
            };

            let limit = entries.len().min(header + max_lumps);
            let udmf = marker.name == "TEXTMAP";
            let mut end = index;
            while end < limit {
                let name = entries[end].name.as_str();
                let belongs = if udmf {
                    name != "ENDMAP"
                } else {
                    is_level_lump(name)
                };
                if !belongs {
                    break;
                }
                end += 1;
            }

            Some(LevelSpan {
                name: entries[header].name.to_uppercase(),
                header,
                lumps: index..end,
            })
        })
        .collect()
}

/// The raw lumps of one level, keyed by lump name.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelData {
    pub name: String,
    pub format: LevelFormat,
    /// Dialect for binary records. `None` defers to the format: DOOM levels
    /// read as `doom`, HEXEN levels as `hexen`, and UDMF levels declare
    /// their own.
    pub namespace: Option<LevelNamespace>,
    lumps: BTreeMap<String, Vec<u8>>,
}

impl LevelData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            format: LevelFormat::Doom,
            namespace: None,
            lumps: BTreeMap::new(),
        }
    }

    /// Store a lump, updating the format from its name. `TEXTMAP` makes the
    /// level UDMF; `BEHAVIOR` makes a binary level Hexen.
    pub fn add(&mut self, name: &str, data: Vec<u8>) {
        match name {
            "TEXTMAP" => self.format = LevelFormat::Udmf,
            "BEHAVIOR" if self.format != LevelFormat::Udmf => self.format = LevelFormat::Hexen,
            _ => {}
        }
        self.lumps.insert(name.to_string(), data);
    }

    pub fn with_lump(mut self, name: &str, data: impl Into<Vec<u8>>) -> Self {
        self.add(name, data.into());
        self
    }

    pub fn lump(&self, name: &str) -> Option<&[u8]> {
        self.lumps.get(name).map(Vec::as_slice)
    }

    pub fn lump_names(&self) -> impl Iterator<Item = &str> {
        self.lumps.keys().map(String::as_str)
    }

    /// The namespace binary records are interpreted in.
    pub fn binary_namespace(&self) -> LevelNamespace {
        self.namespace.unwrap_or(match self.format {
            LevelFormat::Hexen => LevelNamespace::Hexen,
            LevelFormat::Doom | LevelFormat::Udmf => LevelNamespace::Doom,
        })
    }
}

/// A level whose lumps could not be read from the container.
#[derive(Debug)]
pub struct UnreadableLevel {
    pub name: String,
    pub error: ArchiveError,
}

/// Collects [`LevelData`] from one or more containers.
#[derive(Debug)]
pub struct LevelDataFinder {
    max_lumps: usize,
    name_length: usize,
    levels: Vec<LevelData>,
    unreadable: Vec<UnreadableLevel>,
}

impl Default for LevelDataFinder {
    fn default() -> Self {
        Self::with_limits(MAX_LEVEL_LUMPS, LEVEL_NAME_LENGTH)
    }
}

impl LevelDataFinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(max_lumps: usize, name_length: usize) -> Self {
        Self {
            max_lumps,
            name_length,
            levels: Vec::new(),
            unreadable: Vec::new(),
        }
    }

    /// Add every level found in `source`.
    ///
    /// With `name_override`, levels are named after it instead of their
    /// header lump; nested per-map containers use their file name this way.
    pub fn add_from_archive(&mut self, source: &dyn LumpSource, name_override: Option<&str>) {
        let entries = source.entries();
        for span in locate_levels(entries, self.max_lumps) {
            let name = match name_override {
                Some(name) => name.chars().take(self.name_length).collect::<String>().to_uppercase(),
                None => span.name.clone(),
            };

            match read_span(source, &span, &name) {
                Ok(level) => self.levels.push(level),
                Err(error) => {
                    log::warn!("{name}: cannot read level lumps: {error}");
                    self.unreadable.push(UnreadableLevel { name, error });
                }
            }
        }
    }

    pub fn levels(&self) -> &[LevelData] {
        &self.levels
    }

    pub fn unreadable(&self) -> &[UnreadableLevel] {
        &self.unreadable
    }

    pub fn into_parts(self) -> (Vec<LevelData>, Vec<UnreadableLevel>) {
        (self.levels, self.unreadable)
    }
}

fn read_span(source: &dyn LumpSource, span: &LevelSpan, name: &str) -> Result<LevelData, ArchiveError> {
    let entries = source.entries();
    let mut level = LevelData::new(name);
    for index in span.lumps.clone() {
        let data = source.data(index)?;
        level.add(&entries[index].name, data.into_owned());
    }
    Ok(level)
}
