//! Extracting every level, and map titles, from one container.

use std::collections::BTreeMap;

use regex::Regex;
use wadlevel_types::Level;

use crate::archive::{ArchiveError, LumpSource, file_stem};
use crate::decode::{DecodeError, decode_level};
use crate::level_finder::LevelDataFinder;
use crate::mapinfo::{map_titles, read_mapinfo};
use crate::settings::{Settings, SettingsError};

#[derive(Debug, thiserror::Error)]
pub enum SkipReason {
    #[error("unreadable: {0}")]
    Unreadable(#[from] ArchiveError),
    #[error("{0}")]
    Decode(#[from] DecodeError),
}

/// A level that was found but not decoded.
#[derive(Debug)]
pub struct SkippedLevel {
    pub name: String,
    pub reason: SkipReason,
}

#[derive(Debug, Default)]
pub struct Extraction {
    pub levels: Vec<Level>,
    pub skipped: Vec<SkippedLevel>,
    /// Literal map titles from MAPINFO, keyed by level lump name.
    pub map_titles: BTreeMap<String, String>,
}

pub struct LevelExtractor {
    settings: Settings,
    nested_maps: Regex,
}

impl LevelExtractor {
    pub fn new(settings: Settings) -> Result<Self, SettingsError> {
        let nested_maps = settings.nested_map_regex()?;
        Ok(Self {
            settings,
            nested_maps,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Locate and decode every level in `source` and in its per-map
    /// containers. A level that fails to decode is recorded in
    /// [`Extraction::skipped`] and does not affect the others.
    pub fn extract(&self, source: &dyn LumpSource) -> Extraction {
        let mut extraction = Extraction::default();
        let mut finder = LevelDataFinder::with_limits(
            self.settings.max_level_lumps,
            self.settings.level_name_length,
        );

        finder.add_from_archive(source, None);

        for index in source.find_all_matching(&self.nested_maps) {
            let name = &source.entries()[index].name;
            match source.open_nested(index) {
                Ok(Some(nested)) => {
                    log::debug!("scanning {name} for levels");
                    finder.add_from_archive(nested.as_ref(), Some(file_stem(name)));
                }
                Ok(None) => log::debug!("{name} is not a container, skipping"),
                Err(e) => {
                    log::warn!("cannot open {name}: {e}");
                    extraction.skipped.push(SkippedLevel {
                        name: file_stem(name).to_uppercase(),
                        reason: e.into(),
                    });
                }
            }
        }

        let (levels, unreadable) = finder.into_parts();
        extraction
            .skipped
            .extend(unreadable.into_iter().map(|level| SkippedLevel {
                name: level.name,
                reason: level.error.into(),
            }));

        for mut level_data in levels {
            if level_data.format.is_binary() && self.settings.binary_namespace.is_some() {
                level_data.namespace = self.settings.binary_namespace;
            }

            let name = level_data.name.clone();
            match decode_level(level_data) {
                Ok(level) => {
                    log::debug!(
                        "Found {} ({}): {} vertices, {} lines, {} sides, {} sectors, {} things.",
                        level.name,
                        level.format,
                        level.vertices.len(),
                        level.lines.len(),
                        level.sides.len(),
                        level.sectors.len(),
                        level.things.len()
                    );
                    extraction.levels.push(level);
                }
                Err(e) => {
                    log::warn!("{name}: {e}");
                    extraction.skipped.push(SkippedLevel {
                        name,
                        reason: e.into(),
                    });
                }
            }
        }

        match read_mapinfo(source, &self.settings.mapinfo_lumps) {
            Ok(Some(entries)) => extraction.map_titles = map_titles(&entries),
            Ok(None) => {}
            Err(e) => log::warn!("map info: {e}"),
        }

        log::info!(
            "Found {} valid levels, skipped {}.",
            extraction.levels.len(),
            extraction.skipped.len()
        );
        extraction
    }
}

impl Default for LevelExtractor {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            nested_maps: Regex::new(crate::settings::NESTED_MAP_PATTERN)
                .expect("default nested map pattern is a valid regex"),
        }
    }
}
