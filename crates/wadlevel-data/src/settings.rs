//! Extraction settings, loadable from a TOML file.
//!
//! ```toml
//! max_level_lumps = 20
//! level_name_length = 8
//! nested_map_pattern = '(?i)^maps/.*\.wad$'
//! binary_namespace = "strife"
//! mapinfo_lumps = ["ZMAPINFO", "MAPINFO"]
//! ```

use std::path::Path;

use regex::Regex;
use serde::Deserialize;
use wadlevel_types::LevelNamespace;

use crate::level_finder::{LEVEL_NAME_LENGTH, MAX_LEVEL_LUMPS};
use crate::mapinfo::MAPINFO_LUMPS;

pub const NESTED_MAP_PATTERN: &str = r"(?i)^maps/.*\.wad$";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("invalid nested map pattern: {0}")]
    Pattern(#[from] regex::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Lumps a level bundle may span, counted from its header.
    pub max_level_lumps: usize,
    pub level_name_length: usize,
    /// Entries matching this are opened as per-map containers.
    pub nested_map_pattern: String,
    /// Dialect forced onto DOOM and HEXEN format levels.
    pub binary_namespace: Option<LevelNamespace>,
    pub mapinfo_lumps: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_level_lumps: MAX_LEVEL_LUMPS,
            level_name_length: LEVEL_NAME_LENGTH,
            nested_map_pattern: NESTED_MAP_PATTERN.to_string(),
            binary_namespace: None,
            mapinfo_lumps: MAPINFO_LUMPS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file. Keys it leaves out keep their defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        Self::from_source(config::File::from(path).format(config::FileFormat::Toml))
    }

    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        Self::from_source(config::File::from_str(text, config::FileFormat::Toml))
    }

    fn from_source<S>(source: S) -> Result<Self, SettingsError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let settings: Settings = config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;
        settings.nested_map_regex()?;
        Ok(settings)
    }

    pub fn nested_map_regex(&self) -> Result<Regex, SettingsError> {
        Ok(Regex::new(&self.nested_map_pattern)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.max_level_lumps, 20);
        assert_eq!(settings.level_name_length, 8);
        assert_eq!(settings.binary_namespace, None);
        assert_eq!(
            settings.mapinfo_lumps,
            ["ZMAPINFO", "EMAPINFO", "RMAPINFO", "MAPINFO"]
        );
        assert!(settings.nested_map_regex().expect("regex").is_match("MAPS/E1M1.WAD"));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let settings = Settings::from_toml_str(
            "binary_namespace = \"strife\"\nmapinfo_lumps = [\"MAPINFO\"]\n",
        )
        .expect("settings");
        assert_eq!(settings.binary_namespace, Some(LevelNamespace::Strife));
        assert_eq!(settings.mapinfo_lumps, ["MAPINFO"]);
        assert_eq!(settings.max_level_lumps, 20);
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(Settings::from_toml_str("").expect("settings"), Settings::default());
    }

    #[test]
    fn bad_pattern_is_rejected() {
        assert!(matches!(
            Settings::from_toml_str("nested_map_pattern = \"(\""),
            Err(SettingsError::Pattern(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let path = std::env::temp_dir().join(format!("wadlevel-settings-{}.toml", std::process::id()));
        std::fs::write(&path, "max_level_lumps = 12\n").expect("write");
        let settings = Settings::load(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(settings.expect("settings").max_level_lumps, 12);
    }
}
