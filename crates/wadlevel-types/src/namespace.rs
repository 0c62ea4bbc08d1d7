use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString};

/// Engine dialect governing flag-bit and field semantics of a level.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LevelNamespace {
    #[default]
    Doom,
    Heretic,
    Strife,
    Hexen,
    Eternity,
    #[strum(to_string = "zdoom", serialize = "gzdoom", serialize = "zandronum")]
    ZDoom,
}

impl LevelNamespace {
    /// Resolve a UDMF `namespace = "...";` declaration.
    ///
    /// Unknown or missing declarations resolve to [`LevelNamespace::ZDoom`],
    /// the most permissive of the known dialects.
    pub fn from_udmf(declared: Option<&str>) -> Self {
        declared
            .and_then(|name| name.parse().ok())
            .unwrap_or(Self::ZDoom)
    }

    /// `doom`, `heretic` and `strife` keep vanilla semantics for line ids.
    pub fn is_vanilla_udmf(declared: &str) -> bool {
        ["doom", "heretic", "strife"]
            .iter()
            .any(|v| declared.eq_ignore_ascii_case(v))
    }
}

/// Storage format a level was decoded from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Display, EnumIter, EnumCount,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum LevelFormat {
    /// Fixed-width Doom records.
    #[default]
    Doom,
    /// Fixed-width Hexen records (a `BEHAVIOR` lump is present).
    Hexen,
    /// UDMF text in a `TEXTMAP` lump.
    Udmf,
}

impl LevelFormat {
    pub fn is_binary(self) -> bool {
        !matches!(self, Self::Udmf)
    }
}
