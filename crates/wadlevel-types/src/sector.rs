use serde::Serialize;

/// Light level of a UDMF sector without a `lightlevel` key.
pub const DEFAULT_LIGHT: i32 = 160;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sector {
    pub z_floor: i32,
    pub z_ceiling: i32,
    pub texture_floor: String,
    pub texture_ceiling: String,
    /// Tag ids. Never empty; binary sectors carry exactly one.
    pub ids: Vec<i32>,
    pub kind: i32,
    pub light: i32,
}

impl Sector {
    /// The primary tag.
    pub fn tag(&self) -> i32 {
        self.ids.first().copied().unwrap_or(0)
    }

    /// Floor to ceiling distance. Widened so any pair of UDMF heights fits.
    pub fn height(&self) -> i64 {
        i64::from(self.z_ceiling) - i64::from(self.z_floor)
    }
}
