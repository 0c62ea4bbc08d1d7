use bitflags::bitflags;
use serde::Serialize;

bitflags! {
    /// Canonical thing spawn flags, independent of the level's dialect.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct ThingFlags: u32 {
        const SKILL_1       = 0x0000_0001;
        const SKILL_2       = 0x0000_0002;
        const SKILL_3       = 0x0000_0004;
        const SKILL_4       = 0x0000_0008;
        const SKILL_5       = 0x0000_0010;
        const AMBUSH        = 0x0000_0020;

        // Game modes a thing spawns in (Hexen, UDMF)
        const SINGLE        = 0x0000_0040;
        const DM            = 0x0000_0080;
        const COOP          = 0x0000_0100;

        // Game modes a thing is excluded from (Doom, Boom, MBF)
        const NOT_SP        = 0x0000_0200;
        const NOT_DM        = 0x0000_0400;
        const NOT_COOP      = 0x0000_0800;
        const FRIEND        = 0x0000_1000;

        // Hexen
        const DORMANT       = 0x0000_2000;
        const CLASS1        = 0x0000_4000;
        const CLASS2        = 0x0000_8000;
        const CLASS3        = 0x0001_0000;

        // Strife
        const STANDING      = 0x0002_0000;
        const STRIFE_ALLY   = 0x0004_0000;
        const TRANSLUCENT   = 0x0008_0000;
        const TRANSLUCENT25 = 0x0010_0000;
        const TRANSLUCENT75 = 0x0020_0000;
        const INVISIBLE     = 0x0040_0000;
    }
}

/// A placed actor: monster, item, player start, decoration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Thing {
    pub x: f64,
    pub y: f64,
    /// Height above the floor; 0 when the format has no z.
    pub z: f64,
    /// Facing in degrees.
    pub angle: i32,
    /// Doomednum.
    pub kind: i32,
    pub flags: ThingFlags,
    /// Thing id (tid); 0 when unassigned.
    pub id: i32,
    pub special: i32,
    pub args: [i32; 5],
    pub arg0str: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_flag_has_its_own_bit() {
        let mut seen = 0u32;
        for (name, flag) in ThingFlags::all().iter_names() {
            assert_eq!(flag.bits().count_ones(), 1, "{name} is not a single bit");
            assert_eq!(seen & flag.bits(), 0, "{name} overlaps another flag");
            seen |= flag.bits();
        }
    }

    #[test]
    fn default_is_empty() {
        assert!(ThingFlags::default().is_empty());
    }
}
