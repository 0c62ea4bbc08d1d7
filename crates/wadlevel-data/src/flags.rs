//! Translation of dialect-specific flag encodings onto the canonical
//! [`LineFlags`] and [`ThingFlags`] sets.
//!
//! Binary levels pack flags into a 16-bit word whose upper bits mean
//! different things per engine. UDMF spells each flag as a boolean key; the
//! line and thing tables are separate because some keys (`translucent`)
//! mean different things on different entities.

use std::collections::HashMap;
use std::sync::LazyLock;

use wadlevel_types::{LevelNamespace, LineFlags, ThingFlags};

/// Bits 0x0001..=0x0100, shared by every dialect.
const COMMON_LINE_BITS: [(u16, LineFlags); 9] = [
    (0x0001, LineFlags::BLOCK),
    (0x0002, LineFlags::BLOCK_MONSTER),
    (0x0004, LineFlags::TWO_SIDED),
    (0x0008, LineFlags::UNPEG_TOP),
    (0x0010, LineFlags::UNPEG_BOTTOM),
    (0x0020, LineFlags::SECRET),
    (0x0040, LineFlags::BLOCK_SOUND),
    (0x0080, LineFlags::HIDDEN),
    (0x0100, LineFlags::MAPPED),
];

const STRIFE_LINE_BITS: [(u16, LineFlags); 4] = [
    (0x0200, LineFlags::JUMP_OVER),
    (0x0400, LineFlags::BLOCK_FLOAT),
    (0x1000, LineFlags::TRANSLUCENT75),
    (0x2000, LineFlags::TRANSLUCENT25),
];

const HEXEN_LINE_BITS: [(u16, LineFlags); 4] = [
    (0x0200, LineFlags::REPEATS),
    (0x2000, LineFlags::MONSTER_ACTIVATES),
    (0x4000, LineFlags::BLOCK_PLAYERS),
    (0x8000, LineFlags::BLOCK_ALL),
];

/// Hexen activation type, a 3-bit field rather than independent bits.
const SPAC_MASK: u16 = 0x1C00;
const SPAC_SHIFT: u16 = 10;

fn spac_flags(value: u16) -> LineFlags {
    match (value & SPAC_MASK) >> SPAC_SHIFT {
        1 => LineFlags::PLAYER_USE,
        2 => LineFlags::MONSTER_CROSS,
        3 => LineFlags::IMPACT,
        4 => LineFlags::PLAYER_PUSH,
        5 => LineFlags::MISSILE_CROSS,
        6 => LineFlags::PLAYER_USE | LineFlags::PASS_USE,
        7 => LineFlags::PLAYER_CROSS | LineFlags::MONSTER_CROSS | LineFlags::MISSILE_CROSS,
        _ => LineFlags::empty(),
    }
}

/// Bits of a binary linedef flag word that carry meaning in `namespace`.
pub fn line_flag_mask(namespace: LevelNamespace) -> u16 {
    let extra = match namespace {
        LevelNamespace::Strife => 0x0200 | 0x0400 | 0x1000 | 0x2000,
        LevelNamespace::Eternity => 0x0200 | 0x0400,
        LevelNamespace::Hexen | LevelNamespace::ZDoom => 0x0200 | SPAC_MASK | 0xE000,
        LevelNamespace::Doom | LevelNamespace::Heretic => 0,
    };
    0x01FF | extra
}

/// Map a binary linedef flag word to canonical flags. Bits with no meaning in
/// `namespace` are dropped.
pub fn map_line_flags(value: u16, namespace: LevelNamespace) -> LineFlags {
    let mut flags = set_bits(value, &COMMON_LINE_BITS);

    match namespace {
        LevelNamespace::Strife => flags |= set_bits(value, &STRIFE_LINE_BITS),
        LevelNamespace::Eternity => {
            if value & 0x0400 != 0 {
                flags |= LineFlags::WALKABLE;
            }
        }
        LevelNamespace::Hexen | LevelNamespace::ZDoom => {
            flags |= set_bits(value, &HEXEN_LINE_BITS);
            flags |= spac_flags(value);
        }
        LevelNamespace::Doom | LevelNamespace::Heretic => {}
    }

    // Boom's pass-through-use bit, shared by the ports that adopted it.
    if matches!(namespace, LevelNamespace::ZDoom | LevelNamespace::Eternity) && value & 0x0200 != 0 {
        flags |= LineFlags::PASS_USE;
    }

    flags
}

const COMMON_THING_BITS: [(u16, ThingFlags); 3] = [
    (0x0001, ThingFlags::SKILL_1.union(ThingFlags::SKILL_2)),
    (0x0002, ThingFlags::SKILL_3),
    (0x0004, ThingFlags::SKILL_4.union(ThingFlags::SKILL_5)),
];

const STRIFE_THING_BITS: [(u16, ThingFlags); 4] = [
    (0x0008, ThingFlags::STANDING),
    (0x0010, ThingFlags::NOT_SP),
    (0x0020, ThingFlags::AMBUSH),
    (0x0040, ThingFlags::FRIEND),
];

const HEXEN_THING_BITS: [(u16, ThingFlags); 8] = [
    (0x0008, ThingFlags::AMBUSH),
    (0x0010, ThingFlags::DORMANT),
    (0x0020, ThingFlags::CLASS1),
    (0x0040, ThingFlags::CLASS2),
    (0x0080, ThingFlags::CLASS3),
    (0x0100, ThingFlags::SINGLE),
    (0x0200, ThingFlags::COOP),
    (0x0400, ThingFlags::DM),
];

const DOOM_THING_BITS: [(u16, ThingFlags); 5] = [
    (0x0008, ThingFlags::AMBUSH),
    (0x0010, ThingFlags::NOT_SP),
    (0x0020, ThingFlags::NOT_DM),
    (0x0040, ThingFlags::NOT_COOP),
    (0x0080, ThingFlags::FRIEND),
];

const STRIFE_SHADOW: u16 = 0x0100;
const STRIFE_ALT_SHADOW: u16 = 0x0200;

/// Bits of a binary thing flag word that carry meaning in `namespace`.
pub fn thing_flag_mask(namespace: LevelNamespace) -> u16 {
    match namespace {
        LevelNamespace::Strife => 0x037F,
        LevelNamespace::Hexen => 0x07FF,
        _ => 0x00FF,
    }
}

/// Map a binary thing flag word to canonical flags.
pub fn map_thing_flags(value: u16, namespace: LevelNamespace) -> ThingFlags {
    let mut flags = set_bits(value, &COMMON_THING_BITS);

    match namespace {
        LevelNamespace::Strife => {
            flags |= set_bits(value, &STRIFE_THING_BITS);
            let shadow = value & (STRIFE_SHADOW | STRIFE_ALT_SHADOW);
            if shadow == STRIFE_SHADOW | STRIFE_ALT_SHADOW {
                flags |= ThingFlags::INVISIBLE;
            } else if shadow == STRIFE_SHADOW {
                flags |= ThingFlags::TRANSLUCENT25;
            } else if shadow == STRIFE_ALT_SHADOW {
                flags |= ThingFlags::TRANSLUCENT75;
            }
        }
        LevelNamespace::Hexen => flags |= set_bits(value, &HEXEN_THING_BITS),
        _ => flags |= set_bits(value, &DOOM_THING_BITS),
    }

    flags
}

fn set_bits<F: bitflags::Flags + Copy>(value: u16, table: &[(u16, F)]) -> F {
    table
        .iter()
        .filter(|(bit, _)| value & bit != 0)
        .fold(F::empty(), |acc, (_, flag)| acc.union(*flag))
}

const LINE_FLAG_KEYS: [(&str, LineFlags); 22] = [
    ("blocking", LineFlags::BLOCK),
    ("blockmonsters", LineFlags::BLOCK_MONSTER),
    ("twosided", LineFlags::TWO_SIDED),
    ("dontpegtop", LineFlags::UNPEG_TOP),
    ("dontpegbottom", LineFlags::UNPEG_BOTTOM),
    ("secret", LineFlags::SECRET),
    ("blocksound", LineFlags::BLOCK_SOUND),
    ("dontdraw", LineFlags::HIDDEN),
    ("mapped", LineFlags::MAPPED),
    ("passuse", LineFlags::PASS_USE),
    ("translucent", LineFlags::TRANSLUCENT75),
    ("jumpover", LineFlags::JUMP_OVER),
    ("blockfloaters", LineFlags::BLOCK_FLOAT),
    ("playercross", LineFlags::PLAYER_CROSS),
    ("playeruse", LineFlags::PLAYER_USE),
    ("monstercross", LineFlags::MONSTER_CROSS),
    ("monsteruse", LineFlags::MONSTER_USE),
    ("impact", LineFlags::IMPACT),
    ("playerpush", LineFlags::PLAYER_PUSH),
    ("monsterpush", LineFlags::MONSTER_PUSH),
    ("missilecross", LineFlags::MISSILE_CROSS),
    ("repeatspecial", LineFlags::REPEATS),
];

const THING_FLAG_KEYS: [(&str, ThingFlags); 18] = [
    ("skill1", ThingFlags::SKILL_1),
    ("skill2", ThingFlags::SKILL_2),
    ("skill3", ThingFlags::SKILL_3),
    ("skill4", ThingFlags::SKILL_4),
    ("skill5", ThingFlags::SKILL_5),
    ("ambush", ThingFlags::AMBUSH),
    ("single", ThingFlags::SINGLE),
    ("dm", ThingFlags::DM),
    ("coop", ThingFlags::COOP),
    ("friend", ThingFlags::FRIEND),
    ("dormant", ThingFlags::DORMANT),
    ("class1", ThingFlags::CLASS1),
    ("class2", ThingFlags::CLASS2),
    ("class3", ThingFlags::CLASS3),
    ("standing", ThingFlags::STANDING),
    ("strifeally", ThingFlags::STRIFE_ALLY),
    ("translucent", ThingFlags::TRANSLUCENT),
    ("invisible", ThingFlags::INVISIBLE),
];

static LINE_FLAGS_BY_KEY: LazyLock<HashMap<&'static str, LineFlags>> =
    LazyLock::new(|| LINE_FLAG_KEYS.into_iter().collect());

static THING_FLAGS_BY_KEY: LazyLock<HashMap<&'static str, ThingFlags>> =
    LazyLock::new(|| THING_FLAG_KEYS.into_iter().collect());

/// Canonical line flag for a lower-case UDMF key.
pub fn udmf_line_flag(key: &str) -> Option<LineFlags> {
    LINE_FLAGS_BY_KEY.get(key).copied()
}

/// Canonical thing flag for a lower-case UDMF key.
pub fn udmf_thing_flag(key: &str) -> Option<ThingFlags> {
    THING_FLAGS_BY_KEY.get(key).copied()
}
