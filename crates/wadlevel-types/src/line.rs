use bitflags::bitflags;
use serde::Serialize;

bitflags! {
    /// Canonical linedef flags, independent of the dialect a level was
    /// authored for. Binary flag words and UDMF boolean keys are both
    /// translated onto this set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct LineFlags: u32 {
        const BLOCK             = 0x0000_0001;
        const BLOCK_MONSTER     = 0x0000_0002;
        const TWO_SIDED         = 0x0000_0004;
        const UNPEG_TOP         = 0x0000_0008;
        const UNPEG_BOTTOM      = 0x0000_0010;
        const SECRET            = 0x0000_0020;
        const BLOCK_SOUND       = 0x0000_0040;
        const HIDDEN            = 0x0000_0080;
        const MAPPED            = 0x0000_0100;

        // Boom
        const PASS_USE          = 0x0000_0200;

        // Strife
        const JUMP_OVER         = 0x0000_0400;
        const BLOCK_FLOAT       = 0x0000_0800;
        const TRANSLUCENT25     = 0x0000_1000;
        const TRANSLUCENT75     = 0x0000_2000;

        // Eternity
        const WALKABLE          = 0x0000_4000;

        // Hexen activation
        const REPEATS           = 0x0000_8000;
        const PLAYER_CROSS      = 0x0001_0000;
        const PLAYER_USE        = 0x0002_0000;
        const PLAYER_PUSH       = 0x0004_0000;
        const MONSTER_CROSS     = 0x0008_0000;
        const MONSTER_USE       = 0x0010_0000;
        const MONSTER_PUSH      = 0x0020_0000;
        const MISSILE_CROSS     = 0x0040_0000;
        const IMPACT            = 0x0080_0000;

        // ZDoom
        const MONSTER_ACTIVATES = 0x0100_0000;
        const BLOCK_PLAYERS     = 0x0200_0000;
        const BLOCK_ALL         = 0x0400_0000;
    }
}

/// A linedef between two vertices, with up to two sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    /// Index into [`Level::vertices`](crate::Level::vertices). Not bounds-checked.
    pub vertex_start: u32,
    pub vertex_end: u32,
    /// Index into [`Level::sides`](crate::Level::sides), `None` when absent.
    pub side_front: Option<u32>,
    pub side_back: Option<u32>,
    pub flags: LineFlags,
    /// Action special.
    pub special: i32,
    /// Line ids. Never empty: binary lines carry their single tag, UDMF lines
    /// a primary id followed by any `moreids`.
    pub ids: Vec<i32>,
    pub args: [i32; 5],
    /// UDMF string override of `args[0]`.
    pub arg0str: Option<String>,
}

impl Line {
    /// The primary tag or id.
    pub fn tag(&self) -> i32 {
        self.ids.first().copied().unwrap_or(0)
    }

    pub fn is_two_sided(&self) -> bool {
        self.side_back.is_some()
    }
}
