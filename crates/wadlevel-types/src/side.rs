use serde::Serialize;

/// Texture name used when a side has no texture in a slot.
pub const NO_TEXTURE: &str = "-";

/// A sidedef: the textured face of a line, belonging to one sector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Side {
    /// Index into [`Level::sectors`](crate::Level::sectors). Not bounds-checked.
    pub sector: u32,
    pub texture_upper: String,
    pub texture_mid: String,
    pub texture_lower: String,
    pub texture_x: i32,
    pub texture_y: i32,
}

impl Side {
    pub fn has_texture(name: &str) -> bool {
        !name.is_empty() && name != NO_TEXTURE
    }
}
