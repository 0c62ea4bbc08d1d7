//! Shared in-memory representation of Doom-engine levels.
//!
//! Both the binary and the UDMF decoders produce a [`Level`]; nothing in
//! this crate depends on how a level was stored.

pub mod level;
pub mod line;
pub mod namespace;
pub mod sector;
pub mod side;
pub mod thing;
pub mod vertex;

pub use level::Level;
pub use line::{Line, LineFlags};
pub use namespace::{LevelFormat, LevelNamespace};
pub use sector::{DEFAULT_LIGHT, Sector};
pub use side::{NO_TEXTURE, Side};
pub use thing::{Thing, ThingFlags};
pub use vertex::Vertex;
