//! Reader for the fixed-width Doom and Hexen level lumps.
//!
//! Every lump is a packed array of little-endian records. A lump whose
//! length is not a multiple of the record size is read up to the last whole
//! record; a missing lump reads as empty.

use wadlevel_types::{
    Level, LevelFormat, LevelNamespace, Line, Sector, Side, Thing, Vertex,
};

use crate::decode::decode_8bit;
use crate::flags::{map_line_flags, map_thing_flags};
use crate::level_finder::LevelData;

pub const VERTEX_SIZE: usize = 4;
pub const DOOM_LINE_SIZE: usize = 14;
pub const HEXEN_LINE_SIZE: usize = 16;
pub const SIDE_SIZE: usize = 30;
pub const SECTOR_SIZE: usize = 26;
pub const DOOM_THING_SIZE: usize = 10;
pub const HEXEN_THING_SIZE: usize = 20;

/// Side reference meaning "no side".
const NO_SIDE: u16 = 0xFFFF;

#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("{lump}: unexpected end of data at offset {offset}")]
    UnexpectedEof { lump: &'static str, offset: usize },
}

/// Cursor for reading little-endian binary data.
struct Reader<'a> {
    lump: &'static str,
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(lump: &'static str, data: &'a [u8]) -> Self {
        Self { lump, data, pos: 0 }
    }

    fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], ReadError> {
        let Some(slice) = self.data.get(self.pos..self.pos + n) else {
            return Err(ReadError::UnexpectedEof {
                lump: self.lump,
                offset: self.pos,
            });
        };
        self.pos += n;
        Ok(slice)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], ReadError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    fn read_u8(&mut self) -> Result<u8, ReadError> {
        Ok(self.read_bytes(1)?[0])
    }

    fn read_i16(&mut self) -> Result<i16, ReadError> {
        Ok(i16::from_le_bytes(self.read_array()?))
    }

    fn read_u16(&mut self) -> Result<u16, ReadError> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// An 8-byte, NUL-padded name.
    fn read_name(&mut self) -> Result<String, ReadError> {
        let raw = self.read_bytes(8)?;
        let len = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        Ok(decode_8bit(&raw[..len]))
    }

    fn read_side_ref(&mut self) -> Result<Option<u32>, ReadError> {
        let value = self.read_u16()?;
        Ok((value != NO_SIDE).then_some(u32::from(value)))
    }

    fn read_args(&mut self) -> Result<[i32; 5], ReadError> {
        let mut args = [0; 5];
        for arg in &mut args {
            *arg = i32::from(self.read_u8()?);
        }
        Ok(args)
    }
}

/// Decode every whole `size`-byte record of `data`.
fn read_records<T>(
    lump: &'static str,
    data: &[u8],
    size: usize,
    mut decode: impl FnMut(&mut Reader<'_>) -> Result<T, ReadError>,
) -> Result<Vec<T>, ReadError> {
    let records = data.chunks_exact(size);
    let trailing = records.remainder().len();
    if trailing != 0 {
        log::warn!(
            "{lump}: {} bytes is not a multiple of the {size}-byte record size, ignoring the last {trailing} bytes",
            data.len()
        );
    }
    records
        .map(|record| decode(&mut Reader::new(lump, record)))
        .collect()
}

pub fn read_vertices(data: &[u8]) -> Result<Vec<Vertex>, ReadError> {
    read_records("VERTEXES", data, VERTEX_SIZE, |r| {
        Ok(Vertex::new(f64::from(r.read_i16()?), f64::from(r.read_i16()?)))
    })
}

pub fn read_lines(
    data: &[u8],
    format: LevelFormat,
    namespace: LevelNamespace,
) -> Result<Vec<Line>, ReadError> {
    if format == LevelFormat::Hexen {
        read_records("LINEDEFS", data, HEXEN_LINE_SIZE, |r| {
            let vertex_start = u32::from(r.read_u16()?);
            let vertex_end = u32::from(r.read_u16()?);
            let flags = map_line_flags(r.read_u16()?, namespace);
            let special = i32::from(r.read_u8()?);
            let args = r.read_args()?;
            Ok(Line {
                vertex_start,
                vertex_end,
                flags,
                special,
                args,
                side_front: r.read_side_ref()?,
                side_back: r.read_side_ref()?,
                ids: vec![0],
                arg0str: None,
            })
        })
    } else {
        read_records("LINEDEFS", data, DOOM_LINE_SIZE, |r| {
            let vertex_start = u32::from(r.read_u16()?);
            let vertex_end = u32::from(r.read_u16()?);
            let flags = map_line_flags(r.read_u16()?, namespace);
            let special = i32::from(r.read_u16()?);
            let tag = i32::from(r.read_u16()?);
            Ok(Line {
                vertex_start,
                vertex_end,
                flags,
                special,
                side_front: r.read_side_ref()?,
                side_back: r.read_side_ref()?,
                ids: vec![tag],
                args: [0; 5],
                arg0str: None,
            })
        })
    }
}

pub fn read_sides(data: &[u8]) -> Result<Vec<Side>, ReadError> {
    read_records("SIDEDEFS", data, SIDE_SIZE, |r| {
        let texture_x = i32::from(r.read_i16()?);
        let texture_y = i32::from(r.read_i16()?);
        let texture_upper = r.read_name()?;
        let texture_lower = r.read_name()?;
        let texture_mid = r.read_name()?;
        // Stored signed; a negative sector index wraps like the engine's does.
        let sector = u32::from(r.read_i16()? as u16);
        Ok(Side {
            sector,
            texture_upper,
            texture_mid,
            texture_lower,
            texture_x,
            texture_y,
        })
    })
}

pub fn read_sectors(data: &[u8]) -> Result<Vec<Sector>, ReadError> {
    read_records("SECTORS", data, SECTOR_SIZE, |r| {
        Ok(Sector {
            z_floor: i32::from(r.read_i16()?),
            z_ceiling: i32::from(r.read_i16()?),
            texture_floor: r.read_name()?,
            texture_ceiling: r.read_name()?,
            light: i32::from(r.read_i16()?),
            kind: i32::from(r.read_i16()?),
            ids: vec![i32::from(r.read_i16()?)],
        })
    })
}

pub fn read_things(
    data: &[u8],
    format: LevelFormat,
    namespace: LevelNamespace,
) -> Result<Vec<Thing>, ReadError> {
    if format == LevelFormat::Hexen {
        read_records("THINGS", data, HEXEN_THING_SIZE, |r| {
            let id = i32::from(r.read_u16()?);
            let x = f64::from(r.read_i16()?);
            let y = f64::from(r.read_i16()?);
            let z = f64::from(r.read_i16()?);
            let angle = i32::from(r.read_u16()?);
            let kind = i32::from(r.read_u16()?);
            let flags = map_thing_flags(r.read_u16()?, namespace);
            let special = i32::from(r.read_u8()?);
            let args = r.read_args()?;
            Ok(Thing {
                x,
                y,
                z,
                angle,
                kind,
                flags,
                id,
                special,
                args,
                arg0str: None,
            })
        })
    } else {
        read_records("THINGS", data, DOOM_THING_SIZE, |r| {
            Ok(Thing {
                x: f64::from(r.read_i16()?),
                y: f64::from(r.read_i16()?),
                z: 0.0,
                angle: i32::from(r.read_u16()?),
                kind: i32::from(r.read_u16()?),
                flags: map_thing_flags(r.read_u16()?, namespace),
                id: 0,
                special: 0,
                args: [0; 5],
                arg0str: None,
            })
        })
    }
}

/// Decode a DOOM or HEXEN format level.
pub fn read_level(level_data: &LevelData) -> Result<Level, ReadError> {
    let format = level_data.format;
    let namespace = level_data.binary_namespace();
    let lump = |name: &str| level_data.lump(name).unwrap_or_default();

    Ok(Level {
        name: level_data.name.clone(),
        namespace,
        format,
        vertices: read_vertices(lump("VERTEXES"))?,
        lines: read_lines(lump("LINEDEFS"), format, namespace)?,
        sides: read_sides(lump("SIDEDEFS"))?,
        sectors: read_sectors(lump("SECTORS"))?,
        things: read_things(lump("THINGS"), format, namespace)?,
    })
}
