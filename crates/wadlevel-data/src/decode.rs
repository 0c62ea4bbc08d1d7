//! Turning located [`LevelData`] into a [`Level`].

use encoding_rs::WINDOWS_1252;
use wadlevel_types::{Level, LevelFormat};

use crate::binary_reader::{ReadError, read_level};
use crate::level_finder::LevelData;
use crate::udmf_parser::{UdmfError, parse_udmf};

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("UDMF: {0}")]
    Udmf(#[from] UdmfError),
    #[error("binary level: {0}")]
    Binary(#[from] ReadError),
    #[error("level has no {0} lump")]
    MissingLump(&'static str),
}

/// Decode a level in whichever format its lumps are in.
pub fn decode_level(level_data: LevelData) -> Result<Level, DecodeError> {
    match level_data.format {
        LevelFormat::Doom | LevelFormat::Hexen => Ok(read_level(&level_data)?),
        LevelFormat::Udmf => {
            let textmap = level_data
                .lump("TEXTMAP")
                .ok_or(DecodeError::MissingLump("TEXTMAP"))?;
            let map = parse_udmf(&decode_8bit(textmap))?;
            Ok(map.into_level(level_data.name))
        }
    }
}

/// Decode 8-bit text as Windows-1252. Every byte maps to a character.
pub fn decode_8bit(bytes: &[u8]) -> String {
    let (text, _, _) = WINDOWS_1252.decode(bytes);
    text.into_owned()
}
