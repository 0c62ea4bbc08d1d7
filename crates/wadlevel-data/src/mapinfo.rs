//! Map titles from MAPINFO-family lumps.
//!
//! Only top-level `map` definitions are read:
//!
//! ```text
//! map MAP01 "Entryway"               // Hexen/ZDoom, old style
//! map MAP01 lookup "HUSTR_1" { ... } // ZMAPINFO, title from LANGUAGE
//! map 1 "WINNOWING HALL"             // Hexen, by map number
//! ```

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::Serialize;

use crate::archive::{ArchiveError, LumpSource};
use crate::decode::decode_8bit;
use crate::lexer::{LexError, Lexer};

/// Lump basenames searched for map information, most specific first.
pub const MAPINFO_LUMPS: [&str; 4] = ["ZMAPINFO", "EMAPINFO", "RMAPINFO", "MAPINFO"];

#[derive(Debug, thiserror::Error)]
pub enum MapInfoError {
    #[error("{0} is not supported")]
    Unsupported(String),
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Archive(#[from] ArchiveError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Identifier(String),
    String(String),
    Integer(i64),
    Float(f64),
    Assign,
    Comma,
    LBrace,
    RBrace,
}

/// A `map` definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapInfoEntry {
    /// Upper-cased level lump name.
    pub lump: String,
    pub title: Option<String>,
    /// The title is a LANGUAGE string id rather than the title itself.
    pub lookup: bool,
}

static MAPINFO_LEXER: LazyLock<Lexer<Token>> =
    LazyLock::new(|| build().expect("MAPINFO token rules are valid regexes"));

fn build() -> Result<Lexer<Token>, regex::Error> {
    Lexer::new()
        .skip(r"\s+")?
        .skip(r"(?:;|//)[^\n]*")?
        .skip(r"(?s)/\*.*?\*/")?
        .rule(r"=", |_| Ok(Token::Assign))?
        .rule(r",", |_| Ok(Token::Comma))?
        .rule(r"\{", |_| Ok(Token::LBrace))?
        .rule(r"\}", |_| Ok(Token::RBrace))?
        .rule(r"[+-]?(?:[0-9]+\.[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?", |s| {
            s.parse()
                .map(Token::Float)
                .map_err(|e| format!("invalid float `{s}`: {e}"))
        })?
        .rule(r"[+-]?(?:[1-9][0-9]*|0)", |s| {
            s.parse()
                .map(Token::Integer)
                .map_err(|e| format!("invalid integer `{s}`: {e}"))
        })?
        .rule(r"[?!$:`@A-Za-z0-9_\-]+", |s| Ok(Token::Identifier(s.to_string())))?
        // Unterminated strings run to the end of the text.
        .rule(r#""(?:[^"\\]|\\.)*(?:"|\z)"#, |s| {
            let inner = s.strip_prefix('"').unwrap_or(s);
            Ok(Token::String(inner.strip_suffix('"').unwrap_or(inner).to_string()))
        })
}

/// Decode raw MAPINFO bytes, dropping NUL, 0xFF and EOF (0x1A) bytes that
/// some editors leave behind.
pub fn clean_mapinfo(data: &[u8]) -> String {
    let cleaned: Vec<u8> = data
        .iter()
        .copied()
        .filter(|b| !matches!(b, 0x00 | 0xFF | 0x1A))
        .collect();
    decode_8bit(&cleaned)
}

pub fn parse_mapinfo(text: &str) -> Result<Vec<MapInfoEntry>, LexError> {
    let tokens = MAPINFO_LEXER.tokenize(text)?;
    let mut entries = Vec::new();
    let mut depth = 0usize;
    let mut i = 0;

    while i < tokens.len() {
        match &tokens[i].value {
            Token::LBrace => depth += 1,
            Token::RBrace => depth = depth.saturating_sub(1),
            Token::Identifier(keyword) if depth == 0 && keyword.eq_ignore_ascii_case("map") => {
                let lump = match tokens.get(i + 1).map(|t| &t.value) {
                    Some(Token::Identifier(name)) => name.to_uppercase(),
                    Some(Token::Integer(number)) => format!("MAP{number:02}"),
                    _ => {
                        i += 1;
                        continue;
                    }
                };
                i += 2;

                let lookup = matches!(
                    tokens.get(i).map(|t| &t.value),
                    Some(Token::Identifier(word)) if word.eq_ignore_ascii_case("lookup")
                );
                if lookup {
                    i += 1;
                }

                let title = match tokens.get(i).map(|t| &t.value) {
                    Some(Token::String(title)) => {
                        i += 1;
                        Some(title.clone())
                    }
                    _ => None,
                };

                entries.push(MapInfoEntry {
                    lump,
                    title,
                    lookup,
                });
                continue;
            }
            _ => {}
        }
        i += 1;
    }

    Ok(entries)
}

/// Read the first MAPINFO-family lump found in `source`, searching the
/// basenames in `lump_names` in order.
pub fn read_mapinfo(
    source: &dyn LumpSource,
    lump_names: &[String],
) -> Result<Option<Vec<MapInfoEntry>>, MapInfoError> {
    let Some((name, index)) = lump_names
        .iter()
        .find_map(|name| source.find_basename(name).map(|index| (name, index)))
    else {
        return Ok(None);
    };

    if name.eq_ignore_ascii_case("EMAPINFO") {
        return Err(MapInfoError::Unsupported(name.to_uppercase()));
    }

    let data = source.data(index)?;
    Ok(Some(parse_mapinfo(&clean_mapinfo(&data))?))
}

/// Literal titles by lump name. Later definitions replace earlier ones;
/// LANGUAGE lookups are left out.
pub fn map_titles(entries: &[MapInfoEntry]) -> BTreeMap<String, String> {
    entries
        .iter()
        .filter(|entry| !entry.lookup)
        .filter_map(|entry| Some((entry.lump.clone(), entry.title.clone()?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::MemoryArchive;

    fn entry(lump: &str, title: Option<&str>, lookup: bool) -> MapInfoEntry {
        MapInfoEntry {
            lump: lump.into(),
            title: title.map(str::to_string),
            lookup,
        }
    }

    #[test]
    fn old_style_definitions() {
        let text = "; Hexen\nmap 1 \"WINNOWING HALL\"\nwarptrans 1\nnext 2\nsky1 SKY2 0\n\n\
                    map map02 \"SEVEN PORTALS\"\ncluster 1\n";
        assert_eq!(
            parse_mapinfo(text).expect("parse"),
            vec![
                entry("MAP01", Some("WINNOWING HALL"), false),
                entry("MAP02", Some("SEVEN PORTALS"), false),
            ]
        );
    }

    #[test]
    fn zmapinfo_blocks() {
        let text = "// ZMAPINFO\n\
                    defaultmap { sky1 = \"SKY1\", 0.5 }\n\
                    map MAP01 lookup \"HUSTR_1\"\n{\n  next = \"MAP02\"\n  music = \"D_RUNNIN\"\n}\n\
                    map E1M1 \"Hangar\" { par = 30 }\n\
                    /* map MAP09 \"commented\" */\n";
        assert_eq!(
            parse_mapinfo(text).expect("parse"),
            vec![
                entry("MAP01", Some("HUSTR_1"), true),
                entry("E1M1", Some("Hangar"), false),
            ]
        );
    }

    #[test]
    fn nested_map_keywords_are_ignored() {
        let text = "episode MAP01 { map = \"x\" }\nmap MAP03\n";
        assert_eq!(
            parse_mapinfo(text).expect("parse"),
            vec![entry("MAP03", None, false)]
        );
    }

    #[test]
    fn unterminated_string_runs_to_end() {
        let entries = parse_mapinfo("map MAP01 \"Unfinished").expect("parse");
        assert_eq!(entries[0].title.as_deref(), Some("Unfinished"));
    }

    #[test]
    fn lex_error_has_position() {
        let err = parse_mapinfo("map MAP01 \"ok\"\n  #bad").expect_err("should fail");
        assert_eq!((err.line(), err.col()), (2, 3));
    }

    #[test]
    fn cleaning_strips_junk_bytes() {
        assert_eq!(clean_mapinfo(b"map\x00 E1M1\x1a\xff"), "map E1M1");
    }

    #[test]
    fn titles() {
        let titles = map_titles(&[
            entry("MAP01", Some("HUSTR_1"), true),
            entry("MAP02", Some("Old"), false),
            entry("MAP02", Some("New"), false),
            entry("MAP03", None, false),
        ]);
        assert_eq!(titles.len(), 1);
        assert_eq!(titles["MAP02"], "New");
    }

    #[test]
    fn lookup_order() {
        let names: Vec<String> = MAPINFO_LUMPS.iter().map(|s| s.to_string()).collect();
        let archive = MemoryArchive::new()
            .with_lump("MAPINFO", &b"map MAP01 \"Old\""[..])
            .with_lump("zmapinfo.txt", &b"map MAP01 \"New\""[..]);
        let entries = read_mapinfo(&archive, &names).expect("read").expect("found");
        assert_eq!(entries[0].title.as_deref(), Some("New"));

        assert!(read_mapinfo(&MemoryArchive::new(), &names).expect("read").is_none());
    }

    #[test]
    fn emapinfo_is_unsupported() {
        let names: Vec<String> = MAPINFO_LUMPS.iter().map(|s| s.to_string()).collect();
        let archive = MemoryArchive::new().with_lump("EMAPINFO", &b"[level info]"[..]);
        assert!(matches!(
            read_mapinfo(&archive, &names),
            Err(MapInfoError::Unsupported(name)) if name == "EMAPINFO"
        ));
    }
}
