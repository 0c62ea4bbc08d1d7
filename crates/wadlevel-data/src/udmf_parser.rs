//! Parser for UDMF `TEXTMAP` text.
//!
//! A `TEXTMAP` is a flat list of global assignments (`namespace = "zdoom";`)
//! and entity blocks (`thing { x = 0.0; ... }`). Blocks are read generically
//! into key/value fields first, then built into level entities once the
//! namespace is known, since line ids default differently in vanilla
//! namespaces.

use winnow::ascii::{dec_int, multispace0, multispace1};
use winnow::Parser as _;
use winnow::combinator::{delimited, separated};
use winnow::error::ModalResult;

use wadlevel_types::{
    DEFAULT_LIGHT, Level, LevelFormat, LevelNamespace, Line, LineFlags, NO_TEXTURE, Sector, Side,
    Thing, ThingFlags, Vertex,
};

use crate::flags::{udmf_line_flag, udmf_thing_flag};
use crate::lexer::{LexError, Located};
use crate::udmf_lexer::{Token, lex};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}, col {col}: {msg}")]
    Syntax { line: usize, col: usize, msg: String },
    #[error("line {line}, col {col}: {block} is missing required field `{field}`")]
    MissingField {
        line: usize,
        col: usize,
        block: &'static str,
        field: &'static str,
    },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            ParseError::Syntax { line, .. } | ParseError::MissingField { line, .. } => *line,
        }
    }

    pub fn col(&self) -> usize {
        match self {
            ParseError::Syntax { col, .. } | ParseError::MissingField { col, .. } => *col,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UdmfError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl UdmfError {
    pub fn line(&self) -> usize {
        match self {
            UdmfError::Lex(e) => e.line(),
            UdmfError::Parse(e) => e.line(),
        }
    }

    pub fn col(&self) -> usize {
        match self {
            UdmfError::Lex(e) => e.col(),
            UdmfError::Parse(e) => e.col(),
        }
    }
}

/// Entities read from a `TEXTMAP`, in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UdmfMap {
    /// The declared namespace, verbatim.
    pub namespace: Option<String>,
    pub vertices: Vec<Vertex>,
    pub lines: Vec<Line>,
    pub sides: Vec<Side>,
    pub sectors: Vec<Sector>,
    pub things: Vec<Thing>,
}

impl UdmfMap {
    pub fn level_namespace(&self) -> LevelNamespace {
        LevelNamespace::from_udmf(self.namespace.as_deref())
    }

    pub fn into_level(self, name: impl Into<String>) -> Level {
        Level {
            name: name.into(),
            namespace: self.level_namespace(),
            format: LevelFormat::Udmf,
            vertices: self.vertices,
            lines: self.lines,
            sides: self.sides,
            sectors: self.sectors,
            things: self.things,
        }
    }
}

/// Lex and parse a complete `TEXTMAP`.
pub fn parse_udmf(input: &str) -> Result<UdmfMap, UdmfError> {
    let tokens = lex(input)?;
    Ok(Parser::new(tokens).parse()?)
}

#[derive(Debug, Clone, PartialEq)]
enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Word(String),
}

#[derive(Debug, Clone)]
struct Field {
    key: String,
    value: Value,
    line: usize,
    col: usize,
}

impl Field {
    fn error(&self, msg: String) -> ParseError {
        ParseError::Syntax {
            line: self.line,
            col: self.col,
            msg,
        }
    }

    fn expected(&self, what: &str) -> ParseError {
        self.error(format!("`{}` expects {what}", self.key))
    }

    fn int(&self) -> Result<i32, ParseError> {
        match self.value {
            Value::Int(n) => i32::try_from(n)
                .map_err(|_| self.error(format!("`{}` is out of range: {n}", self.key))),
            _ => Err(self.expected("an integer")),
        }
    }

    fn index(&self) -> Result<u32, ParseError> {
        match self.value {
            Value::Int(n) => u32::try_from(n)
                .map_err(|_| self.error(format!("`{}` is not a valid index: {n}", self.key))),
            _ => Err(self.expected("an index")),
        }
    }

    /// Side references use any negative number for "no side".
    fn side_ref(&self) -> Result<Option<u32>, ParseError> {
        match self.value {
            Value::Int(n) if n < 0 => Ok(None),
            _ => self.index().map(Some),
        }
    }

    fn float(&self) -> Result<f64, ParseError> {
        match self.value {
            Value::Float(x) => Ok(x),
            Value::Int(n) => Ok(n as f64),
            _ => Err(self.expected("a number")),
        }
    }

    fn string(&self) -> Result<String, ParseError> {
        match &self.value {
            Value::Str(s) => Ok(s.clone()),
            _ => Err(self.expected("a string")),
        }
    }

    fn boolean(&self) -> Result<bool, ParseError> {
        match &self.value {
            Value::Word(w) if w.eq_ignore_ascii_case("true") => Ok(true),
            Value::Word(w) if w.eq_ignore_ascii_case("false") => Ok(false),
            _ => Err(self.expected("`true` or `false`")),
        }
    }

    fn ids(&self) -> Result<Vec<i32>, ParseError> {
        let text = self.string()?;
        id_list
            .parse(text.as_str())
            .map_err(|_| self.error(format!("`{}` is not a list of ids: {text:?}", self.key)))
    }
}

fn id_list(input: &mut &str) -> ModalResult<Vec<i32>> {
    delimited(
        multispace0,
        separated(0.., dec_int::<_, i32, _>, multispace1),
        multispace0,
    )
    .parse_next(input)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Vertex,
    Linedef,
    Sidedef,
    Sector,
    Thing,
}

impl BlockKind {
    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "vertex" => Some(Self::Vertex),
            "linedef" => Some(Self::Linedef),
            "sidedef" => Some(Self::Sidedef),
            "sector" => Some(Self::Sector),
            "thing" => Some(Self::Thing),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Vertex => "vertex",
            Self::Linedef => "linedef",
            Self::Sidedef => "sidedef",
            Self::Sector => "sector",
            Self::Thing => "thing",
        }
    }
}

/// A `{ ... }` block; `line`/`col` locate its opening brace.
#[derive(Debug, Clone)]
struct Block {
    kind: BlockKind,
    line: usize,
    col: usize,
    fields: Vec<Field>,
}

impl Block {
    fn missing(&self, field: &'static str) -> ParseError {
        ParseError::MissingField {
            line: self.line,
            col: self.col,
            block: self.kind.name(),
            field,
        }
    }

    fn require(&self, key: &'static str) -> Result<&Field, ParseError> {
        self.fields
            .iter()
            .rev()
            .find(|f| f.key == key)
            .ok_or_else(|| self.missing(key))
    }

    /// `arg0`..`arg4` and `arg0str`, shared by things and lines.
    fn read_args(&self, args: &mut [i32; 5], arg0str: &mut Option<String>) -> Result<(), ParseError> {
        for field in &self.fields {
            match field.key.as_str() {
                "arg0" => args[0] = field.int()?,
                "arg1" => args[1] = field.int()?,
                "arg2" => args[2] = field.int()?,
                "arg3" => args[3] = field.int()?,
                "arg4" => args[4] = field.int()?,
                "arg0str" => *arg0str = Some(field.string()?),
                _ => {}
            }
        }
        Ok(())
    }

    fn into_vertex(self) -> Result<Vertex, ParseError> {
        Ok(Vertex::new(self.require("x")?.float()?, self.require("y")?.float()?))
    }

    fn into_thing(self) -> Result<Thing, ParseError> {
        let x = self.require("x")?.float()?;
        let y = self.require("y")?.float()?;
        let kind = self.require("type")?.int()?;

        let mut thing = Thing {
            x,
            y,
            z: 0.0,
            angle: 0,
            kind,
            flags: ThingFlags::empty(),
            id: 0,
            special: 0,
            args: [0; 5],
            arg0str: None,
        };
        self.read_args(&mut thing.args, &mut thing.arg0str)?;

        for field in &self.fields {
            match field.key.as_str() {
                "height" => thing.z = field.float()?,
                "angle" => thing.angle = field.int()?,
                "id" => thing.id = field.int()?,
                "special" => thing.special = field.int()?,
                key => {
                    if let Some(flag) = udmf_thing_flag(key) {
                        thing.flags.set(flag, field.boolean()?);
                    }
                }
            }
        }
        Ok(thing)
    }

    fn into_line(self, vanilla: bool) -> Result<Line, ParseError> {
        let vertex_start = self.require("v1")?.index()?;
        let vertex_end = self.require("v2")?.index()?;

        let mut line = Line {
            vertex_start,
            vertex_end,
            side_front: None,
            side_back: None,
            flags: LineFlags::empty(),
            special: 0,
            ids: vec![if vanilla { 0 } else { -1 }],
            args: [0; 5],
            arg0str: None,
        };
        self.read_args(&mut line.args, &mut line.arg0str)?;

        let mut more_ids = Vec::new();
        for field in &self.fields {
            match field.key.as_str() {
                "sidefront" => line.side_front = field.side_ref()?,
                "sideback" => line.side_back = field.side_ref()?,
                "special" => line.special = field.int()?,
                "id" => line.ids[0] = field.int()?,
                "moreids" => more_ids.extend(field.ids()?),
                key => {
                    if let Some(flag) = udmf_line_flag(key) {
                        line.flags.set(flag, field.boolean()?);
                    }
                }
            }
        }
        line.ids.extend(more_ids);
        Ok(line)
    }

    fn into_side(self) -> Result<Side, ParseError> {
        let mut side = Side {
            sector: self.require("sector")?.index()?,
            texture_upper: NO_TEXTURE.to_string(),
            texture_mid: NO_TEXTURE.to_string(),
            texture_lower: NO_TEXTURE.to_string(),
            texture_x: 0,
            texture_y: 0,
        };
        for field in &self.fields {
            match field.key.as_str() {
                "texturetop" => side.texture_upper = field.string()?,
                "texturemiddle" => side.texture_mid = field.string()?,
                "texturebottom" => side.texture_lower = field.string()?,
                "offsetx" => side.texture_x = field.int()?,
                "offsety" => side.texture_y = field.int()?,
                _ => {}
            }
        }
        Ok(side)
    }

    fn into_sector(self) -> Result<Sector, ParseError> {
        let mut sector = Sector {
            z_floor: 0,
            z_ceiling: 0,
            texture_floor: self.require("texturefloor")?.string()?,
            texture_ceiling: self.require("textureceiling")?.string()?,
            ids: vec![0],
            kind: 0,
            light: DEFAULT_LIGHT,
        };
        let mut more_ids = Vec::new();
        for field in &self.fields {
            match field.key.as_str() {
                "heightfloor" => sector.z_floor = field.int()?,
                "heightceiling" => sector.z_ceiling = field.int()?,
                "lightlevel" => sector.light = field.int()?,
                "special" => sector.kind = field.int()?,
                "id" => sector.ids[0] = field.int()?,
                "moreids" => more_ids.extend(field.ids()?),
                _ => {}
            }
        }
        sector.ids.extend(more_ids);
        Ok(sector)
    }
}

struct Parser {
    tokens: Vec<Located<Token>>,
    pos: usize,
    namespace: Option<String>,
    blocks: Vec<Block>,
}

impl Parser {
    fn new(tokens: Vec<Located<Token>>) -> Self {
        Self {
            tokens,
            pos: 0,
            namespace: None,
            blocks: Vec::new(),
        }
    }

    fn peek(&self) -> &Token {
        self.tokens
            .get(self.pos)
            .map(|t| &t.value)
            .unwrap_or(&Token::Eof)
    }

    /// Position of the current token, or of the end of input.
    fn here(&self) -> (usize, usize) {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|t| (t.line, t.col))
            .unwrap_or((1, 1))
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, expected: &Token) -> Result<(), ParseError> {
        let tok = self.peek();
        if std::mem::discriminant(tok) == std::mem::discriminant(expected) {
            self.advance();
            Ok(())
        } else {
            Err(self.err(&format!("expected {expected}, got {tok}")))
        }
    }

    fn err(&self, msg: &str) -> ParseError {
        let (line, col) = self.here();
        ParseError::Syntax {
            line,
            col,
            msg: msg.into(),
        }
    }

    fn parse(mut self) -> Result<UdmfMap, ParseError> {
        loop {
            let (line, col) = self.here();
            match self.advance() {
                Token::Eof => break,
                Token::Identifier(name) => {
                    let keyword = name.to_ascii_lowercase();
                    if keyword == "namespace" {
                        self.parse_namespace(line, col)?;
                    } else if let Some(kind) = BlockKind::from_keyword(&keyword) {
                        let block = self.parse_block(kind)?;
                        self.blocks.push(block);
                    } else {
                        self.skip_statement(&name)?;
                    }
                }
                other => {
                    return Err(ParseError::Syntax {
                        line,
                        col,
                        msg: format!("expected a block or assignment, got {other}"),
                    });
                }
            }
        }

        let vanilla = self
            .namespace
            .as_deref()
            .is_some_and(LevelNamespace::is_vanilla_udmf);

        let mut map = UdmfMap {
            namespace: self.namespace,
            ..UdmfMap::default()
        };
        for block in self.blocks {
            match block.kind {
                BlockKind::Vertex => map.vertices.push(block.into_vertex()?),
                BlockKind::Linedef => map.lines.push(block.into_line(vanilla)?),
                BlockKind::Sidedef => map.sides.push(block.into_side()?),
                BlockKind::Sector => map.sectors.push(block.into_sector()?),
                BlockKind::Thing => map.things.push(block.into_thing()?),
            }
        }
        Ok(map)
    }

    fn parse_namespace(&mut self, line: usize, col: usize) -> Result<(), ParseError> {
        if self.namespace.is_some() {
            return Err(ParseError::Syntax {
                line,
                col,
                msg: "namespace declared more than once".into(),
            });
        }
        self.expect(&Token::Assign)?;
        let namespace = match self.peek() {
            Token::String(namespace) => namespace.clone(),
            other => return Err(self.err(&format!("expected a namespace string, got {other}"))),
        };
        self.advance();
        self.namespace = Some(namespace);
        self.expect(&Token::Semicolon)
    }

    /// Global assignments and blocks this decoder has no use for.
    fn skip_statement(&mut self, name: &str) -> Result<(), ParseError> {
        log::debug!("skipping unknown UDMF statement `{name}`");
        match self.peek() {
            Token::Assign => {
                self.advance();
                self.parse_value()?;
                self.expect(&Token::Semicolon)
            }
            Token::LBrace => self.parse_fields().map(|_| ()),
            other => Err(self.err(&format!("expected `=` or `{{` after `{name}`, got {other}"))),
        }
    }

    fn parse_block(&mut self, kind: BlockKind) -> Result<Block, ParseError> {
        let (line, col) = self.here();
        let fields = self.parse_fields()?;
        Ok(Block {
            kind,
            line,
            col,
            fields,
        })
    }

    fn parse_fields(&mut self) -> Result<Vec<Field>, ParseError> {
        self.expect(&Token::LBrace)?;
        let mut fields = Vec::new();
        loop {
            let (line, col) = self.here();
            match self.peek() {
                Token::RBrace => {
                    self.advance();
                    return Ok(fields);
                }
                Token::Identifier(key) => {
                    let key = key.to_ascii_lowercase();
                    self.advance();
                    self.expect(&Token::Assign)?;
                    let value = self.parse_value()?;
                    self.expect(&Token::Semicolon)?;
                    fields.push(Field {
                        key,
                        value,
                        line,
                        col,
                    });
                }
                Token::Eof => return Err(self.err("unterminated block, expected `}`")),
                other => return Err(self.err(&format!("expected a key or `}}`, got {other}"))),
            }
        }
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        let value = match self.peek() {
            Token::Integer(n) => Value::Int(*n),
            Token::Float(x) => Value::Float(*x),
            Token::String(s) => Value::Str(s.clone()),
            Token::Identifier(w) | Token::Keyword(w) => Value::Word(w.clone()),
            other => return Err(self.err(&format!("expected a value, got {other}"))),
        };
        self.advance();
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> UdmfMap {
        parse_udmf(input).unwrap_or_else(|e| panic!("parse failed: {e}"))
    }

    fn parse_err(input: &str) -> ParseError {
        match parse_udmf(input) {
            Err(UdmfError::Parse(e)) => e,
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn thing_with_defaults() {
        let map = parse("namespace = \"zdoom\";\nthing { x = 32.0; y = -64.5; type = 3001; }");
        assert_eq!(map.namespace.as_deref(), Some("zdoom"));
        let thing = &map.things[0];
        assert_eq!((thing.x, thing.y, thing.z), (32.0, -64.5, 0.0));
        assert_eq!(thing.kind, 3001);
        assert_eq!(thing.angle, 0);
        assert_eq!(thing.id, 0);
        assert!(thing.flags.is_empty());
        assert_eq!(thing.args, [0; 5]);
        assert_eq!(thing.arg0str, None);
    }

    #[test]
    fn thing_fields_and_flags() {
        let map = parse(
            "thing { x = 0; y = 0; height = 24; angle = 90; type = 1; id = 7; special = 80; \
             arg0 = 1; arg4 = -2; arg0str = \"script\"; skill1 = true; ambush = true; \
             translucent = true; dm = false; }",
        );
        let thing = &map.things[0];
        assert_eq!(thing.z, 24.0);
        assert_eq!(thing.angle, 90);
        assert_eq!(thing.id, 7);
        assert_eq!(thing.special, 80);
        assert_eq!(thing.args, [1, 0, 0, 0, -2]);
        assert_eq!(thing.arg0str.as_deref(), Some("script"));
        assert_eq!(
            thing.flags,
            ThingFlags::SKILL_1 | ThingFlags::AMBUSH | ThingFlags::TRANSLUCENT
        );
    }

    #[test]
    fn line_ids_follow_namespace() {
        let line = "linedef { v1 = 0; v2 = 1; sidefront = 0; }";
        let vanilla = parse(&format!("namespace = \"doom\";\n{line}"));
        assert_eq!(vanilla.lines[0].ids, vec![0]);

        let extended = parse(&format!("namespace = \"zdoom\";\n{line}"));
        assert_eq!(extended.lines[0].ids, vec![-1]);

        let undeclared = parse(line);
        assert_eq!(undeclared.lines[0].ids, vec![-1]);
        assert_eq!(undeclared.level_namespace(), LevelNamespace::ZDoom);
    }

    #[test]
    fn line_fields() {
        let map = parse(
            "namespace = \"hexen\";\n\
             linedef { v1 = 3; v2 = 4; sidefront = 1; sideback = 2; special = 70; \
             id = 5; moreids = \" 6 7  \"; twosided = true; translucent = true; \
             playeruse = true; repeatspecial = true; dontdraw = true; }",
        );
        let line = &map.lines[0];
        assert_eq!((line.vertex_start, line.vertex_end), (3, 4));
        assert_eq!((line.side_front, line.side_back), (Some(1), Some(2)));
        assert_eq!(line.special, 70);
        assert_eq!(line.ids, vec![5, 6, 7]);
        assert_eq!(
            line.flags,
            LineFlags::TWO_SIDED
                | LineFlags::TRANSLUCENT75
                | LineFlags::PLAYER_USE
                | LineFlags::REPEATS
                | LineFlags::HIDDEN
        );
    }

    #[test]
    fn negative_side_reference_is_none() {
        let map = parse("linedef { v1 = 0; v2 = 1; sidefront = 0; sideback = -1; }");
        assert_eq!(map.lines[0].side_back, None);
        assert!(!map.lines[0].is_two_sided());
    }

    #[test]
    fn sector_and_side_defaults() {
        let map = parse(
            "sector { texturefloor = \"FLAT1\"; textureceiling = \"CEIL3_5\"; }\n\
             sidedef { sector = 0; texturemiddle = \"STARTAN3\"; }",
        );
        let sector = &map.sectors[0];
        assert_eq!((sector.z_floor, sector.z_ceiling), (0, 0));
        assert_eq!(sector.light, DEFAULT_LIGHT);
        assert_eq!(sector.ids, vec![0]);
        assert_eq!(sector.kind, 0);

        let side = &map.sides[0];
        assert_eq!(side.sector, 0);
        assert_eq!(side.texture_mid, "STARTAN3");
        assert_eq!(side.texture_upper, NO_TEXTURE);
        assert_eq!(side.texture_lower, NO_TEXTURE);
        assert_eq!((side.texture_x, side.texture_y), (0, 0));
    }

    #[test]
    fn sector_fields() {
        let map = parse(
            "sector { heightfloor = -16; heightceiling = 128; texturefloor = \"F\"; \
             textureceiling = \"C\"; lightlevel = 192; special = 9; id = 3; moreids = \"4\"; }",
        );
        let sector = &map.sectors[0];
        assert_eq!((sector.z_floor, sector.z_ceiling), (-16, 128));
        assert_eq!(sector.light, 192);
        assert_eq!(sector.kind, 9);
        assert_eq!(sector.ids, vec![3, 4]);
    }

    #[test]
    fn keys_are_case_insensitive() {
        let map = parse("Vertex { X = 1.0; Y = 2.0; }");
        assert_eq!(map.vertices, vec![Vertex::new(1.0, 2.0)]);
    }

    #[test]
    fn unknown_keys_and_statements_are_skipped() {
        let map = parse(
            "namespace = \"zdoom\";\nversion = 1.1;\nfoo { bar = baz; }\n\
             vertex { x = 0.0; y = 0.0; comment = \"corner\"; user_thing = 5; }",
        );
        assert_eq!(map.vertices.len(), 1);
    }

    #[test]
    fn missing_thing_type_points_at_block() {
        let err = parse_err("namespace = \"doom\";\nthing\n{\n  x = 0.0;\n  y = 0.0;\n}");
        assert_eq!(
            err,
            ParseError::MissingField {
                line: 3,
                col: 1,
                block: "thing",
                field: "type",
            }
        );
        assert_eq!(err.to_string(), "line 3, col 1: thing is missing required field `type`");
    }

    #[test]
    fn thing_without_coordinates_points_at_block() {
        let err = parse_err("namespace = \"zdoom\";\nthing // 0\n{\n  type = 1;\n}\n");
        assert_eq!(
            err,
            ParseError::MissingField {
                line: 3,
                col: 1,
                block: "thing",
                field: "x",
            }
        );

        let err = parse_err("thing { type=1; }");
        assert!(matches!(err, ParseError::MissingField { field: "x", .. }));
        assert_eq!((err.line(), err.col()), (1, 7));
    }

    #[test]
    fn mandatory_fields() {
        assert!(matches!(
            parse_err("vertex { x = 0.0; }"),
            ParseError::MissingField { field: "y", .. }
        ));
        assert!(matches!(
            parse_err("linedef { v1 = 0; }"),
            ParseError::MissingField { field: "v2", .. }
        ));
        assert!(matches!(
            parse_err("sector { texturefloor = \"F\"; }"),
            ParseError::MissingField { field: "textureceiling", .. }
        ));
        assert!(matches!(
            parse_err("sidedef { offsetx = 1; }"),
            ParseError::MissingField { field: "sector", .. }
        ));
    }

    #[test]
    fn flag_value_must_be_boolean() {
        let err = parse_err("thing { x = 0; y = 0; type = 1; ambush = 1; }");
        assert_eq!((err.line(), err.col()), (1, 33));
    }

    #[test]
    fn missing_semicolon() {
        let err = parse_err("vertex {\n  x = 0.0\n  y = 0.0;\n}");
        assert_eq!((err.line(), err.col()), (3, 3));
    }

    #[test]
    fn unterminated_block() {
        let err = parse_err("vertex { x = 0.0; y = 0.0;");
        assert!(err.to_string().contains("unterminated block"));
    }

    #[test]
    fn duplicate_namespace() {
        let err = parse_err("namespace = \"doom\";\nnamespace = \"zdoom\";");
        assert_eq!((err.line(), err.col()), (2, 1));
    }

    #[test]
    fn namespace_must_be_a_string() {
        let err = parse_err("namespace = doom;");
        assert_eq!((err.line(), err.col()), (1, 13));
    }

    #[test]
    fn lex_errors_pass_through() {
        match parse_udmf("vertex { x = 0.0; y = 0.0; }\n\"open") {
            Err(UdmfError::Lex(e)) => assert_eq!((e.line(), e.col()), (2, 1)),
            other => panic!("expected a lex error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_moreids() {
        let err = parse_err("linedef { v1 = 0; v2 = 1; moreids = \"1 x\"; }");
        assert!(err.to_string().contains("moreids"));
    }

    #[test]
    fn empty_input_is_an_empty_map() {
        assert_eq!(parse(""), UdmfMap::default());
    }
}
