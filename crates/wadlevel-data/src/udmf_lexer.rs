//! Token table for UDMF `TEXTMAP` text.

use std::fmt;
use std::sync::LazyLock;

use crate::lexer::{LexError, Located, Lexer, position_of};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Identifier(String),
    LBrace,
    RBrace,
    Assign,
    Semicolon,
    Integer(i64),
    Float(f64),
    /// A bare word that is not an identifier, e.g. `-ABC`.
    Keyword(String),
    /// Quoted string with escapes resolved.
    String(String),
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Identifier(s) => write!(f, "identifier `{s}`"),
            Token::LBrace => f.write_str("`{`"),
            Token::RBrace => f.write_str("`}`"),
            Token::Assign => f.write_str("`=`"),
            Token::Semicolon => f.write_str("`;`"),
            Token::Integer(n) => write!(f, "integer {n}"),
            Token::Float(x) => write!(f, "float {x}"),
            Token::Keyword(s) => write!(f, "keyword `{s}`"),
            Token::String(s) => write!(f, "string {s:?}"),
            Token::Eof => f.write_str("end of input"),
        }
    }
}

static UDMF_LEXER: LazyLock<Lexer<Token>> =
    LazyLock::new(|| build().expect("UDMF token rules are valid regexes"));

fn build() -> Result<Lexer<Token>, regex::Error> {
    Lexer::new()
        .skip(r"\s+")?
        .skip(r"//[^\n]*")?
        .skip(r"(?s)/\*.*?\*/")?
        .rule(r"=", |_| Ok(Token::Assign))?
        .rule(r";", |_| Ok(Token::Semicolon))?
        .rule(r"\{", |_| Ok(Token::LBrace))?
        .rule(r"\}", |_| Ok(Token::RBrace))?
        .rule(r"[A-Za-z_][A-Za-z0-9_]*", |s| Ok(Token::Identifier(s.to_string())))?
        .rule(r"[+-]?[0-9]+\.[0-9]*(?:[eE][+-]?[0-9]+)?", parse_float)?
        .rule(r"[+-]?0[xX][0-9A-Fa-f]+", |s| parse_radix(s, 16))?
        .rule(r"[+-]?0[0-7]+", |s| parse_radix(s, 8))?
        .rule(r"[+-]?(?:[1-9][0-9]*|0)", |s| parse_radix(s, 10))?
        .rule(r#"[^{}();"'\n\t ]+"#, |s| Ok(Token::Keyword(s.to_string())))?
        .rule(r#""(?:[^"\\]|\\.)*""#, |s| Ok(Token::String(unescape(s))))
}

/// Tokenize `input`, appending a final [`Token::Eof`].
pub fn lex(input: &str) -> Result<Vec<Located<Token>>, LexError> {
    let mut tokens = UDMF_LEXER.tokenize(input)?;
    let (line, col) = position_of(input, input.len());
    tokens.push(Located {
        value: Token::Eof,
        offset: input.len(),
        line,
        col,
    });
    Ok(tokens)
}

fn parse_float(s: &str) -> Result<Token, String> {
    s.parse()
        .map(Token::Float)
        .map_err(|e| format!("invalid float `{s}`: {e}"))
}

fn parse_radix(s: &str, radix: u32) -> Result<Token, String> {
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits = match radix {
        16 => &digits[2..],
        8 => &digits[1..],
        _ => digits,
    };
    let value = i64::from_str_radix(digits, radix)
        .map_err(|e| format!("invalid integer `{s}`: {e}"))?;
    Ok(Token::Integer(if negative { -value } else { value }))
}

fn unescape(quoted: &str) -> String {
    let inner = &quoted[1..quoted.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(ch);
        }
    }
    out
}
