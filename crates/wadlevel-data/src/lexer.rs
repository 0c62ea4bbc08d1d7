//! Rule-table tokenizer shared by the UDMF and MAPINFO readers.
//!
//! A [`Lexer`] holds an ordered list of rules, each a regular expression
//! anchored at the current offset. Rules are tried in order and the first
//! one that matches wins, even when a later rule would match more text. This
//! is what separates `1.5` (float) from `1` (integer): the float rule is
//! listed first.

use regex::Regex;

/// A value tagged with the 1-based source position it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Located<T> {
    pub value: T,
    /// Byte offset into the input.
    pub offset: usize,
    pub line: usize,
    pub col: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("line {line}, col {col}: {msg}")]
    Error {
        line: usize,
        col: usize,
        msg: String,
    },
}

impl LexError {
    pub fn line(&self) -> usize {
        match self {
            LexError::Error { line, .. } => *line,
        }
    }

    pub fn col(&self) -> usize {
        match self {
            LexError::Error { col, .. } => *col,
        }
    }
}

/// Converts matched text into a token, or explains why it cannot.
pub type Transform<T> = fn(&str) -> Result<T, String>;

enum Action<T> {
    Skip,
    Emit(Transform<T>),
}

struct Rule<T> {
    regex: Regex,
    action: Action<T>,
}

pub struct Lexer<T> {
    rules: Vec<Rule<T>>,
}

impl<T> Default for Lexer<T> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<T> Lexer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule whose matches become tokens through `transform`.
    pub fn rule(mut self, pattern: &str, transform: Transform<T>) -> Result<Self, regex::Error> {
        self.rules.push(Rule {
            regex: anchored(pattern)?,
            action: Action::Emit(transform),
        });
        Ok(self)
    }

    /// Append a rule whose matches are consumed without producing a token.
    pub fn skip(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.rules.push(Rule {
            regex: anchored(pattern)?,
            action: Action::Skip,
        });
        Ok(self)
    }

    pub fn tokenize(&self, input: &str) -> Result<Vec<Located<T>>, LexError> {
        let mut tokens = Vec::new();
        let mut pos = Cursor::default();

        while pos.offset < input.len() {
            let rest = &input[pos.offset..];
            let matched = self.rules.iter().find_map(|rule| {
                rule.regex
                    .find(rest)
                    .filter(|m| !m.is_empty())
                    .map(|m| (rule, &rest[..m.end()]))
            });

            let Some((rule, text)) = matched else {
                let ch = rest.chars().next().unwrap_or_default();
                return Err(pos.error(format!("invalid token starting with {ch:?}")));
            };

            if let Action::Emit(transform) = rule.action {
                let value = transform(text).map_err(|msg| pos.error(msg))?;
                tokens.push(Located {
                    value,
                    offset: pos.offset,
                    line: pos.line,
                    col: pos.col,
                });
            }
            pos.advance(text);
        }

        Ok(tokens)
    }
}

/// 1-based `(line, col)` of a byte offset into `input`.
///
/// Columns count characters, not bytes. An offset past the end of the input
/// is clamped to the end.
pub fn position_of(input: &str, offset: usize) -> (usize, usize) {
    let mut end = offset.min(input.len());
    while !input.is_char_boundary(end) {
        end -= 1;
    }
    let mut pos = Cursor::default();
    pos.advance(&input[..end]);
    (pos.line, pos.col)
}

fn anchored(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"\A(?:{pattern})"))
}

#[derive(Debug, Clone, Copy)]
struct Cursor {
    offset: usize,
    line: usize,
    col: usize,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            offset: 0,
            line: 1,
            col: 1,
        }
    }
}

impl Cursor {
    fn advance(&mut self, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        self.offset += text.len();
    }

    fn error(&self, msg: impl Into<String>) -> LexError {
        LexError::Error {
            line: self.line,
            col: self.col,
            msg: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Tok {
        Int(i64),
        Float(f64),
        Word(String),
    }

    fn lexer() -> Lexer<Tok> {
        Lexer::new()
            .skip(r"\s+")
            .and_then(|l| l.rule(r"[0-9]+\.[0-9]*", |s| s.parse().map(Tok::Float).map_err(|e| format!("{e}"))))
            .and_then(|l| l.rule(r"[0-9]+", |s| s.parse().map(Tok::Int).map_err(|e| format!("{e}"))))
            .and_then(|l| l.rule(r"[a-z]+", |s| Ok(Tok::Word(s.to_string()))))
            .expect("valid rules")
    }

    #[test]
    fn first_listed_rule_wins() {
        let tokens = lexer().tokenize("12 3.5 abc").expect("lex");
        let values: Vec<_> = tokens.into_iter().map(|t| t.value).collect();
        assert_eq!(
            values,
            vec![Tok::Int(12), Tok::Float(3.5), Tok::Word("abc".into())]
        );
    }

    #[test]
    fn rule_order_beats_longest_match() {
        // The word rule comes last, so digits are split off first.
        let lexer = Lexer::new()
            .rule(r"[0-9]", |s| s.parse().map(Tok::Int).map_err(|e| format!("{e}")))
            .and_then(|l| l.rule(r"[0-9a-z]+", |s| Ok(Tok::Word(s.to_string()))))
            .expect("valid rules");
        let tokens = lexer.tokenize("1a").expect("lex");
        assert_eq!(tokens[0].value, Tok::Int(1));
        assert_eq!(tokens[1].value, Tok::Word("a".into()));
    }

    #[test]
    fn tokens_carry_line_and_column() {
        let tokens = lexer().tokenize("abc\n  12\n\n7").expect("lex");
        assert_eq!((tokens[0].line, tokens[0].col), (1, 1));
        assert_eq!((tokens[1].line, tokens[1].col), (2, 3));
        assert_eq!((tokens[2].line, tokens[2].col), (4, 1));
        assert_eq!(tokens[1].offset, 6);
    }

    #[test]
    fn unmatched_input_reports_position() {
        let err = lexer().tokenize("abc\n 1 ?").expect_err("should fail");
        assert_eq!((err.line(), err.col()), (2, 4));
        assert!(err.to_string().starts_with("line 2, col 4:"));
    }

    #[test]
    fn transform_failure_is_a_lex_error() {
        let err = lexer()
            .tokenize("99999999999999999999999")
            .expect_err("overflow");
        assert_eq!((err.line(), err.col()), (1, 1));
    }

    #[test]
    fn position_of_counts_characters() {
        let text = "ab\ncdé\nf";
        assert_eq!(position_of(text, 0), (1, 1));
        assert_eq!(position_of(text, 3), (2, 1));
        assert_eq!(position_of(text, text.len()), (3, 2));
        assert_eq!(position_of(text, 1000), (3, 2));
    }
}
