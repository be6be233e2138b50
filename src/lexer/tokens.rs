use lazy_static::lazy_static;
use std::{collections::HashSet, fmt::Display};

use crate::Span;

lazy_static! {
    /// Reserved words, stored lowercase. Lookups go through `is_reserved`.
    pub static ref RESERVED_LOOKUP: HashSet<&'static str> = {
        let mut set = HashSet::new();
        set.insert("break");
        set.insert("case");
        set.insert("char");
        set.insert("const");
        set.insert("continue");
        set.insert("do");
        set.insert("else");
        set.insert("enum");
        set.insert("float");
        set.insert("for");
        set.insert("goto");
        set.insert("if");
        set.insert("int");
        set.insert("long");
        set.insert("record");
        set.insert("return");
        set.insert("static");
        set.insert("while");
        set
    };
}

/// Case-insensitive membership test against `RESERVED_LOOKUP`.
pub fn is_reserved(word: &str) -> bool {
    RESERVED_LOOKUP.contains(word.to_ascii_lowercase().as_str())
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Identifier,
    Keyword,
    IntConst,
    Operator,

    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,

    StringConst,
    EndOfStatement,
    EndOfInput,
}

impl TokenKind {
    /// Whether tokens of this kind carry their lexeme in `Token::value`.
    pub fn has_lexeme(&self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::Keyword
                | TokenKind::IntConst
                | TokenKind::Operator
                | TokenKind::StringConst
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    /// The lexeme as text. Invalid UTF-8 inside a string literal is shown
    /// as U+FFFD here; `raw` keeps the source bytes.
    pub value: String,
    /// The lexeme exactly as it appears in the source. For StringConst this
    /// is the content between the quotes.
    pub raw: Vec<u8>,
    pub span: Span,
}

impl Token {
    /// The output record for this token, one line without the newline.
    /// Lexemes are copied byte for byte. EndOfInput has no record.
    pub fn record(&self) -> Option<Vec<u8>> {
        let (prefix, suffix) = match self.kind {
            TokenKind::Identifier => ("Identifier(", ")"),
            TokenKind::Keyword => ("Keyword(", ")"),
            TokenKind::IntConst => ("IntConst(", ")"),
            TokenKind::Operator => ("Operator(", ")"),
            TokenKind::StringConst => ("StringConst(\"", "\")"),
            TokenKind::LeftParen => return Some(b"LeftPar".to_vec()),
            TokenKind::RightParen => return Some(b"RightPar".to_vec()),
            TokenKind::LeftBracket => return Some(b"LeftSquareBracket".to_vec()),
            TokenKind::RightBracket => return Some(b"RightSquareBracket".to_vec()),
            TokenKind::LeftBrace => return Some(b"LeftCurlyBracket".to_vec()),
            TokenKind::RightBrace => return Some(b"RightCurlyBracket".to_vec()),
            TokenKind::EndOfStatement => return Some(b"EndOfLine".to_vec()),
            TokenKind::EndOfInput => return None,
        };

        let mut record = Vec::with_capacity(prefix.len() + self.raw.len() + suffix.len());
        record.extend_from_slice(prefix.as_bytes());
        record.extend_from_slice(&self.raw);
        record.extend_from_slice(suffix.as_bytes());
        Some(record)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.kind.has_lexeme() {
            write!(f, "{} ({})", self.kind, self.value)
        } else {
            write!(f, "{} ()", self.kind)
        }
    }
}
