use std::rc::Rc;

use tracing::trace;

use crate::{
    errors::errors::{Error, ErrorImpl, MAX_IDENTIFIER_LEN, MAX_INTEGER_LEN},
    Position, Span, MK_SPAN, MK_TOKEN,
};

use super::{
    cursor::Cursor,
    tokens::{is_reserved, Token, TokenKind},
};

/// What a token can start with. Whitespace is skipped before classifying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Slash,
    Terminator,
    Bracket(TokenKind),
    Letter,
    OperatorStart,
    Digit,
    Quote,
    Other,
}

fn classify(byte: u8) -> CharClass {
    match byte {
        b'/' => CharClass::Slash,
        b';' => CharClass::Terminator,
        b'(' => CharClass::Bracket(TokenKind::LeftParen),
        b')' => CharClass::Bracket(TokenKind::RightParen),
        b'[' => CharClass::Bracket(TokenKind::LeftBracket),
        b']' => CharClass::Bracket(TokenKind::RightBracket),
        b'{' => CharClass::Bracket(TokenKind::LeftBrace),
        b'}' => CharClass::Bracket(TokenKind::RightBrace),
        b'+' | b'-' | b'*' | b':' => CharClass::OperatorStart,
        b'"' => CharClass::Quote,
        b if b.is_ascii_alphabetic() => CharClass::Letter,
        b if b.is_ascii_digit() => CharClass::Digit,
        _ => CharClass::Other,
    }
}

/// Space, tab, newline, vertical tab, form feed and carriage return.
fn is_whitespace(byte: u8) -> bool {
    byte.is_ascii_whitespace() || byte == 0x0b
}

fn is_identifier_continue(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

fn lexeme(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[derive(Debug, Clone)]
enum ScanState {
    Scanning,
    Finished,
    Failed(Error),
}

pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    file: Rc<String>,
    state: ScanState,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a [u8], file: Option<String>) -> Lexer<'a> {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            cursor: Cursor::new(source),
            file: file_name,
            state: ScanState::Scanning,
        }
    }

    /// Scans the next token.
    ///
    /// Whitespace and comments are consumed internally, so each call yields
    /// exactly one token or one error. Once EndOfInput has been returned it
    /// is returned again; once an error has been returned every later call
    /// returns that same error.
    pub fn next_token(&mut self) -> Result<Token, Error> {
        match &self.state {
            ScanState::Failed(error) => return Err(error.clone()),
            ScanState::Finished => return Ok(self.end_of_input()),
            ScanState::Scanning => {}
        }

        match self.scan_token() {
            Ok(token) => {
                if token.kind == TokenKind::EndOfInput {
                    self.state = ScanState::Finished;
                }
                trace!(kind = %token.kind, value = %token.value, "scanned token");
                Ok(token)
            }
            Err(error) => {
                trace!(error = %error, "scan failed");
                self.state = ScanState::Failed(error.clone());
                Err(error)
            }
        }
    }

    fn scan_token(&mut self) -> Result<Token, Error> {
        loop {
            self.cursor.advance_while(is_whitespace);

            let start = self.cursor.position();
            let Some(byte) = self.cursor.peek() else {
                return Ok(self.end_of_input());
            };

            return match classify(byte) {
                CharClass::Slash => {
                    if self.cursor.peek_next() == Some(b'*') {
                        self.skip_comment(start)?;
                        continue;
                    }
                    self.cursor.advance();
                    Ok(self.token(TokenKind::Operator, b"/", start))
                }
                CharClass::Terminator => {
                    self.cursor.advance();
                    Ok(self.token(TokenKind::EndOfStatement, b"", start))
                }
                CharClass::Bracket(kind) => {
                    self.cursor.advance();
                    Ok(self.token(kind, b"", start))
                }
                CharClass::Letter => self.scan_word(start),
                CharClass::OperatorStart => self.scan_operator(start),
                CharClass::Digit => self.scan_integer(start),
                CharClass::Quote => self.scan_string(start),
                CharClass::Other => {
                    self.cursor.advance();
                    Err(self.error(
                        ErrorImpl::UnrecognizedCharacter {
                            character: std::ascii::escape_default(byte).to_string(),
                        },
                        start,
                    ))
                }
            };
        }
    }

    /// Consumes `/* ... */`. Comments do not nest: the first `*/` closes.
    fn skip_comment(&mut self, start: usize) -> Result<(), Error> {
        self.cursor.advance();
        self.cursor.advance();

        loop {
            match self.cursor.advance() {
                None => return Err(self.error(ErrorImpl::UnterminatedComment, start)),
                Some(b'*') if self.cursor.advance_if(b'/') => return Ok(()),
                Some(_) => {}
            }
        }
    }

    fn scan_word(&mut self, start: usize) -> Result<Token, Error> {
        let word = self.cursor.advance_while(is_identifier_continue);

        if word.len() > MAX_IDENTIFIER_LEN {
            let identifier = lexeme(word);
            return Err(self.error(ErrorImpl::IdentifierTooLong { identifier }, start));
        }

        let kind = if is_reserved(&lexeme(word)) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };

        Ok(self.token(kind, word, start))
    }

    /// Reads two bytes and pushes the second back when only the
    /// one-character operator matches.
    fn scan_operator(&mut self, start: usize) -> Result<Token, Error> {
        let first = self.cursor.advance();
        let second = self.cursor.advance();

        let value: &[u8] = match (first, second) {
            (Some(b'+'), Some(b'+')) => b"++",
            (Some(b'-'), Some(b'-')) => b"--",
            (Some(b':'), Some(b'=')) => b":=",
            (Some(b':'), _) => {
                return Err(self.error(ErrorImpl::InvalidAssignmentOperator, start));
            }
            (Some(b'+'), _) => b"+",
            (Some(b'-'), _) => b"-",
            _ => b"*",
        };

        if second.is_some() && value.len() == 1 {
            self.cursor.push_back();
        }

        Ok(self.token(TokenKind::Operator, value, start))
    }

    fn scan_integer(&mut self, start: usize) -> Result<Token, Error> {
        let digits = self.cursor.advance_while(|b| b.is_ascii_digit());

        if digits.len() > MAX_INTEGER_LEN {
            let integer = lexeme(digits);
            return Err(self.error(ErrorImpl::IntegerTooLong { integer }, start));
        }

        if matches!(self.cursor.peek(), Some(b) if b.is_ascii_alphabetic() || b == b'_') {
            self.cursor.advance_while(is_identifier_continue);
            let text = lexeme(self.cursor.slice_from(start));
            return Err(self.error(ErrorImpl::IdentifierStartsWithDigit { lexeme: text }, start));
        }

        Ok(self.token(TokenKind::IntConst, digits, start))
    }

    /// Passes every byte up to the next `"` through verbatim.
    fn scan_string(&mut self, start: usize) -> Result<Token, Error> {
        self.cursor.advance();
        let content = self.cursor.advance_while(|b| b != b'"');

        if !self.cursor.advance_if(b'"') {
            return Err(self.error(ErrorImpl::UnterminatedString, start));
        }

        Ok(self.token(TokenKind::StringConst, content, start))
    }

    fn token(&self, kind: TokenKind, raw: &[u8], start: usize) -> Token {
        MK_TOKEN!(kind, raw, MK_SPAN!(self, start, self.cursor.position()))
    }

    fn end_of_input(&self) -> Token {
        let end = self.cursor.position();
        self.token(TokenKind::EndOfInput, b"", end)
    }

    fn error(&self, error_impl: ErrorImpl, start: usize) -> Error {
        Error::new(error_impl, Position::new(start, Rc::clone(&self.file)))
    }
}

/// Yields tokens up to, but not including, EndOfInput. A scan error is
/// yielded once and ends the iteration.
impl Iterator for Lexer<'_> {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if !matches!(self.state, ScanState::Scanning) {
            return None;
        }

        match self.next_token() {
            Ok(token) if token.kind == TokenKind::EndOfInput => None,
            result => Some(result),
        }
    }
}

impl std::iter::FusedIterator for Lexer<'_> {}

pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source.as_bytes(), file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token()?;
        let done = token.kind == TokenKind::EndOfInput;
        tokens.push(token);

        if done {
            return Ok(tokens);
        }
    }
}
