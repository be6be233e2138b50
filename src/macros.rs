//! Utility macros for the scanner.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_SPAN!` - Creates a Span between two byte offsets of the lexer's file

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$raw` - The lexeme bytes; the string value is derived from them
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::IntConst, b"42", span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $raw:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: String::from_utf8_lossy($raw).into_owned(),
            raw: $raw.to_vec(),
            span: $span,
        }
    };
}

/// Creates a Span from `$start` to `$end` in the file the lexer is reading.
///
/// ```ignore
/// let span = MK_SPAN!(lexer, start, lexer.cursor.position());
/// ```
#[macro_export]
macro_rules! MK_SPAN {
    ($lexer:expr, $start:expr, $end:expr) => {
        Span {
            start: Position::new($start, Rc::clone(&$lexer.file)),
            end: Position::new($end, Rc::clone(&$lexer.file)),
        }
    };
}
