#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::errors::errors::{Error, ErrorTip};

pub mod driver;
pub mod errors;
pub mod lexer;
pub mod macros;

/// Byte offset into a source file, plus the file's name.
///
/// Offsets are stored as `u32`; anything past `u32::MAX` is clamped there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn new(offset: usize, file: Rc<String>) -> Self {
        Position(u32::try_from(offset).unwrap_or(u32::MAX), file)
    }

    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }

    pub fn is_null(&self) -> bool {
        self.1.as_str() == "<null>"
    }
}

#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Finds the line containing byte offset `position`.
///
/// Returns the 1-based line number, the line bytes and the byte offset
/// within the line. An offset equal to the source length maps onto the last
/// line, which is where end-of-input errors point.
pub fn get_line_at_position(content: &[u8], position: u32) -> Option<(usize, Vec<u8>, usize)> {
    let pos = position as usize;

    if pos > content.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in content.split_inclusive(|b| *b == b'\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) || (end == content.len() && pos == end) {
            let line_pos = pos - start;
            return Some((line_number, line.to_vec(), line_pos));
        }

        start = end;
        line_number += 1;
    }

    Some((line_number, Vec::new(), 0))
}

/// Renders `error` against the exact bytes that were scanned.
pub fn display_error(error: &Error, source: &[u8]) -> String {
    /*
        Error: message
        -> front.in
           |
        20 | a : b;
           | --^
    */

    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {} ({})\n", error.get_error_name(), error));
    } else {
        out.push_str(&format!("Error: {} ({})\n", error.get_error_name(), error.get_tip()));
    }

    let position = error.get_position();
    if position.is_null() {
        return out;
    }

    let Some((line, line_bytes, line_pos)) = get_line_at_position(source, position.0) else {
        return out;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    out.push_str(&format!("-> {}\n", position.1));
    out.push_str(&format!("{:>padding$}\n", "|"));

    let removed_whitespace = leading_whitespace(&line_bytes).min(line_pos);
    let line_text = String::from_utf8_lossy(&line_bytes[removed_whitespace..]);
    out.push_str(&format!("{} | {}\n", line_string, line_text.trim_end()));

    // Caret column counts displayed characters, not bytes.
    let column = String::from_utf8_lossy(&line_bytes[removed_whitespace..line_pos])
        .chars()
        .count();
    let arrows = column + 1;

    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    out
}

fn leading_whitespace(line: &[u8]) -> usize {
    line.iter().take_while(|b| **b == b' ' || **b == b'\t').count()
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::{
        errors::errors::{Error, ErrorImpl},
        lexer::{
            lexer::{tokenize, Lexer},
            tokens::TokenKind,
        },
        Position,
    };

    const SOURCE: &[u8] = b"Hello, world!\nx := 5;\n\n    a : b;\n";

    #[test]
    fn test_get_line_at_position() {
        let (line_number, line, line_pos) = super::get_line_at_position(SOURCE, 10).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, b"Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = super::get_line_at_position(SOURCE, 29).unwrap();
        assert_eq!(line_number, 4);
        assert_eq!(line, b"    a : b;\n");
        assert_eq!(line_pos, 6);
    }

    #[test]
    fn test_get_line_at_end_of_input() {
        let source = b"x := \"abc";
        let (line_number, line, line_pos) =
            super::get_line_at_position(source, source.len() as u32).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, source);
        assert_eq!(line_pos, source.len());

        assert!(super::get_line_at_position(source, 100).is_none());
    }

    #[test]
    fn test_display_error() {
        let error = Error::new(
            ErrorImpl::InvalidAssignmentOperator,
            Position(29, Rc::new("front.in".to_string())),
        );

        let rendered = super::display_error(&error, SOURCE);
        let lines: Vec<&str> = rendered.lines().collect();

        assert!(lines[0].starts_with("Error: InvalidAssignmentOperator ("));
        assert_eq!(lines[1], "-> front.in");
        assert_eq!(lines[2], "  |");
        assert_eq!(lines[3], "4 | a : b;");
        assert_eq!(lines[4], "  | --^");
    }

    #[test]
    fn test_display_error_without_position() {
        let error = Error::new(
            ErrorImpl::InputNotFound {
                path: "missing.in".to_string(),
                reason: "No such file or directory".to_string(),
            },
            Position::null(),
        );

        let rendered = super::display_error(&error, b"");
        assert_eq!(rendered.lines().count(), 1);
        assert!(rendered.starts_with("Error: InputNotFound"));
        assert!(rendered.contains("missing.in"));
    }

    #[test]
    fn test_display_error_counts_characters_not_bytes() {
        let source = "s := \"é\" : b;";
        let error = tokenize(source.to_string(), Some("front.in".to_string())).unwrap_err();
        assert_eq!(error.get_position().0, 10);

        let rendered = super::display_error(&error, source.as_bytes());
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[3], "1 | s := \"é\" : b;");
        assert_eq!(lines[4], "  | ---------^");
    }

    #[test]
    fn test_display_error_with_invalid_utf8() {
        let source = b"\"\xff\" : b;";
        let error = tokenize_bytes(source).unwrap_err();

        let rendered = super::display_error(&error, source);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[3], "1 | \"\u{fffd}\" : b;");
        assert_eq!(lines[4], "  | ----^");
    }

    #[test]
    fn test_position_offset_is_clamped() {
        let file = Rc::new("big.in".to_string());
        assert_eq!(Position::new(42, Rc::clone(&file)).0, 42);
        assert_eq!(Position::new(u32::MAX as usize, Rc::clone(&file)).0, u32::MAX);
        assert_eq!(Position::new(u32::MAX as usize + 10, file).0, u32::MAX);
    }

    fn tokenize_bytes(source: &[u8]) -> Result<(), Error> {
        let mut lexer = Lexer::new(source, Some("front.in".to_string()));
        loop {
            if lexer.next_token()?.kind == TokenKind::EndOfInput {
                return Ok(());
            }
        }
    }
}
