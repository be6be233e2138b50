//! Lexical analysis module for the scanner.
//!
//! This module contains the scanner that converts source text into a
//! stream of tokens. It handles:
//!
//! - Character-by-character cursoring with bounded lookahead
//! - Recognition of keywords, identifiers, literals, and operators
//! - Token position tracking for error reporting
//! - Comments and whitespace handling

pub mod cursor;
pub mod lexer;
pub mod tokens;
