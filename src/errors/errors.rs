use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::InputNotFound { .. } => "InputNotFound",
            ErrorImpl::UnterminatedComment => "UnterminatedComment",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::IdentifierTooLong { .. } => "IdentifierTooLong",
            ErrorImpl::IntegerTooLong { .. } => "IntegerTooLong",
            ErrorImpl::IdentifierStartsWithDigit { .. } => "IdentifierStartsWithDigit",
            ErrorImpl::InvalidAssignmentOperator => "InvalidAssignmentOperator",
            ErrorImpl::UnrecognizedCharacter { .. } => "UnrecognizedCharacter",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::InputNotFound { path, reason } => {
                ErrorTip::Suggestion(format!("Cannot open file `{}`: {}", path, reason))
            }
            ErrorImpl::UnterminatedComment => {
                ErrorTip::Suggestion(String::from("Comment is missing its closing `*/`"))
            }
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("String is missing its closing `\"`"))
            }
            ErrorImpl::IdentifierTooLong { identifier } => ErrorTip::Suggestion(format!(
                "Identifier `{}` is {} characters long, the limit is {}",
                identifier,
                identifier.len(),
                MAX_IDENTIFIER_LEN
            )),
            ErrorImpl::IntegerTooLong { integer } => ErrorTip::Suggestion(format!(
                "Integer `{}` has {} digits, the limit is {}",
                integer,
                integer.len(),
                MAX_INTEGER_LEN
            )),
            ErrorImpl::IdentifierStartsWithDigit { lexeme } => ErrorTip::Suggestion(format!(
                "`{}` looks like an identifier, identifiers must start with a letter",
                lexeme
            )),
            ErrorImpl::InvalidAssignmentOperator => {
                ErrorTip::Suggestion(String::from("Expected `:=`, a lone `:` is not an operator"))
            }
            ErrorImpl::UnrecognizedCharacter { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

/// Longest identifier the scanner accepts.
pub const MAX_IDENTIFIER_LEN: usize = 30;
/// Longest integer constant, in digits.
pub const MAX_INTEGER_LEN: usize = 10;

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("cannot open input {path:?}: {reason}")]
    InputNotFound { path: String, reason: String },
    #[error("unterminated comment")]
    UnterminatedComment,
    #[error("unterminated string")]
    UnterminatedString,
    #[error("identifier too long: {identifier:?}")]
    IdentifierTooLong { identifier: String },
    #[error("integer too long: {integer:?}")]
    IntegerTooLong { integer: String },
    #[error("identifier starts with a digit: {lexeme:?}")]
    IdentifierStartsWithDigit { lexeme: String },
    #[error("invalid assignment operator, expected \":=\"")]
    InvalidAssignmentOperator,
    #[error("unrecognized character: {character:?}")]
    UnrecognizedCharacter { character: String },
}
