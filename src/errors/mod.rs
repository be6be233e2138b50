//! Error types and error handling for the scanner.
//!
//! This module defines the lexical error taxonomy. It includes:
//!
//! - Error structures with source position information
//! - One error variant per violated lexical rule
//! - Helpful error messages and suggestions

pub mod errors;
