//! Error types and error handling for the parser.
//!
//! This module defines the error types used throughout lexing and parsing.
//! It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for lex and parse failures
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions

pub mod errors;
