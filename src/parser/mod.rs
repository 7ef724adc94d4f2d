//! Parser module for building an Abstract Syntax Tree.
//!
//! This module contains the parser that transforms a stream of tokens
//! into an Abstract Syntax Tree. It uses a Pratt parser for expressions
//! with proper operator precedence and handles:
//!
//! - Statement parsing (declarations, control flow, ensure)
//! - Expression parsing (binary ops, calls, literals, interpolation)
//! - Type annotation parsing
//! - Disambiguation of braced forms (block / array / map / struct literal)
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod resolve;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
