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

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnterminatedRawString => "UnterminatedRawString",
            ErrorImpl::UnterminatedCharLiteral => "UnterminatedCharLiteral",
            ErrorImpl::UnterminatedBlockComment => "UnterminatedBlockComment",
            ErrorImpl::InvalidEscapeSequence { .. } => "InvalidEscapeSequence",
            ErrorImpl::MalformedNumericLiteral { .. } => "MalformedNumericLiteral",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::UnexpectedEndOfInput => "UnexpectedEndOfInput",
            ErrorImpl::UnbalancedBrackets => "UnbalancedBrackets",
            ErrorImpl::AmbiguousLiteralForm => "AmbiguousLiteralForm",
            ErrorImpl::InvalidEnsureTarget => "InvalidEnsureTarget",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnterminatedString => ErrorTip::Suggestion(String::from(
                "String literal is missing a closing `\"`",
            )),
            ErrorImpl::UnterminatedRawString => ErrorTip::Suggestion(String::from(
                "Raw string literal is missing a closing backtick",
            )),
            ErrorImpl::UnterminatedCharLiteral => ErrorTip::Suggestion(String::from(
                "Char literal holds exactly one character and a closing `'`",
            )),
            ErrorImpl::UnterminatedBlockComment => ErrorTip::Suggestion(String::from(
                "Block comment is missing a closing `*/`",
            )),
            ErrorImpl::InvalidEscapeSequence { sequence } => ErrorTip::Suggestion(format!(
                "Unknown escape `{}`, valid escapes are \\n \\r \\t \\\\ \\' \\\" \\0",
                sequence
            )),
            ErrorImpl::MalformedNumericLiteral { token } => ErrorTip::Suggestion(format!(
                "Malformed number starting at `{}`, `_` must sit between digits",
                token
            )),
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::UnexpectedToken { expected, found } => {
                ErrorTip::Suggestion(format!("Expected `{}`, found `{}`", expected, found))
            }
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::UnexpectedEndOfInput => ErrorTip::Suggestion(String::from(
                "Source ended in the middle of a construct",
            )),
            ErrorImpl::UnbalancedBrackets => {
                ErrorTip::Suggestion(String::from("`{` has no matching `}`"))
            }
            ErrorImpl::AmbiguousLiteralForm => ErrorTip::Suggestion(String::from(
                "Braced form parses as neither a block nor an array/map literal",
            )),
            ErrorImpl::InvalidEnsureTarget => {
                ErrorTip::Suggestion(String::from("`ensure` takes a call expression"))
            }
        }
    }
}

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

#[derive(Error, Debug, Clone)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated raw string literal")]
    UnterminatedRawString,
    #[error("unterminated char literal")]
    UnterminatedCharLiteral,
    #[error("unterminated block comment")]
    UnterminatedBlockComment,
    #[error("invalid escape sequence: {sequence:?}")]
    InvalidEscapeSequence { sequence: String },
    #[error("malformed numeric literal: {token:?}")]
    MalformedNumericLiteral { token: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("unexpected token: expected {expected:?}, found {found:?}")]
    UnexpectedToken { expected: String, found: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("unbalanced brackets")]
    UnbalancedBrackets,
    #[error("ambiguous braced form")]
    AmbiguousLiteralForm,
    #[error("ensure target is not a call")]
    InvalidEnsureTarget,
}
