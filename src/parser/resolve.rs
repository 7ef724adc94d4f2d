//! Disambiguation of `{` at statement and expression boundaries.
//!
//! Without statement terminators, a `{` opening a statement could start a
//! block, an array literal, or a map literal, and a `{` after an
//! identifier could start a struct literal or a block belonging to an
//! enclosing construct. These checks work on the raw token stream, before
//! any node is built, so the statement parser can commit to one reading
//! or try both from a checkpoint.

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::parser::Parser;

/// Finds the index of the `}` matching the `{` at `open_idx`, counting
/// only curly braces. The lexer has already folded string contents into
/// single tokens, so raw brace tokens are all that matter.
pub fn find_matching_curly(parser: &Parser, open_idx: usize) -> Result<usize, Error> {
    let mut depth = 0usize;
    let mut idx = open_idx;

    loop {
        match parser.token_kind_at(idx) {
            TokenKind::OpenCurly => depth += 1,
            TokenKind::CloseCurly => {
                depth -= 1;
                if depth == 0 {
                    return Ok(idx);
                }
            }
            TokenKind::EOF => {
                let position = parser
                    .token_at(open_idx)
                    .map(|t| t.span.start.clone())
                    .unwrap_or_else(|| parser.get_position());
                return Err(Error::new(ErrorImpl::UnbalancedBrackets, position));
            }
            _ => {}
        }
        idx += 1;
    }
}

/// Decides whether the braced form opening at `open_idx` reads as a struct
/// literal body: at least one field, and every top-level comma-separated
/// unit starting `identifier :`. Empty braces are not a struct literal.
pub fn is_struct_literal(parser: &Parser, open_idx: usize) -> Result<bool, Error> {
    let close_idx = find_matching_curly(parser, open_idx)?;

    if close_idx == open_idx + 1 {
        return Ok(false);
    }

    let mut idx = open_idx + 1;
    while idx < close_idx {
        if parser.token_kind_at(idx) != TokenKind::Identifier
            || parser.token_kind_at(idx + 1) != TokenKind::Colon
        {
            return Ok(false);
        }

        // Skip this unit, to just past the next top-level comma
        let mut depth = 0usize;
        while idx < close_idx {
            match parser.token_kind_at(idx) {
                TokenKind::OpenCurly | TokenKind::OpenParen | TokenKind::OpenBracket => depth += 1,
                TokenKind::CloseCurly | TokenKind::CloseParen | TokenKind::CloseBracket => {
                    depth = depth.saturating_sub(1)
                }
                TokenKind::Comma if depth == 0 => {
                    idx += 1;
                    break;
                }
                _ => {}
            }
            idx += 1;
        }
    }

    Ok(true)
}
