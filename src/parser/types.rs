//! Type annotation parsing.
//!
//! Annotations appear after variable and parameter names, in function
//! return positions, and nested inside array and map types:
//!
//! - Primitive names (`int`, `f32`, `string`, ...)
//! - Named types (struct and enum names)
//! - Array types `[T]` and `[T, N]`
//! - Map types `map[K:V]`
//!
//! The annotation grammar is small enough that a direct match on the
//! current token replaces the NUD/LED table machinery used for
//! expressions.

use crate::{
    ast::{
        ast::TypeWrapper,
        types::{ArrayType, MapType, Primitive, PrimitiveType, SymbolType},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::parser::Parser;

/// Returns true when the current token can open a type annotation. Used
/// by declaration parsers where the annotation is optional.
pub fn type_follows(parser: &Parser) -> bool {
    matches!(
        parser.current_token_kind(),
        TokenKind::PrimitiveType | TokenKind::Identifier | TokenKind::OpenBracket | TokenKind::Map
    )
}

pub fn parse_type(parser: &mut Parser) -> Result<TypeWrapper, Error> {
    match parser.current_token_kind() {
        TokenKind::PrimitiveType => {
            let token = parser.advance().clone();
            // The lexer only produces this kind for known primitive names
            let primitive = Primitive::from_name(&token.value).ok_or_else(|| {
                Error::new(
                    ErrorImpl::UnexpectedToken {
                        expected: String::from("a type"),
                        found: token.value.clone(),
                    },
                    token.span.start.clone(),
                )
            })?;

            Ok(TypeWrapper::new(PrimitiveType {
                primitive,
                position: token.span.start,
            }))
        }
        TokenKind::Identifier => {
            let token = parser.advance().clone();
            Ok(TypeWrapper::new(SymbolType {
                name: token.value,
                position: token.span.start,
            }))
        }
        TokenKind::OpenBracket => {
            // [T] or [T, N]
            parser.advance();
            let element = parse_type(parser)?;

            let size = if parser.current_token_kind() == TokenKind::Comma {
                parser.advance();
                let size_token = parser.expect(TokenKind::Integer)?;
                Some(parse_array_size(&size_token)?)
            } else {
                None
            };

            parser.expect(TokenKind::CloseBracket)?;
            Ok(TypeWrapper::new(ArrayType { element, size }))
        }
        TokenKind::Map => {
            // map[K:V]
            parser.advance();
            parser.expect(TokenKind::OpenBracket)?;
            let key = parse_type(parser)?;
            parser.expect(TokenKind::Colon)?;
            let value = parse_type(parser)?;
            parser.expect(TokenKind::CloseBracket)?;

            Ok(TypeWrapper::new(MapType { key, value }))
        }
        _ => Err(Error::new(
            ErrorImpl::UnexpectedToken {
                expected: String::from("a type"),
                found: parser.current_token().value.clone(),
            },
            parser.get_position(),
        )),
    }
}

/// Fixed array sizes allow the same radix prefixes and `_` separators as
/// integer literals.
fn parse_array_size(token: &Token) -> Result<u64, Error> {
    let digits = token.value.replace('_', "");

    let (base, rest) = if let Some(rest) = digits.strip_prefix("0x") {
        (16, rest)
    } else if let Some(rest) = digits.strip_prefix("0b") {
        (2, rest)
    } else if let Some(rest) = digits.strip_prefix("0o") {
        (8, rest)
    } else {
        (10, digits.as_str())
    };

    u64::from_str_radix(rest, base).map_err(|_| {
        Error::new(
            ErrorImpl::NumberParseError {
                token: token.value.clone(),
            },
            token.span.start.clone(),
        )
    })
}
