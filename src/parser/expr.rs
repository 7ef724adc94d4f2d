use std::rc::Rc;

use crate::{
    ast::{
        ast::{Expr, ExprWrapper},
        expressions::{
            ArrayLiteralExpr, BinaryExpr, BooleanExpr, CallExpr, CharExpr, GroupedExpr, IndexExpr,
            MapLiteralExpr, MemberExpr, NewExpr, NilExpr, NumberExpr, NumberValue, PrefixExpr,
            RangeExpr, RawStringExpr, Radix, StringExpr, StringSegment, StructLiteralExpr,
            SymbolExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::tokenize,
        tokens::{StringPart, Token, TokenKind},
    },
    Span,
};

use super::{
    lookups::{create_token_lookups, BindingPower},
    parser::Parser,
    resolve::is_struct_literal,
};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<ExprWrapper, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    if !parser.get_nud_lookup().contains_key(&token_kind) {
        if token_kind == TokenKind::EOF {
            return Err(Error::new(
                ErrorImpl::UnexpectedEndOfInput,
                parser.get_position(),
            ));
        }
        return Err(Error::new(
            ErrorImpl::UnexpectedToken {
                expected: String::from("an expression"),
                found: parser.current_token().value.clone(),
            },
            parser.get_position(),
        ));
    }

    let mut left = parser.get_nud_lookup().get(&token_kind).unwrap()(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs.
    // Tokens with no binding power end the expression; with no statement
    // terminators, that is how adjacent statements split.
    while *parser
        .get_bp_lookup()
        .get(&parser.current_token_kind())
        .unwrap_or(&BindingPower::Default)
        > bp
    {
        let token_kind = parser.current_token_kind();
        if !parser.get_led_lookup().contains_key(&token_kind) {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    expected: String::from("an operator"),
                    found: parser.current_token().value.clone(),
                },
                parser.get_position(),
            ));
        }

        let operator_bp = *parser
            .get_bp_lookup()
            .get(&parser.current_token_kind())
            .unwrap();
        left = parser.get_led_lookup().get(&token_kind).unwrap()(parser, left, operator_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    match parser.current_token_kind() {
        TokenKind::Integer => {
            let token = parser.advance().clone();
            let value = parse_integer_value(&token)?;
            Ok(ExprWrapper::new(NumberExpr {
                value,
                span: token.span.clone(),
            }))
        }
        TokenKind::Float => {
            let token = parser.advance().clone();
            let digits = token.value.replace('_', "");
            let result = digits.parse::<f64>().map_err(|_| {
                Error::new(
                    ErrorImpl::NumberParseError {
                        token: token.value.clone(),
                    },
                    token.span.start.clone(),
                )
            })?;
            Ok(ExprWrapper::new(NumberExpr {
                value: NumberValue::Float(result),
                span: token.span.clone(),
            }))
        }
        TokenKind::String => {
            let token = parser.advance().clone();
            let file = parser.get_file();
            parse_string_literal(&token, file)
        }
        TokenKind::RawString => {
            let token = parser.advance().clone();
            Ok(ExprWrapper::new(RawStringExpr {
                value: token.value.clone(),
                span: token.span.clone(),
            }))
        }
        TokenKind::Char => {
            let token = parser.advance().clone();
            // Lexer guarantees exactly one character
            let value = token.value.chars().next().unwrap_or('\0');
            Ok(ExprWrapper::new(CharExpr {
                value,
                span: token.span.clone(),
            }))
        }
        TokenKind::True | TokenKind::False => {
            let token = parser.advance().clone();
            Ok(ExprWrapper::new(BooleanExpr {
                value: token.kind == TokenKind::True,
                span: token.span.clone(),
            }))
        }
        TokenKind::Nil => {
            let token = parser.advance().clone();
            Ok(ExprWrapper::new(NilExpr {
                span: token.span.clone(),
            }))
        }
        TokenKind::Identifier => {
            if parser.token_kind_at(parser.get_pos() + 1) == TokenKind::OpenCurly
                && is_struct_literal(parser, parser.get_pos() + 1)?
            {
                return parse_struct_literal_expr(parser);
            }

            Ok(ExprWrapper::new(SymbolExpr {
                value: parser.current_token().value.clone(),
                span: parser.advance().span.clone(),
            }))
        }
        _ => Err(Error::new(
            ErrorImpl::UnexpectedToken {
                expected: String::from("an expression"),
                found: parser.current_token().value.clone(),
            },
            parser.get_position(),
        )),
    }
}

/// Converts an integer token's lexeme, honouring its radix prefix and
/// stripping `_` separators.
fn parse_integer_value(token: &Token) -> Result<NumberValue, Error> {
    let digits = token.value.replace('_', "");

    let (radix, base, rest) = if let Some(rest) = digits.strip_prefix("0x") {
        (Radix::Hexadecimal, 16, rest)
    } else if let Some(rest) = digits.strip_prefix("0b") {
        (Radix::Binary, 2, rest)
    } else if let Some(rest) = digits.strip_prefix("0o") {
        (Radix::Octal, 8, rest)
    } else {
        (Radix::Decimal, 10, digits.as_str())
    };

    let value = i64::from_str_radix(rest, base).map_err(|_| {
        Error::new(
            ErrorImpl::NumberParseError {
                token: token.value.clone(),
            },
            token.span.start.clone(),
        )
    })?;

    Ok(NumberValue::Integer { value, radix })
}

/// Builds a StringExpr from a lexed string token, recursively parsing each
/// interpolation segment's raw source into an expression.
fn parse_string_literal(token: &Token, file: Rc<String>) -> Result<ExprWrapper, Error> {
    let mut segments = Vec::new();

    for part in &token.parts {
        match part {
            StringPart::Text(text) => segments.push(StringSegment::Text(text.clone())),
            StringPart::Interpolation(source) => {
                let expr = parse_interpolated_expr(source, Rc::clone(&file))?;
                segments.push(StringSegment::Interpolation(expr));
            }
        }
    }

    Ok(ExprWrapper::new(StringExpr {
        segments,
        span: token.span.clone(),
    }))
}

/// Parses the source text of one `${...}` segment as a standalone
/// expression. Positions in any error are relative to the segment.
pub fn parse_interpolated_expr(source: &str, file: Rc<String>) -> Result<ExprWrapper, Error> {
    let tokens = tokenize(source.to_string(), Some((*file).clone()))?;
    let mut parser = Parser::new(tokens, file);
    create_token_lookups(&mut parser);

    let expr = parse_expr(&mut parser, BindingPower::Default)?;

    if parser.current_token_kind() != TokenKind::EOF {
        return Err(Error::new(
            ErrorImpl::UnexpectedToken {
                expected: String::from("end of interpolation"),
                found: parser.current_token().value.clone(),
            },
            parser.get_position(),
        ));
    }

    Ok(expr)
}

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: ExprWrapper,
    bp: BindingPower,
) -> Result<ExprWrapper, Error> {
    let operator_token = parser.advance().clone();

    let right = parse_expr(parser, bp)?;

    Ok(ExprWrapper::new(BinaryExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: right.get_span().end.clone(),
        },
        left,
        operator: operator_token,
        right,
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let operator_token = parser.advance().clone();
    let rhs = parse_expr(parser, BindingPower::Unary)?;

    Ok(ExprWrapper::new(PrefixExpr {
        span: Span {
            start: operator_token.span.start.clone(),
            end: rhs.get_span().end.clone(),
        },
        operator: operator_token,
        right_expr: rhs,
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let open = parser.advance().clone();
    let inner = parse_expr(parser, BindingPower::Default)?;
    let close = parser.expect(TokenKind::CloseParen)?;

    Ok(ExprWrapper::new(GroupedExpr {
        inner,
        span: Span {
            start: open.span.start.clone(),
            end: close.span.end.clone(),
        },
    }))
}

pub fn parse_call_expr(
    parser: &mut Parser,
    left: ExprWrapper,
    _bp: BindingPower,
) -> Result<ExprWrapper, Error> {
    parser.advance();

    let mut args = vec![];

    while parser.current_token_kind() != TokenKind::CloseParen {
        args.push(parse_expr(parser, BindingPower::Default)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    let close = parser.expect(TokenKind::CloseParen)?;

    Ok(ExprWrapper::new(CallExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: close.span.end.clone(),
        },
        callee: left,
        arguments: args,
    }))
}

pub fn parse_index_expr(
    parser: &mut Parser,
    left: ExprWrapper,
    _bp: BindingPower,
) -> Result<ExprWrapper, Error> {
    parser.advance();

    let index = parse_expr(parser, BindingPower::Default)?;
    let close = parser.expect(TokenKind::CloseBracket)?;

    Ok(ExprWrapper::new(IndexExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: close.span.end.clone(),
        },
        object: left,
        index,
    }))
}

pub fn parse_member_expr(
    parser: &mut Parser,
    left: ExprWrapper,
    _bp: BindingPower,
) -> Result<ExprWrapper, Error> {
    parser.advance();
    let property = parser.expect(TokenKind::Identifier)?;

    Ok(ExprWrapper::new(MemberExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: property.span.end.clone(),
        },
        object: left,
        property: property.value,
    }))
}

/// Parses the `field: value, ...` list between an already-expected pair of
/// curly braces, consuming the closing brace. Shared by struct literals and
/// `new` initialisers.
fn parse_field_initialisers(parser: &mut Parser) -> Result<(Vec<(String, ExprWrapper)>, Token), Error> {
    let mut fields = vec![];

    while parser.current_token_kind() != TokenKind::CloseCurly {
        let field_name = parser.expect(TokenKind::Identifier)?.value;
        parser.expect(TokenKind::Colon)?;
        let field_value = parse_expr(parser, BindingPower::Default)?;

        fields.push((field_name, field_value));

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    let close = parser.expect(TokenKind::CloseCurly)?;
    Ok((fields, close))
}

pub fn parse_struct_literal_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    // Point { x: 1, y: 2 }
    let name_token = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::OpenCurly)?;

    let (fields, close) = parse_field_initialisers(parser)?;

    Ok(ExprWrapper::new(StructLiteralExpr {
        name: name_token.value,
        fields,
        span: Span {
            start: name_token.span.start,
            end: close.span.end,
        },
    }))
}

pub fn parse_new_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    // new Test { field1: 1, field2: 2 }
    let start = parser.advance().span.start.clone();

    let name_token = parser.expect(TokenKind::Identifier)?;
    let mut end = name_token.span.end.clone();

    let fields = if parser.current_token_kind() == TokenKind::OpenCurly {
        parser.advance();
        let (fields, close) = parse_field_initialisers(parser)?;
        end = close.span.end;
        Some(fields)
    } else {
        None
    };

    Ok(ExprWrapper::new(NewExpr {
        name: name_token.value,
        fields,
        span: Span { start, end },
    }))
}

pub fn parse_range_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    // range(end) / range(start, end) / range(start, step, end)
    let range_token = parser.advance().clone();
    parser.expect(TokenKind::OpenParen)?;

    let mut arguments = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        arguments.push(parse_expr(parser, BindingPower::Default)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    let close = parser.expect(TokenKind::CloseParen)?;
    let span = Span {
        start: range_token.span.start.clone(),
        end: close.span.end,
    };

    let mut arguments = arguments.into_iter();
    let (start, step, end) = match arguments.len() {
        1 => (None, None, arguments.next().unwrap()),
        2 => (arguments.next(), None, arguments.next().unwrap()),
        3 => (arguments.next(), arguments.next(), arguments.next().unwrap()),
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: range_token.value.clone(),
                    message: String::from("range takes one to three arguments"),
                },
                range_token.span.start.clone(),
            ))
        }
    };

    Ok(ExprWrapper::new(RangeExpr {
        start,
        step,
        end,
        span,
    }))
}

/// NUD handler for `{` in expression position: an array or map literal.
/// The first entry decides which - a top-level `:` after the first
/// expression makes it a map.
pub fn parse_brace_literal_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let open = parser.advance().clone();

    if parser.current_token_kind() == TokenKind::CloseCurly {
        // Empty braces in expression position are an empty array
        let close = parser.advance().clone();
        return Ok(ExprWrapper::new(ArrayLiteralExpr {
            elements: vec![],
            span: Span {
                start: open.span.start,
                end: close.span.end,
            },
        }));
    }

    let first = parse_expr(parser, BindingPower::Default)?;

    if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        let first_value = parse_expr(parser, BindingPower::Default)?;
        let mut entries = vec![(first, first_value)];

        while parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            if parser.current_token_kind() == TokenKind::CloseCurly {
                break;
            }
            let key = parse_expr(parser, BindingPower::Default)?;
            parser.expect(TokenKind::Colon)?;
            let value = parse_expr(parser, BindingPower::Default)?;
            entries.push((key, value));
        }

        let close = parser.expect(TokenKind::CloseCurly)?;
        return Ok(ExprWrapper::new(MapLiteralExpr {
            entries,
            span: Span {
                start: open.span.start,
                end: close.span.end,
            },
        }));
    }

    let mut elements = vec![first];
    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        if parser.current_token_kind() == TokenKind::CloseCurly {
            break;
        }
        elements.push(parse_expr(parser, BindingPower::Default)?);
    }

    let close = parser.expect(TokenKind::CloseCurly)?;
    Ok(ExprWrapper::new(ArrayLiteralExpr {
        elements,
        span: Span {
            start: open.span.start,
            end: close.span.end,
        },
    }))
}
