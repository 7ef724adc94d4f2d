use crate::{
    ast::{
        ast::{Expr, ExprType, StmtWrapper},
        statements::{
            AsLongAsStmt, AssignmentStmt, AttributeNode, BlockStmt, BreakStmt, ContinueStmt,
            EnsureStmt, EnumDeclStmt, EnumValue, ExpressionStmt, FnDeclStmt, ForStmt, IfStmt,
            ImportPath, ImportStmt, IsArm, LoopStmt, ModuleDeclStmt, OrClause, Parameter,
            ReturnStmt, StructDeclStmt, StructFieldDecl, UsingStmt, VarDeclStmt, WhenStmt,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{StringPart, TokenKind},
    parser::{
        expr::{parse_brace_literal_expr, parse_expr},
        lookups::BindingPower,
        resolve::find_matching_curly,
    },
    Span,
};

use super::{
    parser::Parser,
    types::{parse_type, type_follows},
};

pub fn parse_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    if parser
        .get_stmt_lookup()
        .contains_key(&parser.current_token_kind())
    {
        return parser
            .get_stmt_lookup()
            .get(&parser.current_token_kind())
            .unwrap()(parser);
    }

    let expr = parse_expr(parser, BindingPower::Default)?;

    if is_assignment_operator(parser.current_token_kind()) {
        let operator = parser.advance().clone();
        let value = parse_expr(parser, BindingPower::Default)?;

        return Ok(StmtWrapper::new(AssignmentStmt {
            span: Span {
                start: expr.get_span().start.clone(),
                end: value.get_span().end.clone(),
            },
            assignee: expr,
            operator,
            value,
        }));
    }

    Ok(StmtWrapper::new(ExpressionStmt {
        span: expr.get_span().clone(),
        expression: expr,
    }))
}

fn is_assignment_operator(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Assignment
            | TokenKind::PlusEquals
            | TokenKind::MinusEquals
            | TokenKind::StarEquals
            | TokenKind::SlashEquals
            | TokenKind::PercentEquals
    )
}

/// Parses a `{ ... }` block, consuming both braces.
pub fn parse_block(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let start = parser.expect(TokenKind::OpenCurly)?.span.start;

    let mut statements = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if parser.current_token_kind() == TokenKind::EOF {
            return Err(Error::new(
                ErrorImpl::UnexpectedEndOfInput,
                parser.get_position(),
            ));
        }
        statements.push(parse_stmt(parser)?);
    }

    let end = parser.expect(TokenKind::CloseCurly)?.span.end;

    Ok(BlockStmt {
        body: statements,
        id: parser.advance_id(),
        span: Span { start, end },
    })
}

/// Statement handler for `{`. A brace at statement position is read as a
/// block first; if that fails, the tokens are re-read as an array or map
/// literal from a checkpoint. Failing both ways is reported as ambiguous.
pub fn parse_brace_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let open_position = parser.get_position();
    // Catch an unbalanced brace before committing to either reading
    find_matching_curly(parser, parser.get_pos())?;

    let checkpoint = parser.get_pos();

    match parse_block(parser) {
        Ok(block) => Ok(StmtWrapper::new(block)),
        Err(_) => {
            parser.rewind(checkpoint);
            match parse_brace_literal_expr(parser) {
                Ok(expr) => Ok(StmtWrapper::new(ExpressionStmt {
                    span: expr.get_span().clone(),
                    expression: expr,
                })),
                Err(_) => Err(Error::new(ErrorImpl::AmbiguousLiteralForm, open_position)),
            }
        }
    }
}

pub fn parse_module_decl_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let start = parser.advance().span.start.clone();
    let name_token = parser.expect(TokenKind::Identifier)?;

    Ok(StmtWrapper::new(ModuleDeclStmt {
        name: name_token.value,
        span: Span {
            start,
            end: name_token.span.end,
        },
    }))
}

pub fn parse_import_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let start = parser.advance().span.start.clone();

    // `import & use ...` also brings the imported names into scope
    let and_use = if parser.current_token_kind() == TokenKind::Ampersand {
        parser.advance();
        parser.expect(TokenKind::Use)?;
        true
    } else {
        false
    };

    let mut paths = vec![parse_import_path(parser)?];
    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        paths.push(parse_import_path(parser)?);
    }

    Ok(StmtWrapper::new(ImportStmt {
        paths,
        and_use,
        span: Span {
            start,
            end: parser.get_position(),
        },
    }))
}

fn parse_import_path(parser: &mut Parser) -> Result<ImportPath, Error> {
    match parser.current_token_kind() {
        TokenKind::At => {
            parser.advance();
            let name = parser.expect(TokenKind::Identifier)?.value;
            Ok(ImportPath::Package(name))
        }
        TokenKind::String => {
            let token = parser.advance().clone();
            let interpolated = token
                .parts
                .iter()
                .any(|part| matches!(part, StringPart::Interpolation(_)));
            if interpolated {
                return Err(Error::new(
                    ErrorImpl::UnexpectedTokenDetailed {
                        token: token.value.clone(),
                        message: String::from("import paths cannot be interpolated"),
                    },
                    token.span.start.clone(),
                ));
            }
            Ok(ImportPath::Path(token.value))
        }
        _ => Err(Error::new(
            ErrorImpl::UnexpectedToken {
                expected: String::from("a package or path"),
                found: parser.current_token().value.clone(),
            },
            parser.get_position(),
        )),
    }
}

pub fn parse_using_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let start = parser.advance().span.start.clone();

    let mut names = vec![parser.expect(TokenKind::Identifier)?.value];
    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        names.push(parser.expect(TokenKind::Identifier)?.value);
    }

    Ok(StmtWrapper::new(UsingStmt {
        names,
        span: Span {
            start,
            end: parser.get_position(),
        },
    }))
}

/// Dispatches `const ...`: a struct or enum declaration when the token
/// after the name says so, otherwise a constant variable declaration.
pub fn parse_const_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    match parser.token_kind_at(parser.get_pos() + 2) {
        TokenKind::Struct => parse_struct_decl_stmt(parser),
        TokenKind::Enum => parse_enum_decl_stmt(parser, None),
        _ => parse_var_decl_stmt(parser),
    }
}

/// Dispatches `private ...` to the function or variable declaration parser.
pub fn parse_private_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    match parser.token_kind_at(parser.get_pos() + 1) {
        TokenKind::Do => parse_fn_decl_stmt(parser),
        TokenKind::Temp | TokenKind::Const => parse_var_decl_stmt(parser),
        _ => Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: parser.current_token().value.clone(),
                message: String::from("`private` must precede a declaration"),
            },
            parser.get_position(),
        )),
    }
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let start_token = parser.advance().clone();
    let is_private = start_token.kind == TokenKind::Private;
    let keyword = if is_private {
        parser.advance().clone()
    } else {
        start_token.clone()
    };
    let is_constant = keyword.kind == TokenKind::Const;

    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().value.clone(),
            message: String::from("expected identifier during variable declaration"),
        },
        parser.get_position(),
    );
    let variable_name = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    // Both the annotation and the initialiser are optional here; rules
    // like "constants need a value" belong to later stages.
    let explicit_type = if parser.current_token_kind() != TokenKind::Assignment
        && type_follows(parser)
    {
        Some(parse_type(parser)?)
    } else {
        None
    };

    let assigned_value = if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    Ok(StmtWrapper::new(VarDeclStmt {
        span: Span {
            start: start_token.span.start.clone(),
            end: parser.get_position(),
        },
        identifier: variable_name,
        is_private,
        is_constant,
        explicit_type,
        assigned_value,
    }))
}

pub fn parse_fn_decl_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let start_token = parser.advance().clone();
    let is_private = start_token.kind == TokenKind::Private;
    if is_private {
        parser.expect(TokenKind::Do)?;
    }

    let identifier = parser.expect(TokenKind::Identifier)?.value;

    parser.expect(TokenKind::OpenParen)?;

    let mut parameters = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseParen {
        let by_ref = if parser.current_token_kind() == TokenKind::Ampersand {
            parser.advance();
            true
        } else {
            false
        };
        let name = parser.expect(TokenKind::Identifier)?.value;
        let declared_type = parse_type(parser)?;

        parameters.push(Parameter {
            by_ref,
            name,
            declared_type,
        });

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    let mut return_types = Vec::new();
    if parser.current_token_kind() == TokenKind::Arrow {
        parser.advance();

        if parser.current_token_kind() == TokenKind::OpenParen {
            parser.advance();
            while parser.current_token_kind() != TokenKind::CloseParen {
                return_types.push(parse_type(parser)?);
                if parser.current_token_kind() == TokenKind::Comma {
                    parser.advance();
                } else {
                    break;
                }
            }
            parser.expect(TokenKind::CloseParen)?;
        } else {
            return_types.push(parse_type(parser)?);
        }
    }

    let body = parse_block(parser)?;

    Ok(StmtWrapper::new(FnDeclStmt {
        span: Span {
            start: start_token.span.start.clone(),
            end: body.span.end.clone(),
        },
        identifier,
        is_private,
        parameters,
        return_types,
        body,
    }))
}

pub fn parse_struct_decl_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let start = parser.advance().span.start.clone(); // const

    let name = parser.expect(TokenKind::Identifier)?.value;
    parser.expect(TokenKind::Struct)?;
    parser.expect(TokenKind::OpenCurly)?;

    let mut fields = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly {
        // One field line: `x, y float`
        let mut names = vec![parser.expect(TokenKind::Identifier)?.value];
        while parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            names.push(parser.expect(TokenKind::Identifier)?.value);
        }
        let field_type = parse_type(parser)?;

        fields.push(StructFieldDecl { names, field_type });
    }

    let end = parser.expect(TokenKind::CloseCurly)?.span.end;

    Ok(StmtWrapper::new(StructDeclStmt {
        name,
        fields,
        span: Span { start, end },
    }))
}

pub fn parse_enum_decl_stmt(
    parser: &mut Parser,
    attribute: Option<AttributeNode>,
) -> Result<StmtWrapper, Error> {
    let const_start = parser.advance().span.start.clone();
    let start = attribute
        .as_ref()
        .map(|attr| attr.span.start.clone())
        .unwrap_or(const_start);

    let name = parser.expect(TokenKind::Identifier)?.value;
    parser.expect(TokenKind::Enum)?;
    parser.expect(TokenKind::OpenCurly)?;

    let mut values = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly {
        let value_name = parser.expect(TokenKind::Identifier)?.value;
        let value = if parser.current_token_kind() == TokenKind::Assignment {
            parser.advance();
            Some(parse_expr(parser, BindingPower::Default)?)
        } else {
            None
        };

        values.push(EnumValue {
            name: value_name,
            value,
        });
    }

    let end = parser.expect(TokenKind::CloseCurly)?.span.end;

    Ok(StmtWrapper::new(EnumDeclStmt {
        attribute,
        name,
        values,
        span: Span { start, end },
    }))
}

/// Statement handler for `@`: parses the attribute, then the enum or when
/// statement it decorates.
pub fn parse_attribute_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let attribute = parse_attribute(parser)?;

    match parser.current_token_kind() {
        TokenKind::When => parse_when_stmt_with(parser, Some(attribute)),
        TokenKind::Const
            if parser.token_kind_at(parser.get_pos() + 2) == TokenKind::Enum =>
        {
            parse_enum_decl_stmt(parser, Some(attribute))
        }
        _ => Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: parser.current_token().value.clone(),
                message: String::from("attributes may only precede enum and when statements"),
            },
            parser.get_position(),
        )),
    }
}

fn parse_attribute(parser: &mut Parser) -> Result<AttributeNode, Error> {
    let start = parser.expect(TokenKind::At)?.span.start;
    parser.expect(TokenKind::OpenParen)?;

    let name = parser.expect(TokenKind::Identifier)?.value;

    let mut arguments = Vec::new();
    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        arguments.push(parse_expr(parser, BindingPower::Default)?);
    }

    let end = parser.expect(TokenKind::CloseParen)?.span.end;

    Ok(AttributeNode {
        name,
        arguments,
        span: Span { start, end },
    })
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let start = parser.advance().span.start.clone();

    let condition = parse_expr(parser, BindingPower::Default)?;
    let body = parse_block(parser)?;

    let mut or_clauses = Vec::new();
    while parser.current_token_kind() == TokenKind::OrKw {
        parser.advance();
        let or_condition = parse_expr(parser, BindingPower::Default)?;
        let or_body = parse_block(parser)?;
        or_clauses.push(OrClause {
            condition: or_condition,
            body: or_body,
        });
    }

    let otherwise = if parser.current_token_kind() == TokenKind::Otherwise {
        parser.advance();
        Some(parse_block(parser)?)
    } else {
        None
    };

    // An `or` after `otherwise` is out of order
    if parser.current_token_kind() == TokenKind::OrKw {
        return Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: parser.current_token().value.clone(),
                message: String::from("`or` clauses must come before `otherwise`"),
            },
            parser.get_position(),
        ));
    }

    Ok(StmtWrapper::new(IfStmt {
        condition,
        body,
        or_clauses,
        otherwise,
        span: Span {
            start,
            end: parser.get_position(),
        },
    }))
}

pub fn parse_for_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let start_token = parser.advance().clone();
    let each = start_token.kind == TokenKind::ForEach;

    // Header parentheses are optional and carry no meaning
    let parenthesised = parser.current_token_kind() == TokenKind::OpenParen;
    if parenthesised {
        parser.advance();
    }

    let variable = parser.expect(TokenKind::Identifier)?.value;

    let declared_type = if parser.current_token_kind() != TokenKind::In && type_follows(parser) {
        Some(parse_type(parser)?)
    } else {
        None
    };

    parser.expect(TokenKind::In)?;
    let iterable = parse_expr(parser, BindingPower::Default)?;

    if parenthesised {
        parser.expect(TokenKind::CloseParen)?;
    }

    let body = parse_block(parser)?;

    Ok(StmtWrapper::new(ForStmt {
        each,
        variable,
        declared_type,
        iterable,
        span: Span {
            start: start_token.span.start.clone(),
            end: body.span.end.clone(),
        },
        body,
    }))
}

pub fn parse_as_long_as_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let start = parser.advance().span.start.clone();

    let condition = parse_expr(parser, BindingPower::Default)?;
    let body = parse_block(parser)?;

    Ok(StmtWrapper::new(AsLongAsStmt {
        condition,
        span: Span {
            start,
            end: body.span.end.clone(),
        },
        body,
    }))
}

pub fn parse_loop_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let start = parser.advance().span.start.clone();
    let body = parse_block(parser)?;

    Ok(StmtWrapper::new(LoopStmt {
        span: Span {
            start,
            end: body.span.end.clone(),
        },
        body,
    }))
}

pub fn parse_when_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    parse_when_stmt_with(parser, None)
}

pub fn parse_when_stmt_with(
    parser: &mut Parser,
    attribute: Option<AttributeNode>,
) -> Result<StmtWrapper, Error> {
    let when_start = parser.advance().span.start.clone();
    let start = attribute
        .as_ref()
        .map(|attr| attr.span.start.clone())
        .unwrap_or(when_start);

    let subject = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::OpenCurly)?;

    let mut arms = Vec::new();
    let mut default_arm = None;

    loop {
        match parser.current_token_kind() {
            TokenKind::Is => {
                parser.advance();
                let pattern = parse_expr(parser, BindingPower::Default)?;
                let body = parse_block(parser)?;
                arms.push(IsArm { pattern, body });
            }
            TokenKind::Default => {
                parser.advance();
                default_arm = Some(parse_block(parser)?);

                // Nothing may follow the default arm
                if parser.current_token_kind() != TokenKind::CloseCurly {
                    return Err(Error::new(
                        ErrorImpl::UnexpectedTokenDetailed {
                            token: parser.current_token().value.clone(),
                            message: String::from("the `default` arm must come last"),
                        },
                        parser.get_position(),
                    ));
                }
            }
            TokenKind::CloseCurly => break,
            _ => {
                return Err(Error::new(
                    ErrorImpl::UnexpectedToken {
                        expected: String::from("is"),
                        found: parser.current_token().value.clone(),
                    },
                    parser.get_position(),
                ))
            }
        }
    }

    let end = parser.expect(TokenKind::CloseCurly)?.span.end;

    Ok(StmtWrapper::new(WhenStmt {
        attribute,
        subject,
        arms,
        default_arm,
        span: Span { start, end },
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let start = parser.advance().span.start.clone();

    let mut values = Vec::new();
    // The value list extends while the next token can start an expression
    while parser
        .get_nud_lookup()
        .contains_key(&parser.current_token_kind())
    {
        values.push(parse_expr(parser, BindingPower::Default)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    Ok(StmtWrapper::new(ReturnStmt {
        values,
        span: Span {
            start,
            end: parser.get_position(),
        },
    }))
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let token = parser.advance().clone();
    Ok(StmtWrapper::new(BreakStmt {
        span: token.span.clone(),
    }))
}

pub fn parse_continue_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let token = parser.advance().clone();
    Ok(StmtWrapper::new(ContinueStmt {
        span: token.span.clone(),
    }))
}

pub fn parse_ensure_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let start = parser.advance().span.start.clone();

    let call = parse_expr(parser, BindingPower::Default)?;
    if call.get_expr_type() != ExprType::Call {
        return Err(Error::new(
            ErrorImpl::InvalidEnsureTarget,
            call.get_span().start.clone(),
        ));
    }

    Ok(StmtWrapper::new(EnsureStmt {
        span: Span {
            start,
            end: call.get_span().end.clone(),
        },
        call,
    }))
}
