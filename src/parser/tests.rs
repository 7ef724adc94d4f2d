//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Operator precedence and associativity
//! - Declarations (variables, functions, structs, enums)
//! - Control flow statements
//! - Braced-form disambiguation (block / array / map / struct literal)
//! - String interpolation
//! - Error cases

use std::rc::Rc;

use super::parser::parse;
use crate::{
    ast::{
        ast::{Expr, ExprType, Stmt, StmtType, Type, TypeType},
        expressions::*,
        statements::*,
        types::Primitive,
    },
    errors::errors::Error,
    lexer::lexer::tokenize,
};

fn parse_ok(source: &str) -> BlockStmt {
    let tokens = tokenize(source.to_string(), Some("test.ez".to_string())).unwrap();
    let (_, result) = parse(tokens, Rc::new("test.ez".to_string()));
    result.unwrap()
}

fn parse_err(source: &str) -> Error {
    let tokens = tokenize(source.to_string(), Some("test.ez".to_string())).unwrap();
    let (_, result) = parse(tokens, Rc::new("test.ez".to_string()));
    result.unwrap_err()
}

fn stmt_expr(block: &BlockStmt, index: usize) -> &ExpressionStmt {
    block.body[index]
        .as_any()
        .downcast_ref::<ExpressionStmt>()
        .expect("expected an expression statement")
}

// PRECEDENCE

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    let block = parse_ok("a + b * c");
    let binary = stmt_expr(&block, 0)
        .expression
        .as_any()
        .downcast_ref::<BinaryExpr>()
        .unwrap();

    assert_eq!(binary.operator.value, "+");
    assert_eq!(binary.left.get_expr_type(), ExprType::Symbol);

    let right = binary.right.as_any().downcast_ref::<BinaryExpr>().unwrap();
    assert_eq!(right.operator.value, "*");
}

#[test]
fn test_logical_precedence() {
    // a == b && c || d parses as ((a == b) && c) || d
    let block = parse_ok("a == b && c || d");
    let or = stmt_expr(&block, 0)
        .expression
        .as_any()
        .downcast_ref::<BinaryExpr>()
        .unwrap();
    assert_eq!(or.operator.value, "||");

    let and = or.left.as_any().downcast_ref::<BinaryExpr>().unwrap();
    assert_eq!(and.operator.value, "&&");

    let eq = and.left.as_any().downcast_ref::<BinaryExpr>().unwrap();
    assert_eq!(eq.operator.value, "==");
}

#[test]
fn test_additive_is_left_associative() {
    let block = parse_ok("a - b - c");
    let outer = stmt_expr(&block, 0)
        .expression
        .as_any()
        .downcast_ref::<BinaryExpr>()
        .unwrap();

    // (a - b) - c
    assert_eq!(outer.right.get_expr_type(), ExprType::Symbol);
    let inner = outer.left.as_any().downcast_ref::<BinaryExpr>().unwrap();
    assert_eq!(inner.operator.value, "-");
}

#[test]
fn test_membership_operators() {
    let block = parse_ok("x in items && y not_in items");
    let and = stmt_expr(&block, 0)
        .expression
        .as_any()
        .downcast_ref::<BinaryExpr>()
        .unwrap();

    let left = and.left.as_any().downcast_ref::<BinaryExpr>().unwrap();
    assert_eq!(left.operator.value, "in");
    let right = and.right.as_any().downcast_ref::<BinaryExpr>().unwrap();
    assert_eq!(right.operator.value, "not_in");
}

#[test]
fn test_unary_binds_tighter_than_binary() {
    let block = parse_ok("-a * !b");
    let star = stmt_expr(&block, 0)
        .expression
        .as_any()
        .downcast_ref::<BinaryExpr>()
        .unwrap();

    assert_eq!(star.left.get_expr_type(), ExprType::Prefix);
    assert_eq!(star.right.get_expr_type(), ExprType::Prefix);
}

#[test]
fn test_postfix_chain() {
    // a.b[0](x).c
    let block = parse_ok("a.b[0](x).c");
    let member = stmt_expr(&block, 0)
        .expression
        .as_any()
        .downcast_ref::<MemberExpr>()
        .unwrap();
    assert_eq!(member.property, "c");

    let call = member.object.as_any().downcast_ref::<CallExpr>().unwrap();
    assert_eq!(call.arguments.len(), 1);

    let index = call.callee.as_any().downcast_ref::<IndexExpr>().unwrap();
    let inner = index.object.as_any().downcast_ref::<MemberExpr>().unwrap();
    assert_eq!(inner.property, "b");
    assert_eq!(inner.object.get_expr_type(), ExprType::Symbol);
}

#[test]
fn test_grouping() {
    let block = parse_ok("(a + b) * c");
    let star = stmt_expr(&block, 0)
        .expression
        .as_any()
        .downcast_ref::<BinaryExpr>()
        .unwrap();

    assert_eq!(star.operator.value, "*");
    assert_eq!(star.left.get_expr_type(), ExprType::Grouped);
}

#[test]
fn test_adjacent_statements_without_terminators() {
    let block = parse_ok("foo()\nbar()");

    assert_eq!(block.body.len(), 2);
    assert_eq!(
        stmt_expr(&block, 0).expression.get_expr_type(),
        ExprType::Call
    );
    assert_eq!(
        stmt_expr(&block, 1).expression.get_expr_type(),
        ExprType::Call
    );
}

// LITERALS

#[test]
fn test_number_radixes() {
    let block = parse_ok("0xFF 0b1010 0o777 1_000 2.5");

    let expected = [
        NumberValue::Integer {
            value: 255,
            radix: Radix::Hexadecimal,
        },
        NumberValue::Integer {
            value: 10,
            radix: Radix::Binary,
        },
        NumberValue::Integer {
            value: 511,
            radix: Radix::Octal,
        },
        NumberValue::Integer {
            value: 1000,
            radix: Radix::Decimal,
        },
        NumberValue::Float(2.5),
    ];

    for (i, value) in expected.iter().enumerate() {
        let number = stmt_expr(&block, i)
            .expression
            .as_any()
            .downcast_ref::<NumberExpr>()
            .unwrap();
        assert_eq!(number.value, *value, "literal {}", i);
    }
}

#[test]
fn test_boolean_nil_char_raw_string() {
    let block = parse_ok("true false nil 'x' `raw`");

    assert_eq!(
        stmt_expr(&block, 0).expression.get_expr_type(),
        ExprType::Boolean
    );
    assert_eq!(
        stmt_expr(&block, 1).expression.get_expr_type(),
        ExprType::Boolean
    );
    assert_eq!(
        stmt_expr(&block, 2).expression.get_expr_type(),
        ExprType::Nil
    );

    let char_expr = stmt_expr(&block, 3)
        .expression
        .as_any()
        .downcast_ref::<CharExpr>()
        .unwrap();
    assert_eq!(char_expr.value, 'x');

    let raw = stmt_expr(&block, 4)
        .expression
        .as_any()
        .downcast_ref::<RawStringExpr>()
        .unwrap();
    assert_eq!(raw.value, "raw");
}

#[test]
fn test_string_interpolation() {
    let block = parse_ok(r#"temp s = "a ${x + 1} b""#);
    let decl = block.body[0]
        .as_any()
        .downcast_ref::<VarDeclStmt>()
        .unwrap();

    let string = decl
        .assigned_value
        .as_ref()
        .unwrap()
        .as_any()
        .downcast_ref::<StringExpr>()
        .unwrap();

    assert_eq!(string.segments.len(), 3);
    match &string.segments[0] {
        StringSegment::Text(text) => assert_eq!(text, "a "),
        _ => panic!("expected text segment"),
    }
    match &string.segments[1] {
        StringSegment::Interpolation(expr) => {
            let binary = expr.as_any().downcast_ref::<BinaryExpr>().unwrap();
            assert_eq!(binary.operator.value, "+");
        }
        _ => panic!("expected interpolation segment"),
    }
}

#[test]
fn test_nested_string_interpolation() {
    let block = parse_ok(r#""a${ "b${c}" }""#);
    let outer = stmt_expr(&block, 0)
        .expression
        .as_any()
        .downcast_ref::<StringExpr>()
        .unwrap();

    let inner = match &outer.segments[1] {
        StringSegment::Interpolation(expr) => {
            expr.as_any().downcast_ref::<StringExpr>().unwrap()
        }
        _ => panic!("expected interpolation segment"),
    };

    match &inner.segments[1] {
        StringSegment::Interpolation(expr) => {
            assert_eq!(expr.get_expr_type(), ExprType::Symbol);
        }
        _ => panic!("expected nested interpolation"),
    }
}

// BRACED FORMS

#[test]
fn test_empty_braces_are_a_block() {
    let block = parse_ok("{}");
    assert_eq!(block.body[0].get_stmt_type(), StmtType::BlockStmt);
}

#[test]
fn test_brace_statement_prefers_block() {
    let block = parse_ok("{ foo() }");
    let inner = block.body[0].as_any().downcast_ref::<BlockStmt>().unwrap();
    assert_eq!(inner.body.len(), 1);
}

#[test]
fn test_brace_array_literal_statement() {
    let block = parse_ok("{1, 2, 3}");
    let array = stmt_expr(&block, 0)
        .expression
        .as_any()
        .downcast_ref::<ArrayLiteralExpr>()
        .unwrap();
    assert_eq!(array.elements.len(), 3);
}

#[test]
fn test_brace_map_literal_statement() {
    let block = parse_ok(r#"{"a": 1, "b": 2}"#);
    let map = stmt_expr(&block, 0)
        .expression
        .as_any()
        .downcast_ref::<MapLiteralExpr>()
        .unwrap();
    assert_eq!(map.entries.len(), 2);
}

#[test]
fn test_struct_literal_expression() {
    let block = parse_ok("temp p = Point { x: 1, y: 2 }");
    let decl = block.body[0]
        .as_any()
        .downcast_ref::<VarDeclStmt>()
        .unwrap();

    let literal = decl
        .assigned_value
        .as_ref()
        .unwrap()
        .as_any()
        .downcast_ref::<StructLiteralExpr>()
        .unwrap();
    assert_eq!(literal.name, "Point");
    assert_eq!(literal.fields.len(), 2);
    assert_eq!(literal.fields[0].0, "x");
}

#[test]
fn test_identifier_before_block_is_not_struct_literal() {
    // The body block must not be mistaken for a struct literal on `x`
    let block = parse_ok("if x { foo() }");
    let if_stmt = block.body[0].as_any().downcast_ref::<IfStmt>().unwrap();

    assert_eq!(if_stmt.condition.get_expr_type(), ExprType::Symbol);
    assert_eq!(if_stmt.body.body.len(), 1);
}

#[test]
fn test_unbalanced_brace_error() {
    let error = parse_err("{ {1, 2}");
    assert_eq!(error.get_error_name(), "UnbalancedBrackets");
}

#[test]
fn test_ambiguous_braced_form_error() {
    // Neither a block (comma) nor a literal (`temp` cannot start an
    // expression)
    let error = parse_err("{1, temp}");
    assert_eq!(error.get_error_name(), "AmbiguousLiteralForm");
}

// DECLARATIONS

#[test]
fn test_module_and_imports() {
    let block = parse_ok("module maths\nimport @std, \"lib/vectors.ez\"\nusing vectors, std");

    let module = block.body[0]
        .as_any()
        .downcast_ref::<ModuleDeclStmt>()
        .unwrap();
    assert_eq!(module.name, "maths");

    let import = block.body[1].as_any().downcast_ref::<ImportStmt>().unwrap();
    assert!(!import.and_use);
    assert_eq!(
        import.paths,
        vec![
            ImportPath::Package("std".to_string()),
            ImportPath::Path("lib/vectors.ez".to_string()),
        ]
    );

    let using = block.body[2].as_any().downcast_ref::<UsingStmt>().unwrap();
    assert_eq!(using.names, vec!["vectors".to_string(), "std".to_string()]);
}

#[test]
fn test_import_and_use() {
    let block = parse_ok("import & use @std");
    let import = block.body[0].as_any().downcast_ref::<ImportStmt>().unwrap();
    assert!(import.and_use);
}

#[test]
fn test_interpolated_import_path_rejected() {
    let error = parse_err(r#"import "lib/${name}.ez""#);
    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
}

#[test]
fn test_var_decl_forms() {
    let block = parse_ok(
        "temp a = 1\nconst B int = 2\nprivate temp c float\ntemp d\nprivate const E = 5",
    );

    let a = block.body[0].as_any().downcast_ref::<VarDeclStmt>().unwrap();
    assert!(!a.is_constant && !a.is_private);
    assert!(a.explicit_type.is_none());
    assert!(a.assigned_value.is_some());

    let b = block.body[1].as_any().downcast_ref::<VarDeclStmt>().unwrap();
    assert!(b.is_constant);
    assert_eq!(
        b.explicit_type.as_ref().unwrap().get_type_type(),
        TypeType::Primitive(Primitive::Int)
    );

    let c = block.body[2].as_any().downcast_ref::<VarDeclStmt>().unwrap();
    assert!(c.is_private && !c.is_constant);
    assert!(c.assigned_value.is_none());

    let d = block.body[3].as_any().downcast_ref::<VarDeclStmt>().unwrap();
    assert!(d.explicit_type.is_none() && d.assigned_value.is_none());

    let e = block.body[4].as_any().downcast_ref::<VarDeclStmt>().unwrap();
    assert!(e.is_private && e.is_constant);
}

#[test]
fn test_fn_decl() {
    let block = parse_ok("do add(a int, &b [int, 4]) -> (int, bool) { return a + 1, true }");
    let decl = block.body[0].as_any().downcast_ref::<FnDeclStmt>().unwrap();

    assert_eq!(decl.identifier, "add");
    assert!(!decl.is_private);
    assert_eq!(decl.parameters.len(), 2);
    assert!(!decl.parameters[0].by_ref);
    assert!(decl.parameters[1].by_ref);
    assert_eq!(decl.parameters[1].name, "b");
    assert_eq!(decl.return_types.len(), 2);
    assert_eq!(decl.body.body.len(), 1);

    let ret = decl.body.body[0]
        .as_any()
        .downcast_ref::<ReturnStmt>()
        .unwrap();
    assert_eq!(ret.values.len(), 2);
}

#[test]
fn test_private_fn_decl() {
    let block = parse_ok("private do helper() { }");
    let decl = block.body[0].as_any().downcast_ref::<FnDeclStmt>().unwrap();

    assert!(decl.is_private);
    assert!(decl.parameters.is_empty());
    assert!(decl.return_types.is_empty());
}

#[test]
fn test_struct_decl() {
    let block = parse_ok("const Point struct { x, y float\n name string }");
    let decl = block.body[0]
        .as_any()
        .downcast_ref::<StructDeclStmt>()
        .unwrap();

    assert_eq!(decl.name, "Point");
    assert_eq!(decl.fields.len(), 2);
    assert_eq!(decl.fields[0].names, vec!["x".to_string(), "y".to_string()]);
    assert_eq!(decl.fields[1].names, vec!["name".to_string()]);
    assert_eq!(
        decl.fields[1].field_type.get_type_type(),
        TypeType::Primitive(Primitive::String)
    );
}

#[test]
fn test_enum_decl_with_attribute() {
    let block = parse_ok("@(flags) const Colour enum { Red = 1 Green Blue = 4 }");
    let decl = block.body[0]
        .as_any()
        .downcast_ref::<EnumDeclStmt>()
        .unwrap();

    assert_eq!(decl.name, "Colour");
    assert_eq!(decl.attribute.as_ref().unwrap().name, "flags");
    assert_eq!(decl.values.len(), 3);
    assert_eq!(decl.values[0].name, "Red");
    assert!(decl.values[0].value.is_some());
    assert!(decl.values[1].value.is_none());
}

#[test]
fn test_attribute_on_invalid_statement() {
    let error = parse_err("@(flags) temp x = 1");
    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
}

// CONTROL FLOW

#[test]
fn test_if_or_otherwise() {
    let block = parse_ok("if a { x() } or b { y() } or c { z() } otherwise { w() }");
    let if_stmt = block.body[0].as_any().downcast_ref::<IfStmt>().unwrap();

    assert_eq!(if_stmt.or_clauses.len(), 2);
    assert!(if_stmt.otherwise.is_some());
}

#[test]
fn test_or_after_otherwise_rejected() {
    let error = parse_err("if a { } otherwise { } or b { }");
    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
}

#[test]
fn test_for_paren_forms_are_equivalent() {
    let plain = parse_ok("for x in items { }");
    let parens = parse_ok("for (x in items) { }");

    let plain = plain.body[0].as_any().downcast_ref::<ForStmt>().unwrap();
    let parens = parens.body[0].as_any().downcast_ref::<ForStmt>().unwrap();

    assert_eq!(plain.variable, parens.variable);
    assert!(!plain.each && !parens.each);
    assert_eq!(plain.iterable.get_expr_type(), ExprType::Symbol);
    assert_eq!(parens.iterable.get_expr_type(), ExprType::Symbol);
}

#[test]
fn test_for_each_with_typed_variable() {
    let block = parse_ok("for_each item int in range(10) { use_item(item) }");
    let for_stmt = block.body[0].as_any().downcast_ref::<ForStmt>().unwrap();

    assert!(for_stmt.each);
    assert!(for_stmt.declared_type.is_some());
    assert_eq!(for_stmt.iterable.get_expr_type(), ExprType::Range);
}

#[test]
fn test_as_long_as_and_loop() {
    let block = parse_ok("as_long_as x < 10 { x += 1 }\nloop { break }");

    let while_stmt = block.body[0]
        .as_any()
        .downcast_ref::<AsLongAsStmt>()
        .unwrap();
    assert_eq!(while_stmt.body.body.len(), 1);
    assert_eq!(
        while_stmt.body.body[0].get_stmt_type(),
        StmtType::AssignmentStmt
    );

    let loop_stmt = block.body[1].as_any().downcast_ref::<LoopStmt>().unwrap();
    assert_eq!(loop_stmt.body.body[0].get_stmt_type(), StmtType::BreakStmt);
}

#[test]
fn test_when_statement() {
    let block = parse_ok("when x { is 1 { a() } is 2 { b() } default { c() } }");
    let when = block.body[0].as_any().downcast_ref::<WhenStmt>().unwrap();

    assert!(when.attribute.is_none());
    assert_eq!(when.arms.len(), 2);
    assert!(when.default_arm.is_some());
}

#[test]
fn test_when_with_attribute() {
    let block = parse_ok("@(exhaustive) when x { is 1 { } }");
    let when = block.body[0].as_any().downcast_ref::<WhenStmt>().unwrap();

    assert_eq!(when.attribute.as_ref().unwrap().name, "exhaustive");
}

#[test]
fn test_is_after_default_rejected() {
    let error = parse_err("when x { default { } is 1 { } }");
    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
}

#[test]
fn test_bare_return() {
    let block = parse_ok("do f() { return }");
    let decl = block.body[0].as_any().downcast_ref::<FnDeclStmt>().unwrap();
    let ret = decl.body.body[0]
        .as_any()
        .downcast_ref::<ReturnStmt>()
        .unwrap();

    assert!(ret.values.is_empty());
}

#[test]
fn test_continue_statement() {
    let block = parse_ok("loop { continue }");
    let loop_stmt = block.body[0].as_any().downcast_ref::<LoopStmt>().unwrap();
    assert_eq!(
        loop_stmt.body.body[0].get_stmt_type(),
        StmtType::ContinueStmt
    );
}

// ENSURE

#[test]
fn test_ensure_call() {
    let block = parse_ok("ensure file.close()");
    let ensure = block.body[0].as_any().downcast_ref::<EnsureStmt>().unwrap();
    assert_eq!(ensure.call.get_expr_type(), ExprType::Call);
}

#[test]
fn test_ensure_non_call_rejected() {
    let error = parse_err("ensure x + 1");
    assert_eq!(error.get_error_name(), "InvalidEnsureTarget");
}

// ASSIGNMENT

#[test]
fn test_assignment_operators() {
    let block = parse_ok("x = 1\nx += 1\nx -= 1\nx *= 2\nx /= 2\nx %= 2");

    let expected = ["=", "+=", "-=", "*=", "/=", "%="];
    for (i, op) in expected.iter().enumerate() {
        let assignment = block.body[i]
            .as_any()
            .downcast_ref::<AssignmentStmt>()
            .unwrap();
        assert_eq!(assignment.operator.value, *op, "operator {}", i);
    }
}

#[test]
fn test_assignment_to_member_and_index() {
    let block = parse_ok("a.b = 1\nc[0] += 2");

    let first = block.body[0]
        .as_any()
        .downcast_ref::<AssignmentStmt>()
        .unwrap();
    assert_eq!(first.assignee.get_expr_type(), ExprType::Member);

    let second = block.body[1]
        .as_any()
        .downcast_ref::<AssignmentStmt>()
        .unwrap();
    assert_eq!(second.assignee.get_expr_type(), ExprType::Index);
}

// NEW AND RANGE

#[test]
fn test_new_expression() {
    let block = parse_ok("temp a = new Point\ntemp b = new Point { x: 1 }");

    let a = block.body[0].as_any().downcast_ref::<VarDeclStmt>().unwrap();
    let new_a = a
        .assigned_value
        .as_ref()
        .unwrap()
        .as_any()
        .downcast_ref::<NewExpr>()
        .unwrap();
    assert!(new_a.fields.is_none());

    let b = block.body[1].as_any().downcast_ref::<VarDeclStmt>().unwrap();
    let new_b = b
        .assigned_value
        .as_ref()
        .unwrap()
        .as_any()
        .downcast_ref::<NewExpr>()
        .unwrap();
    assert_eq!(new_b.fields.as_ref().unwrap().len(), 1);
}

#[test]
fn test_range_forms() {
    let block = parse_ok("range(10)\nrange(1, 10)\nrange(1, 2, 10)");

    let one = stmt_expr(&block, 0)
        .expression
        .as_any()
        .downcast_ref::<RangeExpr>()
        .unwrap();
    assert!(one.start.is_none() && one.step.is_none());

    let two = stmt_expr(&block, 1)
        .expression
        .as_any()
        .downcast_ref::<RangeExpr>()
        .unwrap();
    assert!(two.start.is_some() && two.step.is_none());

    let three = stmt_expr(&block, 2)
        .expression
        .as_any()
        .downcast_ref::<RangeExpr>()
        .unwrap();
    assert!(three.start.is_some() && three.step.is_some());
}

#[test]
fn test_range_arity_error() {
    let error = parse_err("range(1, 2, 3, 4)");
    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
}

// TYPES

#[test]
fn test_type_annotations() {
    let block = parse_ok("temp a [int, 4]\ntemp b map[string:int]\ntemp c [Point]\ntemp d Vector");

    let a = block.body[0].as_any().downcast_ref::<VarDeclStmt>().unwrap();
    let a_type = a.explicit_type.as_ref().unwrap();
    assert_eq!(a_type.get_type_type(), TypeType::Array);
    let array = a_type
        .as_any()
        .downcast_ref::<crate::ast::types::ArrayType>()
        .unwrap();
    assert_eq!(array.size, Some(4));
    assert_eq!(
        array.element.get_type_type(),
        TypeType::Primitive(Primitive::Int)
    );

    let b = block.body[1].as_any().downcast_ref::<VarDeclStmt>().unwrap();
    assert_eq!(
        b.explicit_type.as_ref().unwrap().get_type_type(),
        TypeType::Map
    );

    let c = block.body[2].as_any().downcast_ref::<VarDeclStmt>().unwrap();
    assert_eq!(
        c.explicit_type.as_ref().unwrap().get_type_type(),
        TypeType::Array
    );

    let d = block.body[3].as_any().downcast_ref::<VarDeclStmt>().unwrap();
    assert_eq!(
        d.explicit_type.as_ref().unwrap().get_type_type(),
        TypeType::Symbol("Vector".to_string())
    );
}

// ERRORS

#[test]
fn test_unexpected_end_of_input() {
    let error = parse_err("do f() {");
    assert_eq!(error.get_error_name(), "UnexpectedEndOfInput");
}

#[test]
fn test_error_position_points_to_offending_token() {
    let error = parse_err("temp = 1");
    assert_eq!(error.get_position().offset, 5);
}
