//! Integration tests for end-to-end parsing.
//!
//! These tests run complete programs through tokenization and parsing and
//! check the shape of the resulting syntax tree.

use ez_parser::{
    ast::{
        ast::{Expr, Stmt, StmtType},
        expressions::{StringExpr, StringSegment},
        statements::{EnsureStmt, FnDeclStmt, ImportPath, ImportStmt, WhenStmt},
    },
    lexer::lexer::tokenize,
    parse_source,
    parser::parser::parse,
};

#[test]
fn test_parse_simple_program() {
    let source = "temp x = 42".to_string();
    let tokens = tokenize(source, Some("test.ez".to_string())).unwrap();
    let (_, ast) = parse(tokens, std::rc::Rc::new("test.ez".to_string()));
    assert!(ast.is_ok());

    let ast = ast.unwrap();
    assert_eq!(ast.body.len(), 1);
    assert_eq!(ast.body[0].get_stmt_type(), StmtType::VarDeclStmt);
}

#[test]
fn test_parse_function() {
    let source = "do add(a int, b int) -> int { return a + b }".to_string();
    let tokens = tokenize(source, Some("test.ez".to_string())).unwrap();
    let (_, ast) = parse(tokens, std::rc::Rc::new("test.ez".to_string()));
    assert!(ast.is_ok());

    let ast = ast.unwrap();
    let decl = ast.body[0].as_any().downcast_ref::<FnDeclStmt>().unwrap();
    assert_eq!(decl.identifier, "add");
    assert_eq!(decl.parameters.len(), 2);
    assert_eq!(decl.return_types.len(), 1);
}

#[test]
fn test_parse_full_module() {
    let source = r#"
module geometry

import & use @std, "lib/output.ez"

const Point struct {
    x, y float
    label string
}

const Shape enum { Circle Square = 4 }

private const SCALE float = 2.0

do area(p Point) -> float {
    return p.x * p.y * SCALE
}

do describe(p Point) {
    temp message = "point ${p.label} has area ${area(p)}"
    print(message)
}

do main() {
    temp origin = Point { x: 0.0, y: 0.0, label: "origin" }
    temp points = {origin, new Point { x: 1.0, y: 2.0, label: "a" }}
    temp lookup = {"origin": origin}

    for_each p in points {
        if p.x > 0.0 {
            describe(p)
        } or p.y > 0.0 {
            describe(p)
        } otherwise {
            print("degenerate")
        }
    }

    temp i = 0
    as_long_as i < 10 {
        i += 1
        if i % 2 == 0 { continue }
    }

    when origin.label {
        is "origin" { print("at origin") }
        default { print("elsewhere") }
    }

    for n in range(1, 2, 10) {
        print(n)
    }
}
"#;

    let ast = parse_source(source.to_string(), Some("geometry.ez".to_string())).unwrap();

    let kinds: Vec<StmtType> = ast.body.iter().map(|stmt| stmt.get_stmt_type()).collect();
    assert_eq!(
        kinds,
        vec![
            StmtType::ModuleDeclStmt,
            StmtType::ImportStmt,
            StmtType::StructDeclStmt,
            StmtType::EnumDeclStmt,
            StmtType::VarDeclStmt,
            StmtType::FnDeclStmt,
            StmtType::FnDeclStmt,
            StmtType::FnDeclStmt,
        ]
    );

    let import = ast.body[1].as_any().downcast_ref::<ImportStmt>().unwrap();
    assert!(import.and_use);
    assert_eq!(
        import.paths,
        vec![
            ImportPath::Package("std".to_string()),
            ImportPath::Path("lib/output.ez".to_string()),
        ]
    );
}

#[test]
fn test_parse_resource_cleanup_program() {
    let source = r#"
do copy(from string, to string) -> bool {
    temp input = open(from)
    ensure input.close()

    temp output = create(to)
    ensure output.close()

    loop {
        temp chunk = input.read(4096)
        if chunk.empty() { break }
        output.write(chunk)
    }

    return true
}
"#;

    let ast = parse_source(source.to_string(), Some("copy.ez".to_string())).unwrap();
    let decl = ast.body[0].as_any().downcast_ref::<FnDeclStmt>().unwrap();

    let ensures: Vec<&EnsureStmt> = decl
        .body
        .body
        .iter()
        .filter_map(|stmt| stmt.as_any().downcast_ref::<EnsureStmt>())
        .collect();
    assert_eq!(ensures.len(), 2);
}

#[test]
fn test_parse_interpolation_end_to_end() {
    let source = r#"temp banner = "=== ${title.upper()} (${count + 1} items) ===""#;

    let ast = parse_source(source.to_string(), None).unwrap();
    let decl = ast.body[0]
        .as_any()
        .downcast_ref::<ez_parser::ast::statements::VarDeclStmt>()
        .unwrap();

    let string = decl
        .assigned_value
        .as_ref()
        .unwrap()
        .as_any()
        .downcast_ref::<StringExpr>()
        .unwrap();

    let interpolations = string
        .segments
        .iter()
        .filter(|segment| matches!(segment, StringSegment::Interpolation(_)))
        .count();
    assert_eq!(interpolations, 2);
}

#[test]
fn test_parse_attributed_when() {
    let source = r#"
@(exhaustive) when status {
    is 200 { print("ok") }
    is 404 { print("missing") }
    default { print("other") }
}
"#;

    let ast = parse_source(source.to_string(), Some("status.ez".to_string())).unwrap();
    let when = ast.body[0].as_any().downcast_ref::<WhenStmt>().unwrap();
    assert_eq!(when.attribute.as_ref().unwrap().name, "exhaustive");
    assert_eq!(when.arms.len(), 2);
    assert!(when.default_arm.is_some());
}

#[test]
fn test_parse_error_reports_position() {
    let source = "do broken( {".to_string();
    let result = parse_source(source, Some("broken.ez".to_string()));

    let error = result.unwrap_err();
    let position = error.get_position();
    assert_eq!(&**position.file, "broken.ez");
    assert!(position.offset > 0);
}

#[test]
fn test_lexer_error_propagates() {
    let source = "temp x = \"unterminated".to_string();
    let result = parse_source(source, None);

    assert_eq!(result.unwrap_err().get_error_name(), "UnterminatedString");
}
