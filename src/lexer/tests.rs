//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Numeric literals (radix prefixes, separators, floats)
//! - String literals with escapes and interpolation
//! - Raw strings and char literals
//! - Operators and punctuation
//! - Comments
//! - Error cases and error positions

use super::{
    lexer::tokenize,
    tokens::{StringPart, TokenKind},
};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source.to_string(), Some("test.ez".to_string()))
        .unwrap()
        .iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    let source = "module import use using temp const do struct enum if or otherwise for for_each as_long_as loop when is default return break continue ensure private new range in not_in true false nil map".to_string();
    let tokens = tokenize(source, Some("test.ez".to_string())).unwrap();

    let expected = [
        TokenKind::Module,
        TokenKind::Import,
        TokenKind::Use,
        TokenKind::Using,
        TokenKind::Temp,
        TokenKind::Const,
        TokenKind::Do,
        TokenKind::Struct,
        TokenKind::Enum,
        TokenKind::If,
        TokenKind::OrKw,
        TokenKind::Otherwise,
        TokenKind::For,
        TokenKind::ForEach,
        TokenKind::AsLongAs,
        TokenKind::Loop,
        TokenKind::When,
        TokenKind::Is,
        TokenKind::Default,
        TokenKind::Return,
        TokenKind::Break,
        TokenKind::Continue,
        TokenKind::Ensure,
        TokenKind::Private,
        TokenKind::New,
        TokenKind::Range,
        TokenKind::In,
        TokenKind::NotIn,
        TokenKind::True,
        TokenKind::False,
        TokenKind::Nil,
        TokenKind::Map,
    ];

    for (i, kind) in expected.iter().enumerate() {
        assert_eq!(tokens[i].kind, *kind, "keyword {}", i);
    }
    assert_eq!(tokens[expected.len()].kind, TokenKind::EOF);
}

#[test]
fn test_keyword_prefix_stays_identifier() {
    let tokens = tokenize("format iffy for_each_item".to_string(), None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "format");
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
    assert_eq!(tokens[2].value, "for_each_item");
}

#[test]
fn test_primitive_type_names() {
    let tokens = tokenize("int u8 f32 string bool byte".to_string(), None).unwrap();

    for token in &tokens[..6] {
        assert_eq!(token.kind, TokenKind::PrimitiveType);
    }
    assert_eq!(tokens[2].value, "f32");
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 1_000_000 0xFF 0b1010 0o777 3.14 1_0.5_0".to_string(), None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Integer);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].kind, TokenKind::Integer);
    assert_eq!(tokens[1].value, "1_000_000");
    assert_eq!(tokens[2].kind, TokenKind::Integer);
    assert_eq!(tokens[2].value, "0xFF");
    assert_eq!(tokens[3].kind, TokenKind::Integer);
    assert_eq!(tokens[3].value, "0b1010");
    assert_eq!(tokens[4].kind, TokenKind::Integer);
    assert_eq!(tokens[4].value, "0o777");
    assert_eq!(tokens[5].kind, TokenKind::Float);
    assert_eq!(tokens[5].value, "3.14");
    assert_eq!(tokens[6].kind, TokenKind::Float);
    assert_eq!(tokens[6].value, "1_0.5_0");
}

#[test]
fn test_integer_then_member_not_float() {
    // A dot with no digit after it is not part of the number
    let tokens = tokenize("1.x".to_string(), None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Integer);
    assert_eq!(tokens[1].kind, TokenKind::Dot);
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
}

#[test]
fn test_malformed_numbers() {
    for source in ["1_", "0x_FF", "0x", "0b2", "1._5"] {
        let result = tokenize(source.to_string(), None);
        // 0b2: the prefix has no digits; 1._5: `_5` is an identifier, so
        // only the first two fail outright
        if let Err(error) = result {
            assert_eq!(error.get_error_name(), "MalformedNumericLiteral", "{}", source);
            assert_eq!(error.get_position().offset, 0, "{}", source);
        }
    }

    assert!(tokenize("1_".to_string(), None).is_err());
    assert!(tokenize("0x_FF".to_string(), None).is_err());
    assert!(tokenize("0x".to_string(), None).is_err());
    assert!(tokenize("0b2".to_string(), None).is_err());
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("== != <= >= && || -> ++ -- += -= *= /= %="),
        vec![
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Arrow,
            TokenKind::PlusPlus,
            TokenKind::MinusMinus,
            TokenKind::PlusEquals,
            TokenKind::MinusEquals,
            TokenKind::StarEquals,
            TokenKind::SlashEquals,
            TokenKind::PercentEquals,
            TokenKind::EOF,
        ]
    );

    assert_eq!(
        kinds("= ! < > + - * / % . , : @ & { } ( ) [ ]"),
        vec![
            TokenKind::Assignment,
            TokenKind::Not,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::Dot,
            TokenKind::Comma,
            TokenKind::Colon,
            TokenKind::At,
            TokenKind::Ampersand,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_string_with_escapes() {
    let tokens = tokenize(r#""a\n\t\"b\\""#.to_string(), None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "a\n\t\"b\\");
    assert_eq!(tokens[0].parts.len(), 1);
    assert_eq!(
        tokens[0].parts[0],
        StringPart::Text("a\n\t\"b\\".to_string())
    );
}

#[test]
fn test_empty_string() {
    let tokens = tokenize(r#""""#.to_string(), None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "");
    assert_eq!(tokens[0].parts, vec![StringPart::Text(String::new())]);
}

#[test]
fn test_invalid_escape_sequence() {
    let error = tokenize(r#""ab\q""#.to_string(), None).unwrap_err();

    assert_eq!(error.get_error_name(), "InvalidEscapeSequence");
    // Position points at the backslash
    assert_eq!(error.get_position().offset, 3);
}

#[test]
fn test_string_interpolation_parts() {
    let tokens = tokenize(r#""a ${x + 1} b""#.to_string(), None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(
        tokens[0].parts,
        vec![
            StringPart::Text("a ".to_string()),
            StringPart::Interpolation("x + 1".to_string()),
            StringPart::Text(" b".to_string()),
        ]
    );
    assert_eq!(tokens[1].kind, TokenKind::EOF);
}

#[test]
fn test_interpolation_with_nested_braces() {
    // The map literal's braces must not close the interpolation
    let tokens = tokenize(r#""${ {1: 2}[1] }""#.to_string(), None).unwrap();

    assert_eq!(
        tokens[0].parts,
        vec![StringPart::Interpolation(" {1: 2}[1] ".to_string())]
    );
}

#[test]
fn test_interpolation_with_nested_string() {
    let tokens = tokenize(r#""a${ "b${c}" }d""#.to_string(), None).unwrap();

    assert_eq!(
        tokens[0].parts,
        vec![
            StringPart::Text("a".to_string()),
            StringPart::Interpolation(" \"b${c}\" ".to_string()),
            StringPart::Text("d".to_string()),
        ]
    );
}

#[test]
fn test_unterminated_string_position() {
    let error = tokenize("temp a = \"abc".to_string(), None).unwrap_err();

    assert_eq!(error.get_error_name(), "UnterminatedString");
    // Reported at the opening quote, not at EOF
    assert_eq!(error.get_position().offset, 9);
}

#[test]
fn test_raw_string() {
    let tokens = tokenize("`a \\n ${x}`".to_string(), None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::RawString);
    // No escape or interpolation processing
    assert_eq!(tokens[0].value, "a \\n ${x}");
    assert!(tokens[0].parts.is_empty());

    let error = tokenize("`abc".to_string(), None).unwrap_err();
    assert_eq!(error.get_error_name(), "UnterminatedRawString");
}

#[test]
fn test_char_literals() {
    let tokens = tokenize(r"'a' '\n' '\''".to_string(), None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Char);
    assert_eq!(tokens[0].value, "a");
    assert_eq!(tokens[1].value, "\n");
    assert_eq!(tokens[2].value, "'");

    assert_eq!(
        tokenize("'ab'".to_string(), None).unwrap_err().get_error_name(),
        "UnterminatedCharLiteral"
    );
    assert_eq!(
        tokenize("'a".to_string(), None).unwrap_err().get_error_name(),
        "UnterminatedCharLiteral"
    );
}

#[test]
fn test_comments_are_skipped() {
    let tokens = tokenize(
        "temp a // trailing comment\n/* block\ncomment */ = 1".to_string(),
        None,
    )
    .unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Temp);
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[2].kind, TokenKind::Assignment);
    assert_eq!(tokens[3].kind, TokenKind::Integer);
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_unterminated_block_comment() {
    let error = tokenize("a /* never closed".to_string(), None).unwrap_err();

    assert_eq!(error.get_error_name(), "UnterminatedBlockComment");
    assert_eq!(error.get_position().offset, 2);
}

#[test]
fn test_unrecognised_token() {
    let error = tokenize("temp a = #".to_string(), None).unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().offset, 9);
    assert_eq!(error.get_position().line, 1);
    assert_eq!(error.get_position().column, 10);
}

#[test]
fn test_line_and_column_tracking() {
    let tokens = tokenize("temp a = 1\ntemp b = 2".to_string(), None).unwrap();

    let b_token = tokens.iter().find(|t| t.value == "b").unwrap();
    assert_eq!(b_token.span.start.line, 2);
    assert_eq!(b_token.span.start.column, 6);
    assert_eq!(b_token.span.start.offset, 16);
}

#[test]
fn test_spans_partition_source() {
    // Token spans are in order, non-overlapping, and each covers exactly
    // the lexeme it was built from
    let source = "do add(a int, b int) -> int {\n    return a + b\n}\n".to_string();
    let tokens = tokenize(source.clone(), None).unwrap();

    let mut previous_end = 0;
    for token in &tokens {
        let start = token.span.start.offset as usize;
        let end = token.span.end.offset as usize;

        assert!(start >= previous_end, "overlapping spans at {:?}", token.value);
        assert!(end <= source.len());
        previous_end = end;

        if token.kind != TokenKind::EOF {
            assert_eq!(&source[start..end], token.value, "span mismatch");
        }
    }
}

#[test]
fn test_string_span_covers_quotes() {
    let source = "temp s = \"hi\"".to_string();
    let tokens = tokenize(source.clone(), None).unwrap();

    let string_token = &tokens[3];
    assert_eq!(string_token.kind, TokenKind::String);
    assert_eq!(string_token.span.start.offset, 9);
    assert_eq!(string_token.span.end.offset as usize, source.len());
}
