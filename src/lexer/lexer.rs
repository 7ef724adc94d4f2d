use std::rc::Rc;

use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{StringPart, Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, Regex) -> Result<(), Error>;

#[derive(Clone)]
pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

#[derive(Clone)]
pub struct Lexer {
    patterns: Vec<RegexPattern>,
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    line: u32,
    column: u32,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            pos: 0,
            line: 1,
            column: 1,
            tokens: vec![],
            patterns: vec![
                RegexPattern { regex: Regex::new("\\s+").unwrap(), handler: skip_handler },
                RegexPattern { regex: Regex::new("\\/\\/.*").unwrap(), handler: skip_handler },
                RegexPattern { regex: Regex::new("\\/\\*").unwrap(), handler: block_comment_handler },
                RegexPattern { regex: Regex::new("[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
                RegexPattern { regex: Regex::new("[0-9]").unwrap(), handler: number_handler },
                RegexPattern { regex: Regex::new("\"").unwrap(), handler: string_handler },
                RegexPattern { regex: Regex::new("`").unwrap(), handler: raw_string_handler },
                RegexPattern { regex: Regex::new("'").unwrap(), handler: char_handler },
                RegexPattern { regex: Regex::new("\\[").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[") },
                RegexPattern { regex: Regex::new("\\]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]") },
                RegexPattern { regex: Regex::new("\\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
                RegexPattern { regex: Regex::new("\\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
                RegexPattern { regex: Regex::new("\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
                RegexPattern { regex: Regex::new("\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
                RegexPattern { regex: Regex::new("==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==") },
                RegexPattern { regex: Regex::new("!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=") },
                RegexPattern { regex: Regex::new("!").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Not, "!") },
                RegexPattern { regex: Regex::new("<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=") },
                RegexPattern { regex: Regex::new("<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
                RegexPattern { regex: Regex::new(">=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=") },
                RegexPattern { regex: Regex::new(">").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
                RegexPattern { regex: Regex::new("\\|\\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Or, "||") },
                RegexPattern { regex: Regex::new("&&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::And, "&&") },
                RegexPattern { regex: Regex::new("&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Ampersand, "&") },
                RegexPattern { regex: Regex::new("@").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::At, "@") },
                RegexPattern { regex: Regex::new("\\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dot, ".") },
                RegexPattern { regex: Regex::new(":").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":") },
                RegexPattern { regex: Regex::new(",").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
                RegexPattern { regex: Regex::new("\\+\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::PlusPlus, "++") },
                RegexPattern { regex: Regex::new("->").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Arrow, "->") },
                RegexPattern { regex: Regex::new("--").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::MinusMinus, "--") },
                RegexPattern { regex: Regex::new("\\+=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::PlusEquals, "+=") },
                RegexPattern { regex: Regex::new("-=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::MinusEquals, "-=") },
                RegexPattern { regex: Regex::new("\\*=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::StarEquals, "*=") },
                RegexPattern { regex: Regex::new("/=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::SlashEquals, "/=") },
                RegexPattern { regex: Regex::new("%=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::PercentEquals, "%=") },
                RegexPattern { regex: Regex::new("=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=") },
                RegexPattern { regex: Regex::new("\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
                RegexPattern { regex: Regex::new("-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-") },
                RegexPattern { regex: Regex::new("/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
                RegexPattern { regex: Regex::new("\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
                RegexPattern { regex: Regex::new("%").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Percent, "%") },
            ],
            source,
            file: file_name,
        }
    }

    /// Advances `n` bytes, tracking line and column. `n` must land on a
    /// character boundary.
    pub fn advance_n(&mut self, n: usize) {
        let end = (self.pos + n).min(self.source.len());
        for c in self.source[self.pos..end].chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.pos = end;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn at(&self) -> char {
        self.source[self.pos..].chars().next().unwrap_or('\0')
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn position(&self) -> Position {
        Position::new(self.pos as u32, self.line, self.column, Rc::clone(&self.file))
    }
}

fn skip_handler(lexer: &mut Lexer, regex: Regex) -> Result<(), Error> {
    let matched = regex.find(lexer.remainder()).unwrap().end();
    lexer.advance_n(matched);
    Ok(())
}

fn symbol_handler(lexer: &mut Lexer, regex: Regex) -> Result<(), Error> {
    let value = regex.find(lexer.remainder()).unwrap().as_str().to_string();
    let start = lexer.position();
    lexer.advance_n(value.len());
    let end = lexer.position();

    if let Some(kind) = RESERVED_LOOKUP.get(value.as_str()) {
        lexer.push(MK_TOKEN!(*kind, value, Span { start, end }));
    } else {
        lexer.push(MK_TOKEN!(TokenKind::Identifier, value, Span { start, end }));
    }

    Ok(())
}

fn number_handler(lexer: &mut Lexer, _regex: Regex) -> Result<(), Error> {
    let start = lexer.position();
    let (length, kind) = scan_number(lexer.remainder(), &start)?;
    let value = lexer.remainder()[..length].to_string();

    lexer.advance_n(length);
    lexer.push(MK_TOKEN!(
        kind,
        value,
        Span {
            start,
            end: lexer.position()
        }
    ));
    Ok(())
}

/// Scans a numeric literal at the head of `text`, returning the lexeme
/// length and whether it is an integer or a float. A `0x`/`0b`/`0o` prefix
/// selects the radix; `_` separators may appear between digits but not at
/// the boundaries of a digit run.
fn scan_number(text: &str, start: &Position) -> Result<(usize, TokenKind), Error> {
    let malformed = || {
        Error::new(
            ErrorImpl::MalformedNumericLiteral {
                token: text.chars().take(8).collect(),
            },
            start.clone(),
        )
    };

    for (prefix, is_digit) in [
        ("0x", is_hex_digit as fn(char) -> bool),
        ("0b", is_binary_digit),
        ("0o", is_octal_digit),
    ] {
        if text.starts_with(prefix) {
            let run = scan_digit_run(&text[2..], is_digit);
            if run == 0 {
                return Err(malformed());
            }
            validate_digit_run(&text[2..2 + run]).ok_or_else(malformed)?;
            return Ok((2 + run, TokenKind::Integer));
        }
    }

    let int_run = scan_digit_run(text, |c| c.is_ascii_digit());
    validate_digit_run(&text[..int_run]).ok_or_else(malformed)?;

    let after_int = &text[int_run..];
    if after_int.starts_with('.')
        && after_int[1..].chars().next().is_some_and(|c| c.is_ascii_digit())
    {
        let frac_run = scan_digit_run(&after_int[1..], |c| c.is_ascii_digit());
        validate_digit_run(&after_int[1..1 + frac_run]).ok_or_else(malformed)?;
        return Ok((int_run + 1 + frac_run, TokenKind::Float));
    }

    Ok((int_run, TokenKind::Integer))
}

fn scan_digit_run(text: &str, is_digit: fn(char) -> bool) -> usize {
    text.chars()
        .take_while(|c| is_digit(*c) || *c == '_')
        .count()
}

fn validate_digit_run(run: &str) -> Option<()> {
    if run.is_empty() || run.starts_with('_') || run.ends_with('_') {
        None
    } else {
        Some(())
    }
}

fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

fn is_binary_digit(c: char) -> bool {
    c == '0' || c == '1'
}

fn is_octal_digit(c: char) -> bool {
    ('0'..='7').contains(&c)
}

fn decode_escape(c: char) -> Option<char> {
    match c {
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        '\\' => Some('\\'),
        '\'' => Some('\''),
        '"' => Some('"'),
        '0' => Some('\0'),
        _ => None,
    }
}

fn string_handler(lexer: &mut Lexer, _regex: Regex) -> Result<(), Error> {
    let start = lexer.position();
    lexer.advance_n(1);

    let mut parts: Vec<StringPart> = Vec::new();
    let mut text = String::new();

    loop {
        if lexer.at_eof() {
            return Err(Error::new(ErrorImpl::UnterminatedString, start));
        }

        let c = lexer.at();
        match c {
            '"' => {
                lexer.advance_n(1);
                break;
            }
            '\\' => {
                let escape_pos = lexer.position();
                lexer.advance_n(1);
                if lexer.at_eof() {
                    return Err(Error::new(ErrorImpl::UnterminatedString, start));
                }
                let e = lexer.at();
                let decoded = decode_escape(e).ok_or_else(|| {
                    Error::new(
                        ErrorImpl::InvalidEscapeSequence {
                            sequence: format!("\\{}", e),
                        },
                        escape_pos,
                    )
                })?;
                text.push(decoded);
                lexer.advance_n(e.len_utf8());
            }
            '$' if lexer.remainder().starts_with("${") => {
                if !text.is_empty() {
                    parts.push(StringPart::Text(std::mem::take(&mut text)));
                }
                lexer.advance_n(2);
                let segment = capture_interpolation(lexer, &start)?;
                parts.push(StringPart::Interpolation(segment));
            }
            _ => {
                text.push(c);
                lexer.advance_n(c.len_utf8());
            }
        }
    }

    if !text.is_empty() || parts.is_empty() {
        parts.push(StringPart::Text(text));
    }

    let value = parts
        .iter()
        .map(|part| match part {
            StringPart::Text(t) => t.clone(),
            StringPart::Interpolation(s) => format!("${{{}}}", s),
        })
        .collect::<String>();

    lexer.push(Token {
        kind: TokenKind::String,
        value,
        parts,
        span: Span {
            start,
            end: lexer.position(),
        },
    });
    Ok(())
}

/// Captures the raw source of an interpolation segment, starting just after
/// `${` and consuming up to the matching `}`. Braces inside nested string,
/// raw-string, and char literals do not affect the depth count; nested
/// interpolated strings are handled recursively.
fn capture_interpolation(lexer: &mut Lexer, string_start: &Position) -> Result<String, Error> {
    let mut depth = 1;
    let mut segment = String::new();

    loop {
        if lexer.at_eof() {
            return Err(Error::new(ErrorImpl::UnterminatedString, string_start.clone()));
        }

        let c = lexer.at();
        match c {
            '{' => {
                depth += 1;
                segment.push(c);
                lexer.advance_n(1);
            }
            '}' => {
                depth -= 1;
                lexer.advance_n(1);
                if depth == 0 {
                    return Ok(segment);
                }
                segment.push(c);
            }
            '"' => copy_string_literal(lexer, &mut segment, string_start)?,
            '`' | '\'' => copy_delimited(lexer, &mut segment, c, string_start)?,
            _ => {
                segment.push(c);
                lexer.advance_n(c.len_utf8());
            }
        }
    }
}

/// Copies a nested `"..."` literal verbatim into `out`, recursing through
/// any interpolations it contains so their braces stay balanced.
fn copy_string_literal(
    lexer: &mut Lexer,
    out: &mut String,
    string_start: &Position,
) -> Result<(), Error> {
    out.push('"');
    lexer.advance_n(1);

    loop {
        if lexer.at_eof() {
            return Err(Error::new(ErrorImpl::UnterminatedString, string_start.clone()));
        }

        let c = lexer.at();
        match c {
            '"' => {
                out.push(c);
                lexer.advance_n(1);
                return Ok(());
            }
            '\\' => {
                out.push(c);
                lexer.advance_n(1);
                if lexer.at_eof() {
                    return Err(Error::new(ErrorImpl::UnterminatedString, string_start.clone()));
                }
                let e = lexer.at();
                out.push(e);
                lexer.advance_n(e.len_utf8());
            }
            '$' if lexer.remainder().starts_with("${") => {
                out.push_str("${");
                lexer.advance_n(2);
                let inner = capture_interpolation(lexer, string_start)?;
                out.push_str(&inner);
                out.push('}');
            }
            _ => {
                out.push(c);
                lexer.advance_n(c.len_utf8());
            }
        }
    }
}

/// Copies a nested raw-string or char literal verbatim into `out`.
fn copy_delimited(
    lexer: &mut Lexer,
    out: &mut String,
    delim: char,
    string_start: &Position,
) -> Result<(), Error> {
    out.push(delim);
    lexer.advance_n(1);

    loop {
        if lexer.at_eof() {
            return Err(Error::new(ErrorImpl::UnterminatedString, string_start.clone()));
        }

        let c = lexer.at();
        if c == '\\' && delim == '\'' {
            out.push(c);
            lexer.advance_n(1);
            if lexer.at_eof() {
                return Err(Error::new(ErrorImpl::UnterminatedString, string_start.clone()));
            }
            let e = lexer.at();
            out.push(e);
            lexer.advance_n(e.len_utf8());
            continue;
        }

        out.push(c);
        lexer.advance_n(c.len_utf8());
        if c == delim {
            return Ok(());
        }
    }
}

fn raw_string_handler(lexer: &mut Lexer, _regex: Regex) -> Result<(), Error> {
    let start = lexer.position();
    lexer.advance_n(1);

    let mut content = String::new();
    loop {
        if lexer.at_eof() {
            return Err(Error::new(ErrorImpl::UnterminatedRawString, start));
        }

        let c = lexer.at();
        lexer.advance_n(c.len_utf8());
        if c == '`' {
            break;
        }
        content.push(c);
    }

    lexer.push(MK_TOKEN!(
        TokenKind::RawString,
        content,
        Span {
            start,
            end: lexer.position()
        }
    ));
    Ok(())
}

fn char_handler(lexer: &mut Lexer, _regex: Regex) -> Result<(), Error> {
    let start = lexer.position();
    lexer.advance_n(1);

    if lexer.at_eof() {
        return Err(Error::new(ErrorImpl::UnterminatedCharLiteral, start));
    }

    let c = lexer.at();
    let value = if c == '\\' {
        let escape_pos = lexer.position();
        lexer.advance_n(1);
        if lexer.at_eof() {
            return Err(Error::new(ErrorImpl::UnterminatedCharLiteral, start));
        }
        let e = lexer.at();
        let decoded = decode_escape(e).ok_or_else(|| {
            Error::new(
                ErrorImpl::InvalidEscapeSequence {
                    sequence: format!("\\{}", e),
                },
                escape_pos,
            )
        })?;
        lexer.advance_n(e.len_utf8());
        decoded
    } else if c == '\'' {
        // Empty char literal
        return Err(Error::new(ErrorImpl::UnterminatedCharLiteral, start));
    } else {
        lexer.advance_n(c.len_utf8());
        c
    };

    if lexer.at_eof() || lexer.at() != '\'' {
        return Err(Error::new(ErrorImpl::UnterminatedCharLiteral, start));
    }
    lexer.advance_n(1);

    lexer.push(MK_TOKEN!(
        TokenKind::Char,
        value.to_string(),
        Span {
            start,
            end: lexer.position()
        }
    ));
    Ok(())
}

fn block_comment_handler(lexer: &mut Lexer, _regex: Regex) -> Result<(), Error> {
    let start = lexer.position();
    lexer.advance_n(2);

    // Block comments do not nest
    loop {
        if lexer.at_eof() {
            return Err(Error::new(ErrorImpl::UnterminatedBlockComment, start));
        }
        if lexer.remainder().starts_with("*/") {
            lexer.advance_n(2);
            return Ok(());
        }
        let c = lexer.at();
        lexer.advance_n(c.len_utf8());
    }
}

pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);
    let patterns = lex.patterns.clone();

    while !lex.at_eof() {
        let mut matched = false;

        for pattern in patterns.iter() {
            let match_here = pattern.regex.find(lex.remainder());

            if match_here.is_some() && match_here.unwrap().start() == 0 {
                (pattern.handler)(&mut lex, pattern.regex.clone())?;
                matched = true;
                break;
            }
        }

        if !matched {
            return Err(Error::new(
                ErrorImpl::UnrecognisedToken {
                    token: lex.at().to_string(),
                },
                lex.position(),
            ));
        }
    }

    let eof_position = lex.position();
    lex.push(MK_TOKEN!(
        TokenKind::EOF,
        String::from("EOF"),
        Span {
            start: eof_position.clone(),
            end: eof_position
        }
    ));
    Ok(lex.tokens)
}
