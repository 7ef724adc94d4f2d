#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// A location in a source unit: byte offset plus 1-based line/column.
#[derive(Debug, Clone)]
pub struct Position {
    pub offset: u32,
    pub line: u32,
    pub column: u32,
    pub file: Rc<String>,
}

impl Position {
    pub fn new(offset: u32, line: u32, column: u32, file: Rc<String>) -> Self {
        Position {
            offset,
            line,
            column,
            file,
        }
    }

    pub fn null() -> Self {
        Position {
            offset: 0,
            line: 1,
            column: 1,
            file: Rc::new(String::from("<null>")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Tokenizes and parses a single source unit in one call.
///
/// This is the main entry point for consumers that do not need the raw
/// token stream. Fail-fast: the first lex or parse error aborts the parse
/// and is returned with its source position.
pub fn parse_source(
    source: String,
    file: Option<String>,
) -> Result<ast::statements::BlockStmt, Error> {
    let file_name = file.unwrap_or_else(|| String::from("shell"));
    let tokens = lexer::lexer::tokenize(source, Some(file_name.clone()))?;
    let (_, result) = parser::parser::parse(tokens, Rc::new(file_name));
    result
}

pub fn get_line_at_position(source: &str, position: u32) -> (usize, String, usize) {
    let pos = (position as usize).min(source.len().saturating_sub(1));

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return (line_number, line.to_string(), line_pos);
        }

        start = end;
        line_number += 1;
    }

    (line_number, String::new(), 0)
}

pub fn display_error(error: Error, file_name: &str, source: &str) {
    /*
        error: message
        -> main.ez
           |
        20 | temp a = #
           | ---------^
    */

    let position = error.get_position();
    let (line, line_text, line_pos) = get_line_at_position(source, position.offset);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    if let ErrorTip::None = error.get_tip() {
        println!("Error: {}", error.get_error_name());
    } else {
        println!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    println!("-> {}:{}:{}", file_name, position.line, position.column);
    println!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    println!("{} | {}", line_string, line_text_removed.trim());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    println!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_get_line_at_position() {
        let source = "temp a = 1\ntemp b = 2\n";

        let (line_number, line, line_pos) = super::get_line_at_position(source, 5);
        assert_eq!(line_number, 1);
        assert_eq!(line, "temp a = 1\n");
        assert_eq!(line_pos, 5);

        let (line_number, line, line_pos) = super::get_line_at_position(source, 16);
        assert_eq!(line_number, 2);
        assert_eq!(line, "temp b = 2\n");
        assert_eq!(line_pos, 5);
    }

    #[test]
    fn test_parse_source_entry_point() {
        let result = super::parse_source("temp x = 1 + 2".to_string(), None);
        assert!(result.is_ok());
        assert_eq!(result.unwrap().body.len(), 1);
    }
}
