use std::{env, fs::read_to_string, process::exit, rc::Rc, time::Instant};

use ez_parser::{display_error, lexer::lexer::tokenize, parser::parser::parse};

fn main() {
    let args: Vec<String> = env::args().collect();

    let dump_tokens = args.iter().any(|arg| arg == "--tokens");
    let file_path = match args.iter().skip(1).find(|arg| !arg.starts_with("--")) {
        Some(path) => path.clone(),
        None => {
            eprintln!("Usage: ez-parser [--tokens] <file.ez>");
            exit(2);
        }
    };

    let file_name = if file_path.contains('/') {
        file_path.split('/').last().unwrap()
    } else {
        &file_path
    };

    let file_contents = read_to_string(&file_path).expect("Failed to read file!");

    let start = Instant::now();
    let tokens = match tokenize(file_contents.clone(), Some(String::from(file_name))) {
        Ok(tokens) => tokens,
        Err(error) => {
            display_error(error, &file_path, &file_contents);
            exit(1);
        }
    };

    println!("Tokenized in {:?}", start.elapsed());

    if dump_tokens {
        for token in &tokens {
            token.debug();
        }
    }

    let parse_start = Instant::now();
    let (_, result) = parse(tokens, Rc::new(String::from(file_name)));

    println!("Parsed in {:?}", parse_start.elapsed());
    println!("Total time: {:?}", start.elapsed());

    match result {
        Ok(ast) => {
            println!("{}", pretty_print(format!("{:?}", ast)));
        }
        Err(error) => {
            display_error(error, &file_path, &file_contents);
            exit(1);
        }
    }
}

fn pretty_print(string: String) -> String {
    let mut result = String::new();
    let mut indent = 0;
    let mut ignore_next_space = false;

    for c in string.chars() {
        match c {
            '{' => {
                indent += 1;
                result.push(c);
                result.push('\n');
                result.push_str(&"  ".repeat(indent));
                ignore_next_space = true;
            }
            '(' | '[' => {
                indent += 1;
                result.push(c);
                result.push('\n');
                result.push_str(&"  ".repeat(indent));
            }
            '}' | ')' | ']' => {
                indent -= 1;
                result.push('\n');
                result.push_str(&"  ".repeat(indent));
                result.push(c);
            }
            ',' => {
                result.push(c);
                result.push('\n');
                result.push_str(&"  ".repeat(indent));
                ignore_next_space = true;
            }
            ' ' if ignore_next_space => {
                ignore_next_space = false;
            }
            _ => result.push(c),
        }
    }

    result
}
