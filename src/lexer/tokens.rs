use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    /// Reserved-word table. Word-shaped tokens are lexed as identifiers
    /// first and reclassified through this map, so keywords never collide
    /// with longer identifiers that merely start with one.
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("module", TokenKind::Module);
        map.insert("import", TokenKind::Import);
        map.insert("use", TokenKind::Use);
        map.insert("using", TokenKind::Using);
        map.insert("temp", TokenKind::Temp);
        map.insert("const", TokenKind::Const);
        map.insert("do", TokenKind::Do);
        map.insert("struct", TokenKind::Struct);
        map.insert("enum", TokenKind::Enum);
        map.insert("if", TokenKind::If);
        map.insert("or", TokenKind::OrKw);
        map.insert("otherwise", TokenKind::Otherwise);
        map.insert("for", TokenKind::For);
        map.insert("for_each", TokenKind::ForEach);
        map.insert("as_long_as", TokenKind::AsLongAs);
        map.insert("loop", TokenKind::Loop);
        map.insert("when", TokenKind::When);
        map.insert("is", TokenKind::Is);
        map.insert("default", TokenKind::Default);
        map.insert("return", TokenKind::Return);
        map.insert("break", TokenKind::Break);
        map.insert("continue", TokenKind::Continue);
        map.insert("ensure", TokenKind::Ensure);
        map.insert("private", TokenKind::Private);
        map.insert("new", TokenKind::New);
        map.insert("range", TokenKind::Range);
        map.insert("in", TokenKind::In);
        map.insert("not_in", TokenKind::NotIn);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("nil", TokenKind::Nil);
        map.insert("map", TokenKind::Map);

        for name in PRIMITIVE_TYPE_NAMES {
            map.insert(*name, TokenKind::PrimitiveType);
        }

        map
    };
}

/// The fixed set of primitive type names. These are reserved words; the
/// token's value distinguishes which one was written.
pub const PRIMITIVE_TYPE_NAMES: &[&str] = &[
    "int", "i8", "i16", "i32", "i64", "i128", "i256", "uint", "u8", "u16", "u32", "u64", "u128",
    "u256", "float", "f32", "f64", "bool", "char", "byte", "string",
];

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Integer,
    Float,
    String,
    RawString,
    Char,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,  // ||
    And, // &&

    Dot,
    Comma,
    Colon,
    Arrow,
    At,
    Ampersand,

    PlusPlus,
    MinusMinus,
    PlusEquals,
    MinusEquals,
    StarEquals,
    SlashEquals,
    PercentEquals,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,

    // Reserved
    Module,
    Import,
    Use,
    Using,
    Temp,
    Const,
    Do,
    Struct,
    Enum,
    If,
    OrKw, // else-if clause keyword `or`
    Otherwise,
    For,
    ForEach,
    AsLongAs,
    Loop,
    When,
    Is,
    Default,
    Return,
    Break,
    Continue,
    Ensure,
    Private,
    New,
    Range,
    In,
    NotIn,
    True,
    False,
    Nil,
    Map,
    PrimitiveType,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// One segment of a string literal's content. Interpolation segments hold
/// the raw source text between `${` and its matching `}`; the parser
/// re-tokenizes and parses that text into an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum StringPart {
    Text(String),
    Interpolation(String),
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    /// Ordered segments for TokenKind::String tokens; empty otherwise.
    pub parts: Vec<StringPart>,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    fn is_one_of_many(&self, tokens: Vec<TokenKind>) -> bool {
        for token in tokens {
            if token == self.kind {
                return true;
            }
        }

        false
    }

    pub fn debug(&self) {
        if self.is_one_of_many(vec![
            TokenKind::String,
            TokenKind::RawString,
            TokenKind::Char,
            TokenKind::Identifier,
            TokenKind::Integer,
            TokenKind::Float,
            TokenKind::PrimitiveType,
        ]) {
            println!("{} ({})", self.kind, self.value);
        } else {
            println!("{} ()", self.kind);
        }
    }
}
