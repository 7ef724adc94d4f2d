use std::any::Any;

use crate::{lexer::tokens::Token, Span};

use super::ast::{Expr, ExprType, ExprWrapper};

// LITERALS

/// The radix a numeric literal was written in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Radix {
    Decimal,
    Hexadecimal,
    Binary,
    Octal,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NumberValue {
    Integer { value: i64, radix: Radix },
    Float(f64),
}

/// Number Expression
/// Represents a numeric literal in the AST. Integers remember the radix
/// they were written in.
#[derive(Debug, Clone)]
pub struct NumberExpr {
    pub value: NumberValue,
    pub span: Span,
}

impl Expr for NumberExpr {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_expr_type(&self) -> ExprType {
        ExprType::Number
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &crate::Span {
        &self.span
    }
}

/// One segment of an interpolated string: either literal text (escapes
/// already decoded) or an embedded expression.
#[derive(Debug, Clone)]
pub enum StringSegment {
    Text(String),
    Interpolation(ExprWrapper),
}

/// String Expression
/// Represents a string literal in the AST, split into text and
/// interpolation segments in source order.
#[derive(Debug, Clone)]
pub struct StringExpr {
    pub segments: Vec<StringSegment>,
    pub span: Span,
}

impl Expr for StringExpr {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_expr_type(&self) -> ExprType {
        ExprType::String
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &crate::Span {
        &self.span
    }
}

/// Raw String Expression
/// Represents a backtick string literal, kept verbatim with no escape or
/// interpolation processing.
#[derive(Debug, Clone)]
pub struct RawStringExpr {
    pub value: String,
    pub span: Span,
}

impl Expr for RawStringExpr {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_expr_type(&self) -> ExprType {
        ExprType::RawString
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &crate::Span {
        &self.span
    }
}

/// Char Expression
#[derive(Debug, Clone)]
pub struct CharExpr {
    pub value: char,
    pub span: Span,
}

impl Expr for CharExpr {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_expr_type(&self) -> ExprType {
        ExprType::Char
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &crate::Span {
        &self.span
    }
}

/// Boolean Expression
#[derive(Debug, Clone)]
pub struct BooleanExpr {
    pub value: bool,
    pub span: Span,
}

impl Expr for BooleanExpr {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_expr_type(&self) -> ExprType {
        ExprType::Boolean
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &crate::Span {
        &self.span
    }
}

/// Nil Expression
#[derive(Debug, Clone)]
pub struct NilExpr {
    pub span: Span,
}

impl Expr for NilExpr {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_expr_type(&self) -> ExprType {
        ExprType::Nil
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &crate::Span {
        &self.span
    }
}

/// Symbol Expression
/// Represents an identifier in the AST. This includes functions.
#[derive(Debug, Clone)]
pub struct SymbolExpr {
    pub value: String,
    pub span: Span,
}

impl Expr for SymbolExpr {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_expr_type(&self) -> ExprType {
        ExprType::Symbol
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &crate::Span {
        &self.span
    }
}

/// Array Literal Expression
/// Represents `{a, b, c}` where the braced form resolved to an array.
#[derive(Debug, Clone)]
pub struct ArrayLiteralExpr {
    pub elements: Vec<ExprWrapper>,
    pub span: Span,
}

impl Expr for ArrayLiteralExpr {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_expr_type(&self) -> ExprType {
        ExprType::ArrayLiteral
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &crate::Span {
        &self.span
    }
}

/// Map Literal Expression
/// Represents `{k: v, ...}` where the braced form resolved to a map.
/// Entries keep source order.
#[derive(Debug, Clone)]
pub struct MapLiteralExpr {
    pub entries: Vec<(ExprWrapper, ExprWrapper)>,
    pub span: Span,
}

impl Expr for MapLiteralExpr {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_expr_type(&self) -> ExprType {
        ExprType::MapLiteral
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &crate::Span {
        &self.span
    }
}

/// Struct Literal Expression
/// Represents `Name { field: value, ... }`.
#[derive(Debug, Clone)]
pub struct StructLiteralExpr {
    pub name: String,
    pub fields: Vec<(String, ExprWrapper)>,
    pub span: Span,
}

impl Expr for StructLiteralExpr {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_expr_type(&self) -> ExprType {
        ExprType::StructLiteral
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &crate::Span {
        &self.span
    }
}

// COMPLEX

/// Binary Expression
/// Represents a binary operation between two expressions in the AST.
#[derive(Debug, Clone)]
pub struct BinaryExpr {
    pub left: ExprWrapper,
    pub operator: Token,
    pub right: ExprWrapper,
    pub span: Span,
}

impl Expr for BinaryExpr {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_expr_type(&self) -> ExprType {
        ExprType::Binary
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &crate::Span {
        &self.span
    }
}

/// Prefix Expression
/// Represents a prefix operation on an expression in the AST.
#[derive(Debug, Clone)]
pub struct PrefixExpr {
    pub operator: Token,
    pub right_expr: ExprWrapper,
    pub span: Span,
}

impl Expr for PrefixExpr {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_expr_type(&self) -> ExprType {
        ExprType::Prefix
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &crate::Span {
        &self.span
    }
}

/// Grouped Expression
/// Represents a parenthesised expression. Kept as its own node so spans
/// cover the parentheses.
#[derive(Debug, Clone)]
pub struct GroupedExpr {
    pub inner: ExprWrapper,
    pub span: Span,
}

impl Expr for GroupedExpr {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_expr_type(&self) -> ExprType {
        ExprType::Grouped
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &crate::Span {
        &self.span
    }
}

/// Call Expression
/// Represents a function call in the AST.
#[derive(Debug, Clone)]
pub struct CallExpr {
    pub callee: ExprWrapper,
    pub arguments: Vec<ExprWrapper>,
    pub span: Span,
}

impl Expr for CallExpr {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_expr_type(&self) -> ExprType {
        ExprType::Call
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &crate::Span {
        &self.span
    }
}

/// Member Expression
/// Represents `object.property` access in the AST.
#[derive(Debug, Clone)]
pub struct MemberExpr {
    pub object: ExprWrapper,
    pub property: String,
    pub span: Span,
}

impl Expr for MemberExpr {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_expr_type(&self) -> ExprType {
        ExprType::Member
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &crate::Span {
        &self.span
    }
}

/// Index Expression
/// Represents `object[index]` access in the AST.
#[derive(Debug, Clone)]
pub struct IndexExpr {
    pub object: ExprWrapper,
    pub index: ExprWrapper,
    pub span: Span,
}

impl Expr for IndexExpr {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_expr_type(&self) -> ExprType {
        ExprType::Index
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &crate::Span {
        &self.span
    }
}

/// New Expression
/// Represents `new Name` or `new Name { field: value, ... }`. `fields` is
/// `None` when no initialiser braces are given.
#[derive(Debug, Clone)]
pub struct NewExpr {
    pub name: String,
    pub fields: Option<Vec<(String, ExprWrapper)>>,
    pub span: Span,
}

impl Expr for NewExpr {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_expr_type(&self) -> ExprType {
        ExprType::New
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &crate::Span {
        &self.span
    }
}

/// Range Expression
/// Represents `range(end)`, `range(start, end)` or
/// `range(start, step, end)`.
#[derive(Debug, Clone)]
pub struct RangeExpr {
    pub start: Option<ExprWrapper>,
    pub step: Option<ExprWrapper>,
    pub end: ExprWrapper,
    pub span: Span,
}

impl Expr for RangeExpr {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_expr_type(&self) -> ExprType {
        ExprType::Range
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &crate::Span {
        &self.span
    }
}
