use std::{
    any::Any,
    slice::{Iter, IterMut},
};

use crate::{lexer::tokens::Token, Span};

use super::ast::{ExprWrapper, Stmt, StmtType, StmtWrapper, TypeWrapper};

#[derive(Debug, Clone)]
pub struct BlockStmt {
    pub body: Vec<StmtWrapper>,
    pub id: i32,
    pub span: Span,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, StmtWrapper> {
        self.body.iter()
    }
    pub fn iter_mut(&mut self) -> IterMut<'_, StmtWrapper> {
        self.body.iter_mut()
    }
}

impl Stmt for BlockStmt {
    fn get_stmt_type(&self) -> StmtType {
        StmtType::BlockStmt
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> StmtWrapper {
        StmtWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

#[derive(Debug, Clone)]
pub struct ExpressionStmt {
    pub expression: ExprWrapper,
    pub span: Span,
}

impl Stmt for ExpressionStmt {
    fn get_stmt_type(&self) -> StmtType {
        StmtType::ExpressionStmt
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> StmtWrapper {
        StmtWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

/// `module name`. At most one per source unit, and only at the top.
#[derive(Debug, Clone)]
pub struct ModuleDeclStmt {
    pub name: String,
    pub span: Span,
}

impl Stmt for ModuleDeclStmt {
    fn get_stmt_type(&self) -> StmtType {
        StmtType::ModuleDeclStmt
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> StmtWrapper {
        StmtWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

/// A single import target: either a `@package` or a `"path"` string.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportPath {
    Package(String),
    Path(String),
}

/// `import @std, "lib/maths.ez"`, optionally `import & use ...` which
/// brings every imported module's names into scope.
#[derive(Debug, Clone)]
pub struct ImportStmt {
    pub paths: Vec<ImportPath>,
    pub and_use: bool,
    pub span: Span,
}

impl Stmt for ImportStmt {
    fn get_stmt_type(&self) -> StmtType {
        StmtType::ImportStmt
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> StmtWrapper {
        StmtWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

/// `using name, name` - brings already-imported module names into scope.
#[derive(Debug, Clone)]
pub struct UsingStmt {
    pub names: Vec<String>,
    pub span: Span,
}

impl Stmt for UsingStmt {
    fn get_stmt_type(&self) -> StmtType {
        StmtType::UsingStmt
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> StmtWrapper {
        StmtWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

/// `private? (temp|const) name type? (= expr)?`. Both the type annotation
/// and the initialiser are optional at the syntax level.
#[derive(Debug, Clone)]
pub struct VarDeclStmt {
    pub identifier: String,
    pub is_private: bool,
    pub is_constant: bool,
    pub explicit_type: Option<TypeWrapper>,
    pub assigned_value: Option<ExprWrapper>,
    pub span: Span,
}

impl Stmt for VarDeclStmt {
    fn get_stmt_type(&self) -> StmtType {
        StmtType::VarDeclStmt
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> StmtWrapper {
        StmtWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

/// A function parameter. `by_ref` marks a `&name` pass-by-reference
/// parameter.
#[derive(Debug, Clone)]
pub struct Parameter {
    pub by_ref: bool,
    pub name: String,
    pub declared_type: TypeWrapper,
}

/// `private? do name(params) -> T { ... }`. Multiple return types are
/// written `-> (T, U)`; an absent arrow means no declared returns.
#[derive(Debug, Clone)]
pub struct FnDeclStmt {
    pub identifier: String,
    pub is_private: bool,
    pub parameters: Vec<Parameter>,
    pub return_types: Vec<TypeWrapper>,
    pub body: BlockStmt,
    pub span: Span,
}

impl Stmt for FnDeclStmt {
    fn get_stmt_type(&self) -> StmtType {
        StmtType::FnDeclStmt
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> StmtWrapper {
        StmtWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

/// One field line of a struct declaration: one or more names followed by
/// their shared type, `x, y float`.
#[derive(Debug, Clone)]
pub struct StructFieldDecl {
    pub names: Vec<String>,
    pub field_type: TypeWrapper,
}

/// `const Name struct { fields }`.
#[derive(Debug, Clone)]
pub struct StructDeclStmt {
    pub name: String,
    pub fields: Vec<StructFieldDecl>,
    pub span: Span,
}

impl Stmt for StructDeclStmt {
    fn get_stmt_type(&self) -> StmtType {
        StmtType::StructDeclStmt
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> StmtWrapper {
        StmtWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

/// `@(name, args...)` attached to an enum or when statement.
#[derive(Debug, Clone)]
pub struct AttributeNode {
    pub name: String,
    pub arguments: Vec<ExprWrapper>,
    pub span: Span,
}

/// One enum entry, with an optional explicit value: `Red = 1`.
#[derive(Debug, Clone)]
pub struct EnumValue {
    pub name: String,
    pub value: Option<ExprWrapper>,
}

/// `@(attr)? const Name enum { A = 1 B }`.
#[derive(Debug, Clone)]
pub struct EnumDeclStmt {
    pub attribute: Option<AttributeNode>,
    pub name: String,
    pub values: Vec<EnumValue>,
    pub span: Span,
}

impl Stmt for EnumDeclStmt {
    fn get_stmt_type(&self) -> StmtType {
        StmtType::EnumDeclStmt
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> StmtWrapper {
        StmtWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

/// An `or condition { ... }` clause of an if statement.
#[derive(Debug, Clone)]
pub struct OrClause {
    pub condition: ExprWrapper,
    pub body: BlockStmt,
}

/// `if cond { } or cond { } otherwise { }`. All `or` clauses come before
/// the optional `otherwise`.
#[derive(Debug, Clone)]
pub struct IfStmt {
    pub condition: ExprWrapper,
    pub body: BlockStmt,
    pub or_clauses: Vec<OrClause>,
    pub otherwise: Option<BlockStmt>,
    pub span: Span,
}

impl Stmt for IfStmt {
    fn get_stmt_type(&self) -> StmtType {
        StmtType::IfStmt
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> StmtWrapper {
        StmtWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

/// `for x in expr { }` / `for_each x in expr { }`. The optional header
/// parentheses are not recorded; `each` distinguishes the two keywords.
#[derive(Debug, Clone)]
pub struct ForStmt {
    pub each: bool,
    pub variable: String,
    pub declared_type: Option<TypeWrapper>,
    pub iterable: ExprWrapper,
    pub body: BlockStmt,
    pub span: Span,
}

impl Stmt for ForStmt {
    fn get_stmt_type(&self) -> StmtType {
        StmtType::ForStmt
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> StmtWrapper {
        StmtWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

/// `as_long_as cond { }` - the while loop.
#[derive(Debug, Clone)]
pub struct AsLongAsStmt {
    pub condition: ExprWrapper,
    pub body: BlockStmt,
    pub span: Span,
}

impl Stmt for AsLongAsStmt {
    fn get_stmt_type(&self) -> StmtType {
        StmtType::AsLongAsStmt
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> StmtWrapper {
        StmtWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

/// `loop { }` - loops until broken out of.
#[derive(Debug, Clone)]
pub struct LoopStmt {
    pub body: BlockStmt,
    pub span: Span,
}

impl Stmt for LoopStmt {
    fn get_stmt_type(&self) -> StmtType {
        StmtType::LoopStmt
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> StmtWrapper {
        StmtWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

/// An `is pattern { }` arm of a when statement.
#[derive(Debug, Clone)]
pub struct IsArm {
    pub pattern: ExprWrapper,
    pub body: BlockStmt,
}

/// `@(attr)? when subject { is pattern { } default { } }`. The `default`
/// arm, if present, comes last.
#[derive(Debug, Clone)]
pub struct WhenStmt {
    pub attribute: Option<AttributeNode>,
    pub subject: ExprWrapper,
    pub arms: Vec<IsArm>,
    pub default_arm: Option<BlockStmt>,
    pub span: Span,
}

impl Stmt for WhenStmt {
    fn get_stmt_type(&self) -> StmtType {
        StmtType::WhenStmt
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> StmtWrapper {
        StmtWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

/// `return a, b` - zero or more comma-separated values.
#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub values: Vec<ExprWrapper>,
    pub span: Span,
}

impl Stmt for ReturnStmt {
    fn get_stmt_type(&self) -> StmtType {
        StmtType::ReturnStmt
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> StmtWrapper {
        StmtWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

#[derive(Debug, Clone)]
pub struct BreakStmt {
    pub span: Span,
}

impl Stmt for BreakStmt {
    fn get_stmt_type(&self) -> StmtType {
        StmtType::BreakStmt
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> StmtWrapper {
        StmtWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

#[derive(Debug, Clone)]
pub struct ContinueStmt {
    pub span: Span,
}

impl Stmt for ContinueStmt {
    fn get_stmt_type(&self) -> StmtType {
        StmtType::ContinueStmt
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> StmtWrapper {
        StmtWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

/// `ensure call()` - defers the call to scope exit. The target must be a
/// call expression.
#[derive(Debug, Clone)]
pub struct EnsureStmt {
    pub call: ExprWrapper,
    pub span: Span,
}

impl Stmt for EnsureStmt {
    fn get_stmt_type(&self) -> StmtType {
        StmtType::EnsureStmt
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> StmtWrapper {
        StmtWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

/// `assignee op value` where op is one of `=`, `+=`, `-=`, `*=`, `/=`
/// or `%=`.
#[derive(Debug, Clone)]
pub struct AssignmentStmt {
    pub assignee: ExprWrapper,
    pub operator: Token,
    pub value: ExprWrapper,
    pub span: Span,
}

impl Stmt for AssignmentStmt {
    fn get_stmt_type(&self) -> StmtType {
        StmtType::AssignmentStmt
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> StmtWrapper {
        StmtWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}
