//! Type annotation definitions for the AST.
//!
//! This module defines the syntactic type annotations of the language:
//!
//! - Primitive types (sized integers, floats, bool, char, byte, string)
//! - Array types `[T]` and `[T, N]`
//! - Map types `map[K:V]`
//! - Named type references
//!
//! Annotations are purely syntactic here; no resolution or checking is
//! performed on them.

use std::{any::Any, fmt::Display};

use crate::Position;

use super::ast::{Type, TypeType, TypeWrapper};

/// The built-in primitive type names.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Int,
    I8,
    I16,
    I32,
    I64,
    I128,
    I256,
    Uint,
    U8,
    U16,
    U32,
    U64,
    U128,
    U256,
    Float,
    F32,
    F64,
    Bool,
    Char,
    Byte,
    String,
}

impl Primitive {
    pub fn from_name(name: &str) -> Option<Primitive> {
        match name {
            "int" => Some(Primitive::Int),
            "i8" => Some(Primitive::I8),
            "i16" => Some(Primitive::I16),
            "i32" => Some(Primitive::I32),
            "i64" => Some(Primitive::I64),
            "i128" => Some(Primitive::I128),
            "i256" => Some(Primitive::I256),
            "uint" => Some(Primitive::Uint),
            "u8" => Some(Primitive::U8),
            "u16" => Some(Primitive::U16),
            "u32" => Some(Primitive::U32),
            "u64" => Some(Primitive::U64),
            "u128" => Some(Primitive::U128),
            "u256" => Some(Primitive::U256),
            "float" => Some(Primitive::Float),
            "f32" => Some(Primitive::F32),
            "f64" => Some(Primitive::F64),
            "bool" => Some(Primitive::Bool),
            "char" => Some(Primitive::Char),
            "byte" => Some(Primitive::Byte),
            "string" => Some(Primitive::String),
            _ => None,
        }
    }
}

impl Display for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Primitive::Int => "int",
            Primitive::I8 => "i8",
            Primitive::I16 => "i16",
            Primitive::I32 => "i32",
            Primitive::I64 => "i64",
            Primitive::I128 => "i128",
            Primitive::I256 => "i256",
            Primitive::Uint => "uint",
            Primitive::U8 => "u8",
            Primitive::U16 => "u16",
            Primitive::U32 => "u32",
            Primitive::U64 => "u64",
            Primitive::U128 => "u128",
            Primitive::U256 => "u256",
            Primitive::Float => "float",
            Primitive::F32 => "f32",
            Primitive::F64 => "f64",
            Primitive::Bool => "bool",
            Primitive::Char => "char",
            Primitive::Byte => "byte",
            Primitive::String => "string",
        };
        write!(f, "{}", name)
    }
}

/// A primitive type annotation.
#[derive(Debug, Clone)]
pub struct PrimitiveType {
    pub primitive: Primitive,
    pub position: Position,
}

impl Type for PrimitiveType {
    fn clone_wrapper(&self) -> TypeWrapper {
        TypeWrapper::new(self.clone())
    }
    fn get_type_type(&self) -> TypeType {
        TypeType::Primitive(self.primitive)
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// An array type annotation, `[T]` or `[T, N]` with a fixed size.
#[derive(Debug, Clone)]
pub struct ArrayType {
    pub element: TypeWrapper,
    pub size: Option<u64>,
}

impl Type for ArrayType {
    fn clone_wrapper(&self) -> TypeWrapper {
        TypeWrapper::new(self.clone())
    }
    fn get_type_type(&self) -> TypeType {
        TypeType::Array
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A map type annotation, `map[K:V]`.
#[derive(Debug, Clone)]
pub struct MapType {
    pub key: TypeWrapper,
    pub value: TypeWrapper,
}

impl Type for MapType {
    fn clone_wrapper(&self) -> TypeWrapper {
        TypeWrapper::new(self.clone())
    }
    fn get_type_type(&self) -> TypeType {
        TypeType::Map
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A named type reference, such as a struct or enum name. Resolution is
/// left to later stages.
#[derive(Debug, Clone)]
pub struct SymbolType {
    pub name: String,
    pub position: Position,
}

impl SymbolType {
    pub fn get_position(&self) -> Position {
        self.position.clone()
    }
}

impl Type for SymbolType {
    fn clone_wrapper(&self) -> TypeWrapper {
        TypeWrapper::new(self.clone())
    }
    fn get_type_type(&self) -> TypeType {
        TypeType::Symbol(self.name.clone())
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}
