//! # reflectgo Schema
//!
//! Structural descriptions of Go types.
//!
//! This crate provides:
//! - A hand-built type description model (`TypeDesc`) covering named types,
//!   pointers, slices, arrays, maps, channels, structs, interfaces and funcs
//! - The `TypeInfo` introspection interface consumed by the code generator
//! - Struct tag lookup and Go lexical helpers
//! - Validation for hand-built descriptions

pub mod error;
pub mod introspect;
pub mod names;
pub mod types;
pub mod validation;

pub use error::SchemaError;
pub use introspect::{FieldRef, MethodRef, TypeInfo};
pub use names::{is_identifier, is_keyword, package_ident, quote, unquote};
pub use types::{
    ChanDir, FuncType, InterfaceType, Method, NamedType, StructField, StructTag, StructType,
    TypeDesc, TypeKind,
};
pub use validation::validate_type;
