//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```
//! use reflectgo::prelude::*;
//! ```

// Schema types
pub use reflectgo_schema::{
    ChanDir, FuncType, Method, NamedType, SchemaError, StructField, StructTag, TypeDesc,
    TypeInfo, TypeKind,
};

// Codegen types
pub use reflectgo_codegen::{
    CodegenError, DEFAULT_COMMENT_LINE_WRAP, GoFile, GoFileBuilder, TypeDecl, TypeOptions,
    render_type,
};
