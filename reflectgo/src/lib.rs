//! # reflectgo
//!
//! Generate Go type declarations from structural type descriptions.
//!
//! Describe a type's shape (structs, pointers, slices, maps, channels and
//! named references), register it under a name on a [`codegen::GoFile`], and
//! render a complete, `gofmt`-style Go source file with the import block
//! worked out for you.
//!
//! ## Quick Start
//!
//! ```
//! use reflectgo::prelude::*;
//!
//! let ty = TypeDesc::structure(vec![
//!     StructField::new("ID", TypeDesc::builtin("int64")).with_tag(r#"json:"id""#),
//!     StructField::new("Created", TypeDesc::named("time", "Time")),
//! ]);
//!
//! let mut file = GoFile::new("example.com/app")?;
//! file.define_type("Record", &ty)?;
//!
//! let source = file.render_to_string()?;
//! assert!(source.contains("import \"time\""));
//! # Ok::<(), CodegenError>(())
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Type descriptions, introspection interface and validation
//! - [`codegen`] - Type rendering, file registry and formatting

pub mod prelude;

/// Type descriptions and introspection.
pub mod schema {
    pub use reflectgo_schema::*;
}

/// Go source generation.
pub mod codegen {
    pub use reflectgo_codegen::*;
}
