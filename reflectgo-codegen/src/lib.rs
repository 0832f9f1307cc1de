//! # reflectgo Codegen
//!
//! Go source generation from structural type descriptions.
//!
//! This crate provides:
//! - Type definition rendering with package qualification and import tracking
//! - A `GoFile` registry of named declarations for one package
//! - File assembly with wrapped comments and a canonical import block
//! - `gofmt`-style layout and validation of the assembled source

pub mod error;
pub mod go;
pub mod gofile;

pub use error::CodegenError;
pub use go::{CommentWrapper, DEFAULT_COMMENT_LINE_WRAP, TypeRenderer, format_source};
pub use gofile::{GoFile, GoFileBuilder, TypeDecl, TypeOptions};

use reflectgo_schema::TypeInfo;

/// Renders a single type declaration as a complete Go file.
///
/// # Arguments
/// * `pkg_path` - Import path of the package owning the file
/// * `name` - Declaration name
/// * `ty` - Type description
///
/// # Returns
/// Formatted Go source as a string.
///
/// # Errors
/// Returns `CodegenError` if the file cannot be created, the declaration is
/// rejected, or formatting fails.
pub fn render_type<T: TypeInfo + ?Sized>(
    pkg_path: &str,
    name: &str,
    ty: &T,
) -> Result<String, CodegenError> {
    let mut file = GoFile::new(pkg_path)?;
    file.define_type(name, ty)?;
    file.render_to_string()
}
