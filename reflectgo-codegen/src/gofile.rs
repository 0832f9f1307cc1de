//! Generated Go file.
//!
//! A [`GoFile`] collects named type declarations for one package and renders
//! them as a single formatted source file.
//!
//! A `GoFile` has no internal synchronization. Concurrent `define_type`
//! calls on the same file must be serialized by the caller.

use crate::error::CodegenError;
use crate::go::{
    CommentWrapper, DEFAULT_COMMENT_LINE_WRAP, DeclLayout, FileLayout, TypeRenderer,
    format_source,
};
use reflectgo_schema::{TypeInfo, is_identifier, package_ident, validate_type};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::path::Path;

/// A named type declaration stored in a [`GoFile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    name: String,
    comment: Option<String>,
    definition: String,
}

impl TypeDecl {
    /// Returns the declaration name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the doc comment, if any.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref().filter(|comment| !comment.is_empty())
    }

    /// Returns the rendered definition, the text after `type <Name> `.
    #[must_use]
    pub fn definition(&self) -> &str {
        &self.definition
    }
}

/// Per-declaration options.
#[derive(Debug, Clone, Default)]
pub struct TypeOptions {
    comment: Option<String>,
    validate: bool,
}

impl TypeOptions {
    /// Creates default options: no comment, no validation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a doc comment. The text is wrapped when the file renders.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Validates the type description before rendering it.
    ///
    /// Descriptions from a runtime introspection source are well formed.
    /// Enable this for hand-built ones.
    #[must_use]
    pub fn validated(mut self) -> Self {
        self.validate = true;
        self
    }
}

/// A Go source file under construction.
#[derive(Debug, Clone)]
pub struct GoFile {
    pkg_path: String,
    package_name: String,
    package_comment: String,
    preamble: String,
    comment_line_wrap: usize,
    wrapper: CommentWrapper,
    imports: Vec<String>,
    types: BTreeMap<String, TypeDecl>,
}

impl GoFile {
    /// Creates a file for `pkg_path` with default settings.
    ///
    /// # Errors
    /// Returns `CodegenError::EmptyPackagePath` if `pkg_path` is empty, or
    /// `CodegenError::InvalidPackageName` if its last segment is not an
    /// identifier.
    pub fn new(pkg_path: impl Into<String>) -> Result<Self, CodegenError> {
        Self::builder(pkg_path).build()
    }

    /// Creates a builder for a file owned by `pkg_path`.
    #[must_use]
    pub fn builder(pkg_path: impl Into<String>) -> GoFileBuilder {
        GoFileBuilder::new(pkg_path)
    }

    /// Defines a named type.
    ///
    /// # Errors
    /// Returns `CodegenError::DuplicateDeclaration` if `name` is already
    /// defined, `CodegenError::InvalidDeclarationName` if it is not an
    /// identifier, or `CodegenError::InvalidPackageQualifier` if a referenced
    /// package would be qualified by a non-identifier. The file is left
    /// unchanged on error.
    pub fn define_type<T: TypeInfo + ?Sized>(
        &mut self,
        name: impl Into<String>,
        ty: &T,
    ) -> Result<(), CodegenError> {
        self.define_type_with(name, ty, TypeOptions::new())
    }

    /// Defines a named type with options.
    ///
    /// # Errors
    /// As [`GoFile::define_type`], plus `CodegenError::Schema` when
    /// validation is enabled and the description is malformed.
    pub fn define_type_with<T: TypeInfo + ?Sized>(
        &mut self,
        name: impl Into<String>,
        ty: &T,
        options: TypeOptions,
    ) -> Result<(), CodegenError> {
        let name = name.into();
        if self.types.contains_key(&name) {
            return Err(CodegenError::DuplicateDeclaration { name });
        }

        let (decl, imports) = prepare_decl(&self.pkg_path, name, ty, options)?;
        self.insert(decl, imports);
        Ok(())
    }

    fn insert(&mut self, decl: TypeDecl, imports: Vec<String>) {
        tracing::debug!(
            "Defined type {} in {} ({} imports)",
            decl.name,
            self.pkg_path,
            imports.len()
        );
        self.imports.extend(imports);
        self.types.insert(decl.name.clone(), decl);
    }

    /// Returns the owning package path.
    #[must_use]
    pub fn pkg_path(&self) -> &str {
        &self.pkg_path
    }

    /// Returns the package clause name.
    #[must_use]
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    /// Returns the comment line wrap limit.
    #[must_use]
    pub fn comment_line_wrap(&self) -> usize {
        self.comment_line_wrap
    }

    /// Returns the import paths, sorted and deduplicated.
    #[must_use]
    pub fn imports(&self) -> Vec<&str> {
        self.imports
            .iter()
            .map(String::as_str)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Returns the declarations in alphabetical order.
    pub fn declarations(&self) -> impl Iterator<Item = &TypeDecl> {
        self.types.values()
    }

    /// Returns the declaration named `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypeDecl> {
        self.types.get(name)
    }

    /// Returns true if a type named `name` is defined.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Returns the number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if no types are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Renders the formatted source to `writer`.
    ///
    /// # Errors
    /// Returns `CodegenError::Format` if the assembled source fails
    /// formatting, or `CodegenError::Io` if writing fails.
    pub fn render<W: Write>(&self, mut writer: W) -> Result<(), CodegenError> {
        let source = self.render_to_string()?;
        writer.write_all(source.as_bytes())?;
        Ok(())
    }

    /// Renders the formatted source.
    ///
    /// Output is deterministic for a given file state.
    ///
    /// # Errors
    /// Returns `CodegenError::Format` if the assembled source fails
    /// formatting. This indicates a generator defect.
    pub fn render_to_string(&self) -> Result<String, CodegenError> {
        let layout = FileLayout {
            preamble: &self.preamble,
            package_comment: &self.package_comment,
            package_name: &self.package_name,
            imports: self.imports(),
            decls: self
                .types
                .values()
                .map(|decl| DeclLayout {
                    name: &decl.name,
                    comment: decl.comment().unwrap_or_default(),
                    definition: &decl.definition,
                })
                .collect(),
        };
        let source = layout.assemble(&self.wrapper, self.comment_line_wrap);
        tracing::debug!(
            "Rendering {} with {} types and {} imports",
            self.pkg_path,
            layout.decls.len(),
            layout.imports.len()
        );

        format_source(&source).inspect_err(|e| {
            tracing::error!(
                "Generated source for {} failed formatting: {}\n{}",
                self.pkg_path,
                e,
                source
            );
        })
    }

    /// Renders the formatted source into the file at `path`.
    ///
    /// # Errors
    /// Returns `CodegenError` if rendering or writing fails.
    pub fn write_to_path(&self, path: &Path) -> Result<(), CodegenError> {
        let source = self.render_to_string()?;
        std::fs::write(path, source)?;
        tracing::info!(
            "Wrote {} type declarations to {}",
            self.types.len(),
            path.display()
        );
        Ok(())
    }
}

/// Validates, renders and wraps up one declaration.
fn prepare_decl<T: TypeInfo + ?Sized>(
    pkg_path: &str,
    name: String,
    ty: &T,
    options: TypeOptions,
) -> Result<(TypeDecl, Vec<String>), CodegenError> {
    if !is_identifier(&name) || name == "_" {
        return Err(CodegenError::InvalidDeclarationName { name });
    }
    if options.validate {
        validate_type(ty)?;
    }

    let mut renderer = TypeRenderer::new(pkg_path);
    let definition = renderer.render(ty);
    if let Some((pkg_path, qualifier)) = renderer.invalid_qualifiers().first() {
        return Err(CodegenError::InvalidPackageQualifier {
            pkg_path: pkg_path.clone(),
            qualifier: qualifier.clone(),
        });
    }

    let decl = TypeDecl {
        name,
        comment: options.comment,
        definition,
    };
    Ok((decl, renderer.into_imports()))
}

/// Builder for configuring and creating a [`GoFile`].
///
/// Setters touch disjoint settings, so their order does not affect the
/// result. Types defined on the builder are rendered immediately; errors are
/// reported by [`GoFileBuilder::build`].
#[derive(Debug)]
pub struct GoFileBuilder {
    pkg_path: String,
    package_name: Option<String>,
    package_comment: String,
    preamble: String,
    comment_line_wrap: usize,
    imports: Vec<String>,
    pending: Vec<(TypeDecl, Vec<String>)>,
    error: Option<CodegenError>,
}

impl GoFileBuilder {
    /// Creates a builder for a file owned by `pkg_path`.
    #[must_use]
    pub fn new(pkg_path: impl Into<String>) -> Self {
        Self {
            pkg_path: pkg_path.into(),
            package_name: None,
            package_comment: String::new(),
            preamble: String::new(),
            comment_line_wrap: DEFAULT_COMMENT_LINE_WRAP,
            imports: Vec::new(),
            pending: Vec::new(),
            error: None,
        }
    }

    /// Overrides the package clause name. Defaults to the last path segment.
    #[must_use]
    pub fn package_name(mut self, name: impl Into<String>) -> Self {
        self.package_name = Some(name.into());
        self
    }

    /// Sets the comment placed directly above the package clause.
    #[must_use]
    pub fn package_comment(mut self, comment: impl Into<String>) -> Self {
        self.package_comment = comment.into();
        self
    }

    /// Sets the comment at the top of the file, such as a license or a
    /// generated-code notice.
    #[must_use]
    pub fn preamble_comment(mut self, comment: impl Into<String>) -> Self {
        self.preamble = comment.into();
        self
    }

    /// Sets the comment line wrap limit. `0` disables wrapping.
    #[must_use]
    pub fn comment_line_wrap(mut self, limit: usize) -> Self {
        self.comment_line_wrap = limit;
        self
    }

    /// Defines a named type as part of construction.
    #[must_use]
    pub fn define_type<T: TypeInfo + ?Sized>(self, name: impl Into<String>, ty: &T) -> Self {
        self.define_type_with(name, ty, TypeOptions::new())
    }

    /// Defines a named type with options as part of construction.
    #[must_use]
    pub fn define_type_with<T: TypeInfo + ?Sized>(
        mut self,
        name: impl Into<String>,
        ty: &T,
        options: TypeOptions,
    ) -> Self {
        if self.error.is_none() {
            match prepare_decl(&self.pkg_path, name.into(), ty, options) {
                Ok(pending) => self.pending.push(pending),
                Err(e) => self.error = Some(e),
            }
        }
        self
    }

    /// Adds an import path directly.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn import(mut self, path: impl Into<String>) -> Self {
        self.imports.push(path.into());
        self
    }

    /// Builds the file.
    ///
    /// # Errors
    /// Returns `CodegenError::EmptyPackagePath` if the package path is empty,
    /// `CodegenError::InvalidPackageName` if the package name is not an
    /// identifier, or the first error from a type defined on the builder.
    pub fn build(self) -> Result<GoFile, CodegenError> {
        if self.pkg_path.is_empty() {
            return Err(CodegenError::EmptyPackagePath);
        }
        if let Some(e) = self.error {
            return Err(e);
        }

        let package_name = self
            .package_name
            .unwrap_or_else(|| package_ident(&self.pkg_path).to_string());
        if !is_identifier(&package_name) || package_name == "_" {
            return Err(CodegenError::InvalidPackageName { name: package_name });
        }

        let mut file = GoFile {
            pkg_path: self.pkg_path,
            package_name,
            package_comment: self.package_comment,
            preamble: self.preamble,
            comment_line_wrap: self.comment_line_wrap,
            wrapper: CommentWrapper::new(),
            imports: self.imports,
            types: BTreeMap::new(),
        };

        for (decl, imports) in self.pending {
            if file.contains(&decl.name) {
                return Err(CodegenError::DuplicateDeclaration { name: decl.name });
            }
            file.insert(decl, imports);
        }

        Ok(file)
    }
}
