//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// The file was constructed without a package path.
    #[error("package path is empty")]
    EmptyPackagePath,

    /// The package clause would not be a valid identifier.
    #[error("invalid package name '{name}'")]
    InvalidPackageName {
        /// Package name.
        name: String,
    },

    /// A type declaration name is not a valid identifier.
    #[error("invalid type name '{name}'")]
    InvalidDeclarationName {
        /// Declaration name.
        name: String,
    },

    /// A referenced package's qualifier is not an identifier. Set the
    /// package name on the type description to the package's declared name.
    #[error("invalid package qualifier '{qualifier}' for import '{pkg_path}'")]
    InvalidPackageQualifier {
        /// Import path of the referenced package.
        pkg_path: String,
        /// Qualifier that would have been emitted.
        qualifier: String,
    },

    /// A type with this name is already declared in the file.
    #[error("type already defined: {name}")]
    DuplicateDeclaration {
        /// Declaration name.
        name: String,
    },

    /// Type description validation error.
    #[error("schema error: {0}")]
    Schema(#[from] reflectgo_schema::SchemaError),

    /// The assembled source failed formatting. Indicates a generator defect.
    #[error("format error at line {line}: {message}")]
    Format {
        /// Line in the assembled source.
        line: usize,
        /// Error message.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodegenError {
    /// Creates a format error at the given line.
    pub fn format(line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            line,
            message: message.into(),
        }
    }
}
