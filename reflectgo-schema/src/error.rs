//! Error types for type description validation.

use thiserror::Error;

/// Error type for type description validation.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A name that must be a Go identifier is not one.
    #[error("invalid identifier '{name}' for {context}")]
    InvalidIdentifier {
        /// What the name was used for (type, field, method).
        context: String,
        /// The offending name.
        name: String,
    },

    /// Two fields of one struct share a name.
    #[error("duplicate field '{name}' in struct")]
    DuplicateField {
        /// Field name.
        name: String,
    },

    /// Two methods of one interface share a name.
    #[error("duplicate method '{name}' in interface")]
    DuplicateMethod {
        /// Method name.
        name: String,
    },

    /// An embedded field whose type is neither a named type nor a pointer to one.
    #[error("embedded field must be a named type or pointer to a named type, got '{ty}'")]
    InvalidEmbedded {
        /// Text of the embedded type.
        ty: String,
    },

    /// A composite kind reported without its element type.
    #[error("{kind} type is missing its {part} type")]
    MissingElement {
        /// Kind of the composite.
        kind: String,
        /// Missing part (element, key).
        part: &'static str,
    },

    /// A variadic function whose last parameter is not a slice.
    #[error("variadic function must end with a slice parameter: '{signature}'")]
    InvalidVariadic {
        /// Text of the function type.
        signature: String,
    },
}

impl SchemaError {
    /// Creates an invalid identifier error.
    pub fn invalid_identifier(context: impl Into<String>, name: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            context: context.into(),
            name: name.into(),
        }
    }

    /// Creates a missing element error.
    pub fn missing(kind: impl Into<String>, part: &'static str) -> Self {
        Self::MissingElement {
            kind: kind.into(),
            part,
        }
    }
}
