//! Type description validation.
//!
//! Descriptions obtained from a runtime introspection source are well formed
//! by construction. Hand-built descriptions are not, and a malformed one would
//! render into source that fails formatting. This module checks them up front.

use crate::error::SchemaError;
use crate::introspect::TypeInfo;
use crate::names::is_identifier;
use crate::types::TypeKind;
use std::collections::HashSet;

/// Validates a type description for rendering.
///
/// Named types are checked for a valid identifier but never descended into.
///
/// # Errors
/// Returns `SchemaError` describing the first problem found.
pub fn validate_type<T: TypeInfo + ?Sized>(ty: &T) -> Result<(), SchemaError> {
    if ty.is_named() {
        return validate_named(ty);
    }

    match ty.kind() {
        TypeKind::Pointer | TypeKind::Slice | TypeKind::Array | TypeKind::Chan => {
            let elem = ty
                .elem()
                .ok_or_else(|| SchemaError::missing(ty.kind().as_str(), "element"))?;
            validate_type(elem)
        }
        TypeKind::Map => {
            let key = ty
                .key()
                .ok_or_else(|| SchemaError::missing("map", "key"))?;
            let value = ty
                .elem()
                .ok_or_else(|| SchemaError::missing("map", "value"))?;
            validate_type(key)?;
            validate_type(value)
        }
        TypeKind::Struct => validate_struct(ty),
        TypeKind::Interface => validate_interface(ty),
        TypeKind::Func => validate_func(ty),
        _ => Ok(()),
    }
}

/// Validates the name of a named type.
fn validate_named<T: TypeInfo + ?Sized>(ty: &T) -> Result<(), SchemaError> {
    if !is_identifier(ty.name()) {
        return Err(SchemaError::invalid_identifier("type name", ty.name()));
    }
    if !ty.pkg_path().is_empty() && !is_identifier(ty.pkg_name()) {
        return Err(SchemaError::invalid_identifier(
            format!("package of '{}'", ty.pkg_path()),
            ty.pkg_name(),
        ));
    }
    Ok(())
}

/// Validates struct fields.
fn validate_struct<T: TypeInfo + ?Sized>(ty: &T) -> Result<(), SchemaError> {
    let mut seen_names = HashSet::new();

    for field in ty.fields() {
        if field.embedded {
            let target = match field.ty.kind() {
                TypeKind::Pointer if !field.ty.is_named() => field.ty.elem(),
                _ => Some(field.ty),
            };
            match target {
                Some(target) if target.is_named() => validate_named(target)?,
                _ => {
                    return Err(SchemaError::InvalidEmbedded {
                        ty: field.ty.to_string(),
                    });
                }
            }
        } else {
            if !is_identifier(field.name) {
                return Err(SchemaError::invalid_identifier("field", field.name));
            }
            validate_type(field.ty)?;
        }

        if field.name != "_" && !field.name.is_empty() && !seen_names.insert(field.name) {
            return Err(SchemaError::DuplicateField {
                name: field.name.to_string(),
            });
        }
    }

    Ok(())
}

/// Validates interface methods.
fn validate_interface<T: TypeInfo + ?Sized>(ty: &T) -> Result<(), SchemaError> {
    let mut seen_names = HashSet::new();

    for method in ty.methods() {
        if !is_identifier(method.name) || method.name == "_" {
            return Err(SchemaError::invalid_identifier("method", method.name));
        }
        if !seen_names.insert(method.name) {
            return Err(SchemaError::DuplicateMethod {
                name: method.name.to_string(),
            });
        }
        validate_type(method.sig)?;
    }

    Ok(())
}

/// Validates a function signature.
fn validate_func<T: TypeInfo + ?Sized>(ty: &T) -> Result<(), SchemaError> {
    let params = ty.params();

    if ty.is_variadic() {
        match params.last() {
            Some(last) if last.kind() == TypeKind::Slice && !last.is_named() => {}
            _ => {
                return Err(SchemaError::InvalidVariadic {
                    signature: ty.to_string(),
                });
            }
        }
    }

    for param in params {
        validate_type(param)?;
    }
    for result in ty.results() {
        validate_type(result)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChanDir, FuncType, Method, StructField, TypeDesc};

    #[test]
    fn test_validate_valid_struct() {
        let ty = TypeDesc::structure(vec![
            StructField::new("A", TypeDesc::builtin("int")).with_tag(r#"json:"a""#),
            StructField::new(
                "B",
                TypeDesc::map(
                    TypeDesc::builtin("string"),
                    TypeDesc::chan(ChanDir::Recv, TypeDesc::named("time", "Time")),
                ),
            ),
            StructField::embedded(TypeDesc::pointer(TypeDesc::named("sync", "Mutex"))),
            StructField::new("_", TypeDesc::builtin("int")),
            StructField::new("_", TypeDesc::builtin("int")),
        ]);
        assert!(validate_type(&ty).is_ok());
    }

    #[test]
    fn test_validate_duplicate_field() {
        let ty = TypeDesc::structure(vec![
            StructField::new("A", TypeDesc::builtin("int")),
            StructField::new("A", TypeDesc::builtin("string")),
        ]);
        let result = validate_type(&ty);
        assert!(matches!(result, Err(SchemaError::DuplicateField { name }) if name == "A"));
    }

    #[test]
    fn test_validate_embedded_field_clashes_with_named_field() {
        let ty = TypeDesc::structure(vec![
            StructField::new("Time", TypeDesc::builtin("int")),
            StructField::embedded(TypeDesc::named("time", "Time")),
        ]);
        assert!(matches!(
            validate_type(&ty),
            Err(SchemaError::DuplicateField { .. })
        ));
    }

    #[test]
    fn test_validate_invalid_field_name() {
        let ty = TypeDesc::structure(vec![StructField::new(
            "not-valid",
            TypeDesc::builtin("int"),
        )]);
        assert!(matches!(
            validate_type(&ty),
            Err(SchemaError::InvalidIdentifier { .. })
        ));
    }

    #[test]
    fn test_validate_invalid_embedded() {
        let field = StructField::embedded(TypeDesc::slice(TypeDesc::builtin("int")));
        let ty = TypeDesc::structure(vec![field]);
        assert!(matches!(
            validate_type(&ty),
            Err(SchemaError::InvalidEmbedded { .. })
        ));
    }

    #[test]
    fn test_validate_nested_invalid_type_name() {
        let ty = TypeDesc::slice(TypeDesc::named("pkg", "1Bad"));
        assert!(matches!(
            validate_type(&ty),
            Err(SchemaError::InvalidIdentifier { .. })
        ));
    }

    #[test]
    fn test_validate_package_ident_from_path() {
        let ty = TypeDesc::named("github.com/example/go-thing", "T");
        assert!(validate_type(&ty).is_err());
    }

    #[test]
    fn test_validate_duplicate_method() {
        let ty = TypeDesc::interface(vec![
            Method::new("Run", FuncType::default()),
            Method::new("Run", FuncType::default()),
        ]);
        assert!(matches!(
            validate_type(&ty),
            Err(SchemaError::DuplicateMethod { .. })
        ));
    }

    #[test]
    fn test_validate_variadic_requires_slice() {
        let ty = TypeDesc::func(FuncType::new(vec![TypeDesc::builtin("int")], vec![]).variadic());
        assert!(matches!(
            validate_type(&ty),
            Err(SchemaError::InvalidVariadic { .. })
        ));

        let ty = TypeDesc::func(
            FuncType::new(vec![TypeDesc::slice(TypeDesc::builtin("int"))], vec![]).variadic(),
        );
        assert!(validate_type(&ty).is_ok());
    }

    #[test]
    fn test_validate_named_not_expanded() {
        // A named type's structure is opaque; only its name is checked.
        let ty = TypeDesc::pointer(TypeDesc::named("path/to/pkg", "Node"));
        assert!(validate_type(&ty).is_ok());
    }
}
