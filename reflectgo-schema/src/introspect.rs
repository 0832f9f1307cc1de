//! Read-only introspection interface over type descriptions.
//!
//! The code generator only ever talks to a type through [`TypeInfo`], so any
//! introspection backend can be rendered. [`TypeDesc`] is the hand-built
//! implementation shipped with this crate.

use crate::types::{ChanDir, TypeDesc, TypeKind};
use std::fmt;

/// Borrowed view of a struct field.
#[derive(Debug)]
pub struct FieldRef<'a, T: ?Sized> {
    /// Field name.
    pub name: &'a str,
    /// Whether the field is embedded.
    pub embedded: bool,
    /// Field type.
    pub ty: &'a T,
    /// Raw tag text, empty when the field has no tag.
    pub tag: &'a str,
}

/// Borrowed view of an interface method.
#[derive(Debug)]
pub struct MethodRef<'a, T: ?Sized> {
    /// Method name.
    pub name: &'a str,
    /// Method signature, a value of kind [`TypeKind::Func`].
    pub sig: &'a T,
}

/// Structural introspection of a type.
///
/// Accessors that do not apply to the reported kind return `None` or an
/// empty collection. `Display` must produce the type's default textual
/// representation, which is used for kinds that carry no further structure.
pub trait TypeInfo: fmt::Display {
    /// Kind of the type. For named types this is the underlying kind.
    fn kind(&self) -> TypeKind;

    /// Declared name, empty for unnamed types.
    fn name(&self) -> &str;

    /// Import path of the owning package, empty for unnamed and predeclared types.
    fn pkg_path(&self) -> &str;

    /// Identifier used to qualify the type from another package.
    fn pkg_name(&self) -> &str;

    /// Element type of a pointer, slice, array, channel or map.
    fn elem(&self) -> Option<&Self>;

    /// Key type of a map.
    fn key(&self) -> Option<&Self>;

    /// Length of an array.
    fn array_len(&self) -> Option<usize>;

    /// Direction of a channel.
    fn chan_dir(&self) -> Option<ChanDir>;

    /// Struct fields in declaration order.
    fn fields(&self) -> Vec<FieldRef<'_, Self>>;

    /// Interface methods.
    fn methods(&self) -> Vec<MethodRef<'_, Self>>;

    /// Function parameter types.
    fn params(&self) -> Vec<&Self>;

    /// Function result types.
    fn results(&self) -> Vec<&Self>;

    /// Whether a function's last parameter is variadic.
    fn is_variadic(&self) -> bool;

    /// Returns true if the type has a declared name.
    fn is_named(&self) -> bool {
        !self.name().is_empty()
    }
}

impl TypeInfo for TypeDesc {
    fn kind(&self) -> TypeKind {
        TypeDesc::kind(self)
    }

    fn name(&self) -> &str {
        self.as_named().map_or("", |named| named.name.as_str())
    }

    fn pkg_path(&self) -> &str {
        self.as_named().map_or("", |named| named.pkg_path.as_str())
    }

    fn pkg_name(&self) -> &str {
        self.as_named().map_or("", |named| named.package_ident())
    }

    fn elem(&self) -> Option<&Self> {
        match self {
            Self::Pointer(elem) | Self::Slice(elem) => Some(elem.as_ref()),
            Self::Array { elem, .. } | Self::Chan { elem, .. } => Some(elem.as_ref()),
            Self::Map { value, .. } => Some(value.as_ref()),
            _ => None,
        }
    }

    fn key(&self) -> Option<&Self> {
        match self {
            Self::Map { key, .. } => Some(key.as_ref()),
            _ => None,
        }
    }

    fn array_len(&self) -> Option<usize> {
        match self {
            Self::Array { len, .. } => Some(*len),
            _ => None,
        }
    }

    fn chan_dir(&self) -> Option<ChanDir> {
        match self {
            Self::Chan { dir, .. } => Some(*dir),
            _ => None,
        }
    }

    fn fields(&self) -> Vec<FieldRef<'_, Self>> {
        match self {
            Self::Struct(st) => st
                .fields
                .iter()
                .map(|field| FieldRef {
                    name: &field.name,
                    embedded: field.embedded,
                    ty: &field.ty,
                    tag: field.tag.as_str(),
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    fn methods(&self) -> Vec<MethodRef<'_, Self>> {
        match self {
            Self::Interface(iface) => iface
                .methods
                .iter()
                .map(|method| MethodRef {
                    name: &method.name,
                    sig: &method.sig,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    fn params(&self) -> Vec<&Self> {
        match self {
            Self::Func(sig) => sig.params.iter().collect(),
            _ => Vec::new(),
        }
    }

    fn results(&self) -> Vec<&Self> {
        match self {
            Self::Func(sig) => sig.results.iter().collect(),
            _ => Vec::new(),
        }
    }

    fn is_variadic(&self) -> bool {
        matches!(self, Self::Func(sig) if sig.variadic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FuncType, Method, StructField};

    #[test]
    fn test_named_accessors() {
        let ty = TypeDesc::named("github.com/example/pkg", "Thing");
        assert!(ty.is_named());
        assert_eq!(TypeInfo::name(&ty), "Thing");
        assert_eq!(ty.pkg_path(), "github.com/example/pkg");
        assert_eq!(ty.pkg_name(), "pkg");
        assert!(ty.elem().is_none());
    }

    #[test]
    fn test_unnamed_accessors() {
        let ty = TypeDesc::map(TypeDesc::builtin("string"), TypeDesc::builtin("int"));
        assert!(!ty.is_named());
        assert_eq!(ty.pkg_path(), "");
        assert_eq!(ty.key().map(ToString::to_string).as_deref(), Some("string"));
        assert_eq!(ty.elem().map(ToString::to_string).as_deref(), Some("int"));
    }

    #[test]
    fn test_fields_view() {
        let ty = TypeDesc::structure(vec![
            StructField::new("A", TypeDesc::builtin("int")).with_tag(r#"json:"a""#),
            StructField::embedded(TypeDesc::named("sync", "Mutex")),
        ]);
        let fields = ty.fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "A");
        assert_eq!(fields[0].tag, r#"json:"a""#);
        assert!(!fields[0].embedded);
        assert!(fields[1].embedded);
        assert_eq!(fields[1].tag, "");
    }

    #[test]
    fn test_func_and_method_views() {
        let sig = FuncType::new(
            vec![TypeDesc::slice(TypeDesc::builtin("string"))],
            vec![TypeDesc::builtin("error")],
        )
        .variadic();
        let ty = TypeDesc::func(sig.clone());
        assert!(ty.is_variadic());
        assert_eq!(ty.params().len(), 1);
        assert_eq!(ty.results().len(), 1);

        let iface = TypeDesc::interface(vec![Method::new("Run", sig)]);
        let methods = iface.methods();
        assert_eq!(methods.len(), 1);
        assert_eq!(methods[0].name, "Run");
        assert_eq!(methods[0].sig.kind(), TypeKind::Func);
    }

    #[test]
    fn test_array_and_chan_accessors() {
        let ty = TypeDesc::array(3, TypeDesc::builtin("int"));
        assert_eq!(ty.array_len(), Some(3));
        assert_eq!(ty.chan_dir(), None);

        let ty = TypeDesc::chan(ChanDir::Recv, TypeDesc::builtin("int"));
        assert_eq!(ty.chan_dir(), Some(ChanDir::Recv));
    }
}
