//! Type description definitions.
//!
//! This module contains hand-built structural descriptions of Go types:
//! named types, composite literals, struct fields with their tags, interface
//! method sets and function signatures.

use crate::names::{package_ident, quote, unquote};
use std::fmt;

/// Kind of a described type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// `bool`.
    Bool,
    /// `int`.
    Int,
    /// `int8`.
    Int8,
    /// `int16`.
    Int16,
    /// `int32` (and `rune`).
    Int32,
    /// `int64`.
    Int64,
    /// `uint`.
    Uint,
    /// `uint8` (and `byte`).
    Uint8,
    /// `uint16`.
    Uint16,
    /// `uint32`.
    Uint32,
    /// `uint64`.
    Uint64,
    /// `uintptr`.
    Uintptr,
    /// `float32`.
    Float32,
    /// `float64`.
    Float64,
    /// `complex64`.
    Complex64,
    /// `complex128`.
    Complex128,
    /// `string`.
    String,
    /// Pointer type.
    Pointer,
    /// Slice type.
    Slice,
    /// Fixed-length array type.
    Array,
    /// Map type.
    Map,
    /// Channel type.
    Chan,
    /// Struct type.
    Struct,
    /// Interface type.
    Interface,
    /// Function type.
    Func,
}

impl TypeKind {
    /// Returns the kind of a predeclared Go type name.
    #[must_use]
    pub fn from_builtin(name: &str) -> Option<Self> {
        match name {
            "bool" => Some(Self::Bool),
            "int" => Some(Self::Int),
            "int8" => Some(Self::Int8),
            "int16" => Some(Self::Int16),
            "int32" | "rune" => Some(Self::Int32),
            "int64" => Some(Self::Int64),
            "uint" => Some(Self::Uint),
            "uint8" | "byte" => Some(Self::Uint8),
            "uint16" => Some(Self::Uint16),
            "uint32" => Some(Self::Uint32),
            "uint64" => Some(Self::Uint64),
            "uintptr" => Some(Self::Uintptr),
            "float32" => Some(Self::Float32),
            "float64" => Some(Self::Float64),
            "complex64" => Some(Self::Complex64),
            "complex128" => Some(Self::Complex128),
            "string" => Some(Self::String),
            "error" | "any" => Some(Self::Interface),
            _ => None,
        }
    }

    /// Returns the lowercase kind name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint => "uint",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Uintptr => "uintptr",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Complex64 => "complex64",
            Self::Complex128 => "complex128",
            Self::String => "string",
            Self::Pointer => "ptr",
            Self::Slice => "slice",
            Self::Array => "array",
            Self::Map => "map",
            Self::Chan => "chan",
            Self::Struct => "struct",
            Self::Interface => "interface",
            Self::Func => "func",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Channel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChanDir {
    /// Receive-only channel (`<-chan T`).
    Recv,
    /// Send-only channel (`chan<- T`).
    Send,
    /// Bidirectional channel (`chan T`).
    #[default]
    Both,
}

impl ChanDir {
    /// Returns the Go prefix written before the element type.
    #[must_use]
    pub const fn prefix(&self) -> &'static str {
        match self {
            Self::Recv => "<-chan ",
            Self::Send => "chan<- ",
            Self::Both => "chan ",
        }
    }
}

/// A declared type with an identifier and an owning package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedType {
    /// Type name.
    pub name: String,
    /// Import path of the owning package; empty for predeclared types.
    pub pkg_path: String,
    /// Package identifier when it differs from the last path segment.
    pub pkg_name: Option<String>,
    /// Kind of the underlying type.
    pub underlying: TypeKind,
}

impl NamedType {
    /// Creates a named struct type declared in `pkg_path`.
    #[must_use]
    pub fn new(pkg_path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pkg_path: pkg_path.into(),
            pkg_name: None,
            underlying: TypeKind::Struct,
        }
    }

    /// Creates a predeclared type such as `int` or `error`.
    #[must_use]
    pub fn builtin(name: impl Into<String>) -> Self {
        let name = name.into();
        let underlying = TypeKind::from_builtin(&name).unwrap_or(TypeKind::Struct);
        Self {
            name,
            pkg_path: String::new(),
            pkg_name: None,
            underlying,
        }
    }

    /// Sets the underlying kind.
    #[must_use]
    pub fn with_kind(mut self, kind: TypeKind) -> Self {
        self.underlying = kind;
        self
    }

    /// Overrides the package identifier.
    #[must_use]
    pub fn with_pkg_name(mut self, pkg_name: impl Into<String>) -> Self {
        self.pkg_name = Some(pkg_name.into());
        self
    }

    /// Returns the identifier that qualifies references from other packages.
    #[must_use]
    pub fn package_ident(&self) -> &str {
        match &self.pkg_name {
            Some(name) => name,
            None if self.pkg_path.is_empty() => "",
            None => package_ident(&self.pkg_path),
        }
    }

    /// Returns true if this is a predeclared type.
    #[must_use]
    pub fn is_builtin(&self) -> bool {
        self.pkg_path.is_empty()
    }
}

/// Opaque struct field tag text.
///
/// The text is stored exactly as given. [`StructTag::get`] and
/// [`StructTag::lookup`] read the conventional `key:"value"` pairs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct StructTag(String);

impl StructTag {
    /// Creates a tag from raw text.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the raw tag text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the tag is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the value for `key`, or an empty string if absent.
    #[must_use]
    pub fn get(&self, key: &str) -> String {
        self.lookup(key).unwrap_or_default()
    }

    /// Returns the value for `key` if the tag contains it.
    ///
    /// Scanning stops at the first pair that does not follow the
    /// `key:"value"` convention.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<String> {
        let mut rest = self.0.as_str();

        while !rest.is_empty() {
            rest = rest.trim_start_matches(' ');

            let name_len = rest
                .bytes()
                .position(|b| b <= b' ' || b == b':' || b == b'"' || b == 0x7f)
                .unwrap_or(rest.len());
            if name_len == 0 || !rest[name_len..].starts_with(":\"") {
                break;
            }
            let name = &rest[..name_len];
            rest = &rest[name_len + 1..];

            let bytes = rest.as_bytes();
            let mut end = 1;
            while end < bytes.len() && bytes[end] != b'"' {
                if bytes[end] == b'\\' {
                    end += 1;
                }
                end += 1;
            }
            if end >= bytes.len() {
                break;
            }
            let quoted = &rest[..=end];
            rest = &rest[end + 1..];

            if name == key {
                return unquote(quoted);
            }
        }

        None
    }

    /// Returns a new tag with ` key:"value"` appended.
    #[must_use]
    pub fn with(&self, key: &str, value: &str) -> Self {
        let pair = format!("{}:{}", key, quote(value));
        if self.0.is_empty() {
            Self(pair)
        } else {
            Self(format!("{} {}", self.0, pair))
        }
    }
}

impl From<&str> for StructTag {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for StructTag {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl fmt::Display for StructTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructField {
    /// Field name. For embedded fields this is the embedded type's name.
    pub name: String,
    /// Whether the field is embedded.
    pub embedded: bool,
    /// Field type.
    pub ty: TypeDesc,
    /// Field tag.
    pub tag: StructTag,
}

impl StructField {
    /// Creates a named field without a tag.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeDesc) -> Self {
        Self {
            name: name.into(),
            embedded: false,
            ty,
            tag: StructTag::default(),
        }
    }

    /// Creates an embedded field. The field name is taken from the type.
    #[must_use]
    pub fn embedded(ty: TypeDesc) -> Self {
        let name = match &ty {
            TypeDesc::Named(named) => named.name.clone(),
            TypeDesc::Pointer(elem) => match elem.as_ref() {
                TypeDesc::Named(named) => named.name.clone(),
                _ => String::new(),
            },
            _ => String::new(),
        };
        Self {
            name,
            embedded: true,
            ty,
            tag: StructTag::default(),
        }
    }

    /// Sets the field tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<StructTag>) -> Self {
        self.tag = tag.into();
        self
    }
}

/// Struct type body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StructType {
    /// Fields in declaration order.
    pub fields: Vec<StructField>,
}

/// Interface method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    /// Method name.
    pub name: String,
    /// Method signature; a [`TypeDesc::Func`].
    pub sig: TypeDesc,
}

impl Method {
    /// Creates a method.
    #[must_use]
    pub fn new(name: impl Into<String>, sig: FuncType) -> Self {
        Self {
            name: name.into(),
            sig: TypeDesc::Func(sig),
        }
    }
}

/// Interface type body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InterfaceType {
    /// Methods in reported order.
    pub methods: Vec<Method>,
}

/// Function signature.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FuncType {
    /// Parameter types. A variadic function's last parameter is a slice.
    pub params: Vec<TypeDesc>,
    /// Result types.
    pub results: Vec<TypeDesc>,
    /// Whether the last parameter is variadic.
    pub variadic: bool,
}

impl FuncType {
    /// Creates a signature.
    #[must_use]
    pub fn new(params: Vec<TypeDesc>, results: Vec<TypeDesc>) -> Self {
        Self {
            params,
            results,
            variadic: false,
        }
    }

    /// Marks the last parameter as variadic.
    #[must_use]
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }
}

/// Structural description of a Go type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDesc {
    /// Declared (named) type; its structure is never expanded.
    Named(NamedType),
    /// Pointer type (`*T`).
    Pointer(Box<TypeDesc>),
    /// Slice type (`[]T`).
    Slice(Box<TypeDesc>),
    /// Array type (`[N]T`).
    Array {
        /// Array length.
        len: usize,
        /// Element type.
        elem: Box<TypeDesc>,
    },
    /// Map type (`map[K]V`).
    Map {
        /// Key type.
        key: Box<TypeDesc>,
        /// Value type.
        value: Box<TypeDesc>,
    },
    /// Channel type.
    Chan {
        /// Channel direction.
        dir: ChanDir,
        /// Element type.
        elem: Box<TypeDesc>,
    },
    /// Unnamed struct type.
    Struct(StructType),
    /// Unnamed interface type.
    Interface(InterfaceType),
    /// Unnamed function type.
    Func(FuncType),
}

impl TypeDesc {
    /// Predeclared type such as `int`, `string` or `error`.
    #[must_use]
    pub fn builtin(name: impl Into<String>) -> Self {
        Self::Named(NamedType::builtin(name))
    }

    /// Named struct type declared in `pkg_path`.
    #[must_use]
    pub fn named(pkg_path: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Named(NamedType::new(pkg_path, name))
    }

    /// Pointer to `elem`.
    #[must_use]
    pub fn pointer(elem: Self) -> Self {
        Self::Pointer(Box::new(elem))
    }

    /// Slice of `elem`.
    #[must_use]
    pub fn slice(elem: Self) -> Self {
        Self::Slice(Box::new(elem))
    }

    /// Array of `len` elements.
    #[must_use]
    pub fn array(len: usize, elem: Self) -> Self {
        Self::Array {
            len,
            elem: Box::new(elem),
        }
    }

    /// Map from `key` to `value`.
    #[must_use]
    pub fn map(key: Self, value: Self) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Channel of `elem`.
    #[must_use]
    pub fn chan(dir: ChanDir, elem: Self) -> Self {
        Self::Chan {
            dir,
            elem: Box::new(elem),
        }
    }

    /// Unnamed struct with the given fields.
    #[must_use]
    pub fn structure(fields: Vec<StructField>) -> Self {
        Self::Struct(StructType { fields })
    }

    /// Unnamed interface with the given methods.
    #[must_use]
    pub fn interface(methods: Vec<Method>) -> Self {
        Self::Interface(InterfaceType { methods })
    }

    /// Unnamed function type.
    #[must_use]
    pub fn func(sig: FuncType) -> Self {
        Self::Func(sig)
    }

    /// Returns the kind of this type.
    #[must_use]
    pub fn kind(&self) -> TypeKind {
        match self {
            Self::Named(named) => named.underlying,
            Self::Pointer(_) => TypeKind::Pointer,
            Self::Slice(_) => TypeKind::Slice,
            Self::Array { .. } => TypeKind::Array,
            Self::Map { .. } => TypeKind::Map,
            Self::Chan { .. } => TypeKind::Chan,
            Self::Struct(_) => TypeKind::Struct,
            Self::Interface(_) => TypeKind::Interface,
            Self::Func(_) => TypeKind::Func,
        }
    }

    /// Returns the named type, if this is one.
    #[must_use]
    pub fn as_named(&self) -> Option<&NamedType> {
        match self {
            Self::Named(named) => Some(named),
            _ => None,
        }
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(named) => {
                if named.is_builtin() {
                    f.write_str(&named.name)
                } else {
                    write!(f, "{}.{}", named.package_ident(), named.name)
                }
            }
            Self::Pointer(elem) => write!(f, "*{}", elem),
            Self::Slice(elem) => write!(f, "[]{}", elem),
            Self::Array { len, elem } => write!(f, "[{}]{}", len, elem),
            Self::Map { key, value } => write!(f, "map[{}]{}", key, value),
            Self::Chan { dir, elem } => {
                if *dir == ChanDir::Both
                    && matches!(elem.as_ref(), Self::Chan { dir: ChanDir::Recv, .. })
                {
                    write!(f, "chan ({})", elem)
                } else {
                    write!(f, "{}{}", dir.prefix(), elem)
                }
            }
            Self::Struct(st) => {
                if st.fields.is_empty() {
                    return f.write_str("struct {}");
                }
                f.write_str("struct { ")?;
                for (i, field) in st.fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    if field.embedded {
                        write!(f, "{}", field.ty)?;
                    } else {
                        write!(f, "{} {}", field.name, field.ty)?;
                    }
                    if !field.tag.is_empty() {
                        write!(f, " {}", quote(field.tag.as_str()))?;
                    }
                }
                f.write_str(" }")
            }
            Self::Interface(iface) => {
                if iface.methods.is_empty() {
                    return f.write_str("interface {}");
                }
                f.write_str("interface { ")?;
                for (i, method) in iface.methods.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    f.write_str(&method.name)?;
                    match &method.sig {
                        Self::Func(sig) => write_signature(f, sig)?,
                        other => write!(f, " {}", other)?,
                    }
                }
                f.write_str(" }")
            }
            Self::Func(sig) => {
                f.write_str("func")?;
                write_signature(f, sig)
            }
        }
    }
}

/// Writes `(params) results` for a signature.
fn write_signature(f: &mut fmt::Formatter<'_>, sig: &FuncType) -> fmt::Result {
    f.write_str("(")?;
    for (i, param) in sig.params.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        if sig.variadic && i + 1 == sig.params.len() {
            match param {
                TypeDesc::Slice(elem) => write!(f, "...{}", elem)?,
                other => write!(f, "...{}", other)?,
            }
        } else {
            write!(f, "{}", param)?;
        }
    }
    f.write_str(")")?;

    match sig.results.as_slice() {
        [] => Ok(()),
        [single] => write!(f, " {}", single),
        results => {
            f.write_str(" (")?;
            for (i, result) in results.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", result)?;
            }
            f.write_str(")")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_kind_from_builtin() {
        assert_eq!(TypeKind::from_builtin("int"), Some(TypeKind::Int));
        assert_eq!(TypeKind::from_builtin("byte"), Some(TypeKind::Uint8));
        assert_eq!(TypeKind::from_builtin("error"), Some(TypeKind::Interface));
        assert_eq!(TypeKind::from_builtin("Foo"), None);
    }

    #[test]
    fn test_named_type_package_ident() {
        let named = NamedType::new("path/to/pkg", "T");
        assert_eq!(named.package_ident(), "pkg");

        let named = NamedType::new("gopkg.in/yaml.v3", "Node").with_pkg_name("yaml");
        assert_eq!(named.package_ident(), "yaml");

        let named = NamedType::builtin("int");
        assert_eq!(named.package_ident(), "");
        assert!(named.is_builtin());
        assert_eq!(named.underlying, TypeKind::Int);
    }

    #[test]
    fn test_struct_tag_get() {
        let tag = StructTag::new(r#"json:"a,omitempty" other:"tag""#);
        assert_eq!(tag.get("json"), "a,omitempty");
        assert_eq!(tag.get("other"), "tag");
        assert_eq!(tag.get("missing"), "");
        assert_eq!(tag.lookup("missing"), None);
    }

    #[test]
    fn test_struct_tag_lookup_escaped_value() {
        let tag = StructTag::new(r#"desc:"say \"hi\"" json:"x""#);
        assert_eq!(tag.lookup("desc").as_deref(), Some("say \"hi\""));
        assert_eq!(tag.lookup("json").as_deref(), Some("x"));
    }

    #[test]
    fn test_struct_tag_lookup_stops_at_malformed_pair() {
        let tag = StructTag::new(r#"json:"a" broken json2:"b""#);
        assert_eq!(tag.lookup("json").as_deref(), Some("a"));
        assert_eq!(tag.lookup("json2"), None);
    }

    #[test]
    fn test_struct_tag_with() {
        let tag = StructTag::new(r#"json:"a""#).with("env", "A");
        assert_eq!(tag.as_str(), r#"json:"a" env:"A""#);

        let tag = StructTag::default().with("env", "A");
        assert_eq!(tag.as_str(), r#"env:"A""#);
    }

    #[test]
    fn test_embedded_field_name() {
        let field = StructField::embedded(TypeDesc::named("time", "Time"));
        assert_eq!(field.name, "Time");
        assert!(field.embedded);

        let field = StructField::embedded(TypeDesc::pointer(TypeDesc::named("sync", "Mutex")));
        assert_eq!(field.name, "Mutex");
    }

    #[test]
    fn test_display_composites() {
        let ty = TypeDesc::map(
            TypeDesc::builtin("string"),
            TypeDesc::slice(TypeDesc::pointer(TypeDesc::named("time", "Time"))),
        );
        assert_eq!(ty.to_string(), "map[string][]*time.Time");

        let ty = TypeDesc::array(4, TypeDesc::builtin("byte"));
        assert_eq!(ty.to_string(), "[4]byte");

        let ty = TypeDesc::chan(ChanDir::Send, TypeDesc::builtin("int"));
        assert_eq!(ty.to_string(), "chan<- int");
    }

    #[test]
    fn test_display_chan_of_recv_chan() {
        let ty = TypeDesc::chan(
            ChanDir::Both,
            TypeDesc::chan(ChanDir::Recv, TypeDesc::builtin("int")),
        );
        assert_eq!(ty.to_string(), "chan (<-chan int)");
    }

    #[test]
    fn test_display_struct_quotes_tags() {
        let ty = TypeDesc::structure(vec![
            StructField::new("A", TypeDesc::builtin("int")).with_tag(r#"json:"a""#),
            StructField::embedded(TypeDesc::named("time", "Time")),
        ]);
        assert_eq!(ty.to_string(), r#"struct { A int "json:\"a\""; time.Time }"#);
        assert_eq!(TypeDesc::structure(vec![]).to_string(), "struct {}");
    }

    #[test]
    fn test_display_interface_and_func() {
        let ty = TypeDesc::interface(vec![
            Method::new("Bar", FuncType::default()),
            Method::new(
                "Foo",
                FuncType::new(
                    vec![TypeDesc::builtin("int")],
                    vec![TypeDesc::builtin("error")],
                ),
            ),
        ]);
        assert_eq!(ty.to_string(), "interface { Bar(); Foo(int) error }");
        assert_eq!(TypeDesc::interface(vec![]).to_string(), "interface {}");

        let ty = TypeDesc::func(
            FuncType::new(
                vec![
                    TypeDesc::builtin("string"),
                    TypeDesc::slice(TypeDesc::builtin("int")),
                ],
                vec![TypeDesc::builtin("int"), TypeDesc::builtin("error")],
            )
            .variadic(),
        );
        assert_eq!(ty.to_string(), "func(string, ...int) (int, error)");
    }

    #[test]
    fn test_kind() {
        assert_eq!(TypeDesc::builtin("string").kind(), TypeKind::String);
        assert_eq!(TypeDesc::named("time", "Time").kind(), TypeKind::Struct);
        assert_eq!(
            TypeDesc::pointer(TypeDesc::builtin("int")).kind(),
            TypeKind::Pointer
        );
        assert_eq!(TypeDesc::func(FuncType::default()).kind(), TypeKind::Func);
    }
}
