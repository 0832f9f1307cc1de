//! Type definition rendering.
//!
//! Renders the right-hand side of a `type Name <definition>` declaration from
//! a [`TypeInfo`] description.
//!
//! Named types are always emitted by name and never expanded. That is what
//! terminates the recursion: a self-referential struct can only refer back to
//! itself through its own named type, so expanding named types here would
//! recurse forever.

use reflectgo_schema::{ChanDir, TypeInfo, TypeKind, is_identifier, package_ident, quote};

/// Renderer for type definitions within one package.
pub struct TypeRenderer<'a> {
    pkg_path: &'a str,
    imports: Vec<String>,
    invalid_qualifiers: Vec<(String, String)>,
}

impl<'a> TypeRenderer<'a> {
    /// Creates a renderer for a file owned by `pkg_path`.
    #[must_use]
    pub fn new(pkg_path: &'a str) -> Self {
        Self {
            pkg_path,
            imports: Vec::new(),
            invalid_qualifiers: Vec::new(),
        }
    }

    /// Renders a type definition.
    ///
    /// Import paths of referenced types from other packages are recorded and
    /// can be read with [`TypeRenderer::imports`]. Repeated references are
    /// recorded repeatedly.
    #[must_use]
    pub fn render<T: TypeInfo + ?Sized>(&mut self, ty: &T) -> String {
        let mut output = String::new();
        self.render_type(&mut output, ty);
        output
    }

    /// Returns the import paths recorded so far.
    #[must_use]
    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    /// Returns `(import path, qualifier)` pairs for references whose package
    /// qualifier is not a Go identifier, such as `yaml.v3` for
    /// `gopkg.in/yaml.v3`. Source containing them does not compile.
    #[must_use]
    pub fn invalid_qualifiers(&self) -> &[(String, String)] {
        &self.invalid_qualifiers
    }

    /// Consumes the renderer, returning the recorded import paths.
    #[must_use]
    pub fn into_imports(self) -> Vec<String> {
        self.imports
    }

    fn render_type<T: TypeInfo + ?Sized>(&mut self, output: &mut String, ty: &T) {
        if ty.kind() == TypeKind::Pointer {
            if let Some(elem) = ty.elem() {
                output.push('*');
                self.render_type(output, elem);
                return;
            }
        }

        if ty.is_named() {
            self.render_named(output, ty);
            return;
        }

        match (ty.kind(), ty.elem()) {
            (TypeKind::Slice, Some(elem)) => {
                output.push_str("[]");
                self.render_type(output, elem);
            }
            (TypeKind::Array, Some(elem)) => {
                output.push_str(&format!("[{}]", ty.array_len().unwrap_or(0)));
                self.render_type(output, elem);
            }
            (TypeKind::Chan, Some(elem)) => self.render_chan(output, ty, elem),
            (TypeKind::Map, Some(value)) => match ty.key() {
                Some(key) => {
                    output.push_str("map[");
                    self.render_type(output, key);
                    output.push(']');
                    self.render_type(output, value);
                }
                None => output.push_str(&ty.to_string()),
            },
            (TypeKind::Struct, _) => self.render_struct(output, ty),
            (TypeKind::Interface, _) => self.render_interface(output, ty),
            (TypeKind::Func, _) => {
                output.push_str("func");
                self.render_signature(output, ty);
            }
            _ => output.push_str(&ty.to_string()),
        }
    }

    /// Renders a reference to a named type, qualifying it when it belongs to
    /// another package.
    fn render_named<T: TypeInfo + ?Sized>(&mut self, output: &mut String, ty: &T) {
        let pkg_path = ty.pkg_path();

        if !pkg_path.is_empty() && pkg_path != self.pkg_path {
            let pkg_name = match ty.pkg_name() {
                "" => package_ident(pkg_path),
                name => name,
            };
            if !is_identifier(pkg_name) || pkg_name == "_" {
                self.invalid_qualifiers
                    .push((pkg_path.to_string(), pkg_name.to_string()));
            }
            output.push_str(pkg_name);
            output.push('.');
            tracing::trace!("Recorded import {} for {}", pkg_path, ty.name());
            self.imports.push(pkg_path.to_string());
        }

        output.push_str(ty.name());
    }

    fn render_chan<T: TypeInfo + ?Sized>(&mut self, output: &mut String, ty: &T, elem: &T) {
        let dir = ty.chan_dir().unwrap_or_default();

        // `chan <-chan T` would parse as `chan<- (chan T)`.
        let needs_parens = dir == ChanDir::Both
            && !elem.is_named()
            && elem.kind() == TypeKind::Chan
            && elem.chan_dir() == Some(ChanDir::Recv);

        output.push_str(dir.prefix());
        if needs_parens {
            output.push('(');
            self.render_type(output, elem);
            output.push(')');
        } else {
            self.render_type(output, elem);
        }
    }

    fn render_struct<T: TypeInfo + ?Sized>(&mut self, output: &mut String, ty: &T) {
        output.push_str("struct {\n");

        for field in ty.fields() {
            // "\t<name> <type> `<tag>`\n", name omitted for embedded fields
            output.push('\t');
            if !field.embedded {
                output.push_str(field.name);
                output.push(' ');
            }
            self.render_type(output, field.ty);
            if !field.tag.is_empty() {
                output.push(' ');
                output.push_str(&tag_literal(field.tag));
            }
            output.push('\n');
        }

        output.push('}');
    }

    fn render_interface<T: TypeInfo + ?Sized>(&mut self, output: &mut String, ty: &T) {
        let methods = ty.methods();
        if methods.is_empty() {
            output.push_str("interface{}");
            return;
        }

        output.push_str("interface {\n");
        for method in methods {
            output.push('\t');
            output.push_str(method.name);
            self.render_signature(output, method.sig);
            output.push('\n');
        }
        output.push('}');
    }

    /// Renders `(<params>) <results>` of a function type.
    fn render_signature<T: TypeInfo + ?Sized>(&mut self, output: &mut String, ty: &T) {
        let params = ty.params();
        let variadic = ty.is_variadic();

        output.push('(');
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                output.push_str(", ");
            }
            if variadic && i + 1 == params.len() {
                output.push_str("...");
                match param.elem() {
                    Some(elem) if param.kind() == TypeKind::Slice && !param.is_named() => {
                        self.render_type(output, elem);
                    }
                    _ => self.render_type(output, *param),
                }
            } else {
                self.render_type(output, *param);
            }
        }
        output.push(')');

        let results = ty.results();
        match results.as_slice() {
            [] => {}
            [single] => {
                output.push(' ');
                self.render_type(output, *single);
            }
            results => {
                output.push_str(" (");
                for (i, result) in results.iter().enumerate() {
                    if i > 0 {
                        output.push_str(", ");
                    }
                    self.render_type(output, *result);
                }
                output.push(')');
            }
        }
    }
}

/// Returns the literal for a struct tag.
///
/// Tags are raw string literals unless they contain a backquote or a line
/// break, which a raw string cannot hold.
fn tag_literal(tag: &str) -> String {
    if tag.contains(['`', '\n', '\r']) {
        quote(tag)
    } else {
        format!("`{}`", tag)
    }
}
