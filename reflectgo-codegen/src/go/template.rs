//! Go file assembly.
//!
//! Lays out a file as: preamble comment, blank line, package comment,
//! package clause, import block, then each type declaration. The output is
//! raw text meant to be passed through [`super::format::format_source`].

use super::wrap::CommentWrapper;
use reflectgo_schema::quote;

/// A type declaration ready for layout.
#[derive(Debug, Clone, Copy)]
pub struct DeclLayout<'a> {
    /// Declaration name.
    pub name: &'a str,
    /// Doc comment, empty for none.
    pub comment: &'a str,
    /// Rendered definition.
    pub definition: &'a str,
}

/// Everything needed to lay out one file.
#[derive(Debug, Clone)]
pub struct FileLayout<'a> {
    /// Preamble comment, empty for none.
    pub preamble: &'a str,
    /// Package comment, empty for none.
    pub package_comment: &'a str,
    /// Package clause name.
    pub package_name: &'a str,
    /// Import paths, already sorted and deduplicated.
    pub imports: Vec<&'a str>,
    /// Declarations in output order.
    pub decls: Vec<DeclLayout<'a>>,
}

impl FileLayout<'_> {
    /// Assembles the file text, wrapping comments at `line_wrap` columns.
    #[must_use]
    pub fn assemble(&self, wrapper: &CommentWrapper, line_wrap: usize) -> String {
        let mut output = String::new();

        if !self.preamble.is_empty() {
            output.push_str(&wrapper.wrap(self.preamble, line_wrap));
            output.push_str("\n\n");
        }

        if !self.package_comment.is_empty() {
            output.push_str(&wrapper.wrap(self.package_comment, line_wrap));
            output.push('\n');
        }

        output.push_str(&format!("package {}\n", self.package_name));

        match self.imports.as_slice() {
            [] => {}
            [single] => {
                output.push_str(&format!("\nimport {}\n", quote(single)));
            }
            imports => {
                output.push_str("\nimport (\n");
                for path in imports {
                    output.push_str(&format!("\t{}\n", quote(path)));
                }
                output.push_str(")\n");
            }
        }

        for (i, decl) in self.decls.iter().enumerate() {
            // Blank line after the header and before every documented type.
            if i == 0 || !decl.comment.is_empty() {
                output.push('\n');
            }
            if !decl.comment.is_empty() {
                output.push_str(&wrapper.wrap(decl.comment, line_wrap));
                output.push('\n');
            }
            output.push_str(&format!("type {} {}\n", decl.name, decl.definition));
        }

        output
    }
}
