//! Go code generation modules.

pub mod format;
pub mod template;
pub mod types;
pub mod wrap;

pub use format::format_source;
pub use template::{DeclLayout, FileLayout};
pub use types::TypeRenderer;
pub use wrap::{CommentWrapper, DEFAULT_COMMENT_LINE_WRAP};
