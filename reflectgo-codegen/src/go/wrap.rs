//! Comment word wrapping.

/// Default column limit for wrapped comments.
pub const DEFAULT_COMMENT_LINE_WRAP: usize = 79;

/// Wraps free text into `//` line comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentWrapper {
    output_line_prefix: String,
    trim_input_prefix: String,
}

impl CommentWrapper {
    /// Creates a wrapper that writes `// ` before each line and strips a
    /// caller-supplied leading `// `.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output_line_prefix: "// ".to_string(),
            trim_input_prefix: "// ".to_string(),
        }
    }

    /// Wraps `text` so that no line exceeds `limit` columns, prefix included.
    ///
    /// Input lines are wrapped independently. A word longer than the limit is
    /// kept whole on its own line. A `limit` of zero disables wrapping. The
    /// result has no trailing newline.
    #[must_use]
    pub fn wrap(&self, text: &str, limit: usize) -> String {
        let mut lines = Vec::new();

        for input in text.trim_end_matches('\n').lines() {
            let input = input
                .strip_prefix(self.trim_input_prefix.as_str())
                .or_else(|| input.strip_prefix(self.trim_input_prefix.trim_end()))
                .unwrap_or(input);
            self.wrap_line(input, limit, &mut lines);
        }

        lines.join("\n")
    }

    fn wrap_line(&self, input: &str, limit: usize, lines: &mut Vec<String>) {
        let mut words = input.split_whitespace();

        let Some(first) = words.next() else {
            lines.push(self.output_line_prefix.trim_end().to_string());
            return;
        };

        let mut current = format!("{}{}", self.output_line_prefix, first);
        let mut width = current.chars().count();

        for word in words {
            let word_width = word.chars().count();
            if limit == 0 || width + 1 + word_width <= limit {
                current.push(' ');
                current.push_str(word);
                width += 1 + word_width;
            } else {
                lines.push(current);
                current = format!("{}{}", self.output_line_prefix, word);
                width = current.chars().count();
            }
        }

        lines.push(current);
    }
}

impl Default for CommentWrapper {
    fn default() -> Self {
        Self::new()
    }
}
