//! Go source formatting.
//!
//! Canonicalizes assembled source the way `gofmt` lays out type declarations:
//! tab indentation by bracket depth, empty `struct {}`/`interface {}` bodies
//! collapsed, struct field columns aligned with tabwriter semantics, blank
//! line runs collapsed and a single trailing newline.
//!
//! The input is also checked for balanced brackets, terminated literals and a
//! leading package clause. A failure here means the generator produced text
//! that is not Go source.

use crate::error::CodegenError;
use reflectgo_schema::is_identifier;

/// Kind of a `{` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Struct,
    Interface,
    Other,
}

/// Lexer state carried from one line to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lex {
    Code,
    BlockComment,
    RawString,
}

/// An unclosed bracket.
#[derive(Debug)]
struct Open {
    ch: char,
    block: Block,
    /// Only the first bracket left open on a line indents the lines below.
    indent: bool,
    line: usize,
}

/// A scanned source line.
#[derive(Debug)]
struct Line {
    depth: usize,
    text: String,
    /// Continuation of a raw string or block comment, emitted unchanged.
    verbatim: bool,
    /// Direct child of a struct body.
    in_struct: bool,
    starts_with_closer: bool,
    /// Leaves brackets open for the following lines.
    opens: bool,
    /// Block opened by a trailing `{`.
    trailing_block: Option<Block>,
    has_comment: bool,
    ends_in_code: bool,
    cells: Option<Vec<String>>,
}

impl Line {
    fn has_terminated_cell(&self, col: usize) -> bool {
        self.cells.as_ref().is_some_and(|cells| cells.len() > col + 1)
    }

    fn cell_width(&self, col: usize) -> usize {
        self.cells
            .as_ref()
            .and_then(|cells| cells.get(col))
            .map_or(0, |cell| cell.chars().count())
    }
}

/// Formats assembled Go source.
///
/// # Errors
/// Returns `CodegenError::Format` if the source has unbalanced brackets, an
/// unterminated literal or comment, or does not start with a package clause.
pub fn format_source(src: &str) -> Result<String, CodegenError> {
    let mut lines = scan(src)?;
    check_package_clause(&lines)?;

    collapse_empty_blocks(&mut lines);

    for line in &mut lines {
        if !is_field_line(line) {
            continue;
        }
        line.cells = if line.opens {
            split_open_field(&line.text)
        } else {
            Some(split_field(&line.text))
        };
    }
    align_column(&mut lines, 0);

    Ok(emit(&lines))
}

fn scan(src: &str) -> Result<Vec<Line>, CodegenError> {
    let mut stack: Vec<Open> = Vec::new();
    let mut lex = Lex::Code;
    let mut lex_line = 0;
    let mut lines = Vec::new();

    for (idx, raw) in src.lines().enumerate() {
        let number = idx + 1;
        let verbatim = lex != Lex::Code;
        let chars: Vec<(usize, char)> = raw.char_indices().collect();

        let mut min_len = stack.len();
        let mut snapshot: Option<(usize, Option<Block>)> = None;
        let mut first_code: Option<char> = None;
        let mut last_code: Option<char> = None;
        let mut has_comment = false;

        let mut i = 0;
        while i < chars.len() {
            let (pos, c) = chars[i];
            let next = chars.get(i + 1).map(|&(_, n)| n);

            match lex {
                Lex::BlockComment => {
                    if c == '*' && next == Some('/') {
                        lex = Lex::Code;
                        i += 2;
                    } else {
                        i += 1;
                    }
                    continue;
                }
                Lex::RawString => {
                    if c == '`' {
                        lex = Lex::Code;
                        last_code = Some(c);
                    }
                    i += 1;
                    continue;
                }
                Lex::Code => {}
            }

            if c.is_whitespace() {
                i += 1;
                continue;
            }

            if first_code.is_none() {
                first_code = Some(c);
            }
            if snapshot.is_none() && !matches!(c, ')' | ']' | '}') {
                snapshot = Some((
                    indent_depth(&stack),
                    stack.last().map(|open| open.block),
                ));
            }

            match c {
                '/' if next == Some('/') => {
                    has_comment = true;
                    break;
                }
                '/' if next == Some('*') => {
                    has_comment = true;
                    lex = Lex::BlockComment;
                    lex_line = number;
                    i += 2;
                    continue;
                }
                '`' => {
                    lex = Lex::RawString;
                    lex_line = number;
                }
                '"' | '\'' => {
                    i = skip_quoted(&chars, i, c).ok_or_else(|| {
                        let what = if c == '"' { "string" } else { "rune" };
                        CodegenError::format(number, format!("{what} literal not terminated"))
                    })?;
                    last_code = Some(c);
                    continue;
                }
                '{' | '[' | '(' => {
                    let block = if c == '{' {
                        block_kind(&raw[..pos])
                    } else {
                        Block::Other
                    };
                    stack.push(Open {
                        ch: c,
                        block,
                        indent: false,
                        line: number,
                    });
                }
                ')' | ']' | '}' => {
                    match stack.pop() {
                        Some(open) if open.ch == opening(c) => {}
                        Some(open) => {
                            return Err(CodegenError::format(
                                number,
                                format!(
                                    "unexpected '{}', '{}' opened on line {} is not closed",
                                    c, open.ch, open.line
                                ),
                            ));
                        }
                        None => {
                            return Err(CodegenError::format(number, format!("unexpected '{c}'")));
                        }
                    }
                    min_len = min_len.min(stack.len());
                }
                _ => {}
            }

            last_code = Some(c);
            i += 1;
        }

        let opens = stack.len() > min_len;
        if let Some(open) = stack.get_mut(min_len) {
            open.indent = true;
        }

        let (depth, top_block) =
            snapshot.unwrap_or_else(|| (indent_depth(&stack), stack.last().map(|open| open.block)));

        let trailing_block = match (last_code, stack.last()) {
            (Some('{'), Some(open)) if opens && open.line == number => Some(open.block),
            _ => None,
        };

        let ends_in_code = lex == Lex::Code;
        let text = if verbatim {
            raw.to_string()
        } else if ends_in_code {
            raw.trim().to_string()
        } else {
            raw.trim_start().to_string()
        };

        lines.push(Line {
            depth,
            text,
            verbatim,
            in_struct: top_block == Some(Block::Struct),
            starts_with_closer: matches!(first_code, Some(')' | ']' | '}')),
            opens,
            trailing_block,
            has_comment,
            ends_in_code,
            cells: None,
        });
    }

    match lex {
        Lex::RawString => {
            return Err(CodegenError::format(
                lex_line,
                "raw string literal not terminated",
            ));
        }
        Lex::BlockComment => {
            return Err(CodegenError::format(lex_line, "comment not terminated"));
        }
        Lex::Code => {}
    }

    if let Some(open) = stack.last() {
        return Err(CodegenError::format(
            open.line,
            format!("'{}' is never closed", open.ch),
        ));
    }

    Ok(lines)
}

fn indent_depth(stack: &[Open]) -> usize {
    stack.iter().filter(|open| open.indent).count()
}

fn opening(close: char) -> char {
    match close {
        ')' => '(',
        ']' => '[',
        _ => '{',
    }
}

/// Returns the index just past the closing quote.
fn skip_quoted(chars: &[(usize, char)], start: usize, quote: char) -> Option<usize> {
    let mut j = start + 1;
    while j < chars.len() {
        match chars[j].1 {
            '\\' => j += 2,
            c if c == quote => return Some(j + 1),
            _ => j += 1,
        }
    }
    None
}

/// Classifies a `{` by the keyword right before it.
fn block_kind(before: &str) -> Block {
    let before = before.trim_end();
    for (keyword, block) in [("struct", Block::Struct), ("interface", Block::Interface)] {
        if let Some(rest) = before.strip_suffix(keyword) {
            let boundary = rest
                .chars()
                .next_back()
                .is_none_or(|c| !(c.is_alphanumeric() || c == '_'));
            if boundary {
                return block;
            }
        }
    }
    Block::Other
}

fn check_package_clause(lines: &[Line]) -> Result<(), CodegenError> {
    for (idx, line) in lines.iter().enumerate() {
        if line.verbatim
            || line.text.is_empty()
            || line.text.starts_with("//")
            || line.text.starts_with("/*")
        {
            continue;
        }

        let mut tokens = line.text.split_whitespace();
        let valid = tokens.next() == Some("package")
            && tokens
                .next()
                .is_some_and(|name| name != "_" && is_identifier(name))
            && tokens.next().is_none_or(|rest| rest.starts_with("//"));

        return if valid {
            Ok(())
        } else {
            Err(CodegenError::format(idx + 1, "expected 'package' clause"))
        };
    }

    Err(CodegenError::format(
        lines.len().max(1),
        "missing 'package' clause",
    ))
}

/// Joins `struct {` or `interface {` with an immediately following `}` line.
fn collapse_empty_blocks(lines: &mut Vec<Line>) {
    let mut i = 0;
    while i + 1 < lines.len() {
        let collapsible = matches!(
            lines[i].trailing_block,
            Some(Block::Struct | Block::Interface)
        ) && !lines[i].has_comment
            && lines[i].text.ends_with('{')
            && !lines[i + 1].verbatim
            && lines[i + 1].text.starts_with('}');

        if collapsible {
            let next = lines.remove(i + 1);
            let line = &mut lines[i];
            let head = line.text[..line.text.len() - 1].trim_end().to_string();
            line.text = format!("{}{{}}{}", head, &next.text[1..]);
            line.opens = next.opens;
            line.trailing_block = next.trailing_block;
            line.has_comment = next.has_comment;
            line.ends_in_code = next.ends_in_code;
        }
        i += 1;
    }
}

fn is_field_line(line: &Line) -> bool {
    line.in_struct
        && !line.verbatim
        && !line.text.is_empty()
        && !line.starts_with_closer
        && !line.has_comment
        && line.ends_in_code
}

/// Splits a struct field line into tabwriter cells: `[name, type, tag]`, with
/// the name absent for embedded fields and the tag absent when untagged.
fn split_field(text: &str) -> Vec<String> {
    let (body, tag) = match text.find(['`', '"']) {
        Some(start) => (text[..start].trim_end(), Some(&text[start..])),
        None => (text, None),
    };

    let mut cells = Vec::with_capacity(3);
    match body.split_once(' ') {
        Some((name, ty)) if is_identifier(name) && !ty.trim().is_empty() => {
            cells.push(name.to_string());
            cells.push(ty.trim().to_string());
        }
        _ => cells.push(body.to_string()),
    }
    if let Some(tag) = tag {
        cells.push(tag.to_string());
    }
    cells
}

/// Splits the first line of a field spanning several lines into
/// `[name, rest]`. The name joins the column run above; the rest is the last
/// cell, so the run ends here.
fn split_open_field(text: &str) -> Option<Vec<String>> {
    match text.split_once(' ') {
        Some((name, rest)) if is_identifier(name) && !rest.trim().is_empty() => {
            Some(vec![name.to_string(), rest.trim().to_string()])
        }
        _ => None,
    }
}

/// Pads column `col` across each run of consecutive same-depth lines that
/// have a terminated cell there, then aligns the next column within the run.
fn align_column(lines: &mut [Line], col: usize) {
    let mut start = 0;
    while start < lines.len() {
        if !lines[start].has_terminated_cell(col) {
            start += 1;
            continue;
        }

        let depth = lines[start].depth;
        let mut end = start;
        while end < lines.len() && lines[end].depth == depth && lines[end].has_terminated_cell(col)
        {
            end += 1;
        }

        let run = &mut lines[start..end];
        let width = run.iter().map(|line| line.cell_width(col)).max().unwrap_or(0);
        for line in run.iter_mut() {
            let pad = width + 1 - line.cell_width(col);
            if let Some(cell) = line.cells.as_mut().and_then(|cells| cells.get_mut(col)) {
                cell.push_str(&" ".repeat(pad));
            }
        }
        align_column(run, col + 1);

        start = end;
    }
}

fn emit(lines: &[Line]) -> String {
    let mut output = String::new();
    let mut pending_blank = false;

    for line in lines {
        if line.verbatim {
            output.push_str(&line.text);
            output.push('\n');
            continue;
        }
        if line.text.is_empty() {
            pending_blank = !output.is_empty();
            continue;
        }
        if pending_blank {
            output.push('\n');
            pending_blank = false;
        }

        output.push_str(&"\t".repeat(line.depth));
        match &line.cells {
            Some(cells) => output.push_str(&cells.concat()),
            None => output.push_str(&line.text),
        }
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format_line(src: &str) -> usize {
        match format_source(src) {
            Err(CodegenError::Format { line, .. }) => line,
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[test]
    fn test_format_aligns_name_column() {
        let src = "package p\n\ntype T struct {\n\tA int\n\tLonger string `json:\"x\"`\n\tsync.Mutex\n}\n";
        let output = format_source(src).expect("Failed to format");
        assert_eq!(
            output,
            "package p\n\ntype T struct {\n\tA      int\n\tLonger string `json:\"x\"`\n\tsync.Mutex\n}\n"
        );
    }

    #[test]
    fn test_format_aligns_tag_column() {
        let src = "package p\n\ntype T struct {\n\tA int `a:\"1\"`\n\tB string `b:\"2\"`\n}\n";
        let output = format_source(src).expect("Failed to format");
        assert_eq!(
            output,
            "package p\n\ntype T struct {\n\tA int    `a:\"1\"`\n\tB string `b:\"2\"`\n}\n"
        );
    }

    #[test]
    fn test_format_embedded_field_ends_name_run() {
        let src = "package p\n\ntype T struct {\n\tA int\n\tC []*float64 `json:\"b\" other:\"tag\"`\n\tE string\n\tsync.RWMutex\n}\n";
        let output = format_source(src).expect("Failed to format");
        assert_eq!(output, src);
    }

    #[test]
    fn test_format_collapses_empty_blocks() {
        let src = "package p\n\ntype E struct {\n}\n\ntype T struct {\n\tA struct {\n\t}\n\tB interface {\n\t} `json:\"b\"`\n}\n";
        let output = format_source(src).expect("Failed to format");
        assert_eq!(
            output,
            "package p\n\ntype E struct{}\n\ntype T struct {\n\tA struct{}\n\tB interface{} `json:\"b\"`\n}\n"
        );
    }

    #[test]
    fn test_format_nested_struct_breaks_alignment() {
        let src = "package p\n\ntype T struct {\nA struct {\nB int\nCC string\n} `json:\"a\"`\nLonger int\n}\n";
        let output = format_source(src).expect("Failed to format");
        assert_eq!(
            output,
            "package p\n\ntype T struct {\n\tA struct {\n\t\tB  int\n\t\tCC string\n\t} `json:\"a\"`\n\tLonger int\n}\n"
        );
    }

    #[test]
    fn test_format_multi_line_field_joins_name_run() {
        let src = "package p\n\ntype T struct {\nA int\nServer struct {\nPort int\n}\nLonger string\n}\n";
        let output = format_source(src).expect("Failed to format");
        assert_eq!(
            output,
            "package p\n\ntype T struct {\n\tA      int\n\tServer struct {\n\t\tPort int\n\t}\n\tLonger string\n}\n"
        );
    }

    #[test]
    fn test_format_multi_line_field_after_tagged_field() {
        let src = "package p\n\ntype T struct {\n\tLong int `a:\"1\"`\n\tB map[string]struct {\n\t\tC int\n\t} `b:\"2\"`\n}\n";
        let output = format_source(src).expect("Failed to format");
        assert_eq!(
            output,
            "package p\n\ntype T struct {\n\tLong int `a:\"1\"`\n\tB    map[string]struct {\n\t\tC int\n\t} `b:\"2\"`\n}\n"
        );
    }

    #[test]
    fn test_format_reindents_import_block() {
        let src = "package p\n\nimport (\n\"fmt\"\n    \"sync\"\n)\n";
        let output = format_source(src).expect("Failed to format");
        assert_eq!(output, "package p\n\nimport (\n\t\"fmt\"\n\t\"sync\"\n)\n");
    }

    #[test]
    fn test_format_one_indent_per_line() {
        let src = "package p\n\ntype F func(struct {\nA int\n})\n";
        let output = format_source(src).expect("Failed to format");
        assert_eq!(output, "package p\n\ntype F func(struct {\n\tA int\n})\n");
    }

    #[test]
    fn test_format_collapses_blank_lines() {
        let src = "\n\npackage p\n\n\n\ntype A int   \n\n";
        let output = format_source(src).expect("Failed to format");
        assert_eq!(output, "package p\n\ntype A int\n");
    }

    #[test]
    fn test_format_keeps_comments() {
        let src = "// Preamble\n\n// Package p does things.\npackage p\n\n// A is a type.\ntype A int\n";
        let output = format_source(src).expect("Failed to format");
        assert_eq!(output, src);
    }

    #[test]
    fn test_format_raw_string_continuation_is_verbatim() {
        let src = "package p\n\ntype T struct {\n\tA int `x:\"1\n   two\"`\n}\n";
        let output = format_source(src).expect("Failed to format");
        assert_eq!(output, src);
    }

    #[test]
    fn test_format_brackets_in_literals_ignored() {
        let src = "package p\n\ntype T struct {\n\tA int \"x:\\\"{(\\\"\"\n\tB int `y:\"]\"`\n}\n";
        assert!(format_source(src).is_ok());
    }

    #[test]
    fn test_format_is_idempotent() {
        let src = "package p\n\nimport (\n\"fmt\"\n)\n\ntype T struct {\nA int `a:\"1\"`\nLong string\nC struct {\n}\n}\n";
        let once = format_source(src).expect("Failed to format");
        let twice = format_source(&once).expect("Failed to format");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_format_unclosed_bracket() {
        assert_eq!(format_line("package p\n\ntype T struct {\n\tA int\n"), 3);
    }

    #[test]
    fn test_format_mismatched_bracket() {
        assert_eq!(format_line("package p\n\ntype T [3)int\n"), 3);
    }

    #[test]
    fn test_format_unexpected_closer() {
        assert_eq!(format_line("package p\n}\n"), 2);
    }

    #[test]
    fn test_format_unterminated_string() {
        assert_eq!(format_line("package p\n\nimport \"fmt\n"), 3);
    }

    #[test]
    fn test_format_unterminated_raw_string() {
        assert_eq!(
            format_line("package p\n\ntype T struct {\n\tA int `json\n}\n"),
            4
        );
    }

    #[test]
    fn test_format_requires_package_clause() {
        assert_eq!(format_line("type A int\n"), 1);
        assert_eq!(format_line("// only a comment\npackage 1p\n"), 2);
        assert!(format_source("").is_err());
    }
}
