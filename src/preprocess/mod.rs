//! Preprocessor: comment stripping and `#include` splicing.
//!
//! Two sequential text-stream transforms, per `spec.md` §4.1. Comment
//! stripping runs first over the whole source so that a `#include` spelled
//! out inside a comment is never spliced. Include splicing then scans the
//! comment-stripped text once, left to right; spliced content is inserted
//! as-is and is not itself re-scanned for further directives (`spec.md`:
//! "Nested includes are not recursively expanded").

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use crate::cursor::Cursor;
use crate::error::{CompileError, Span};

/// Read `path`, strip comments, splice `#include`s, and return the
/// resulting source text.
pub fn preprocess(path: &Path) -> Result<String, CompileError> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| CompileError::io(format!("reading {}: {e}", path.display())))?;
    let stripped = strip_comments(&source)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    splice_includes(&stripped, base_dir)
}

/// Strip `//` and `/* */` comments from `source`, preserving every newline
/// encountered inside a block comment so downstream line numbers stay
/// faithful to the original file.
fn strip_comments(source: &str) -> Result<String, CompileError> {
    let mut cursor = Cursor::new(source);
    let mut out = String::with_capacity(source.len());

    while let Some(ch) = cursor.peek() {
        if ch == '/' && cursor.peek2() == Some('/') {
            cursor.advance();
            cursor.advance();
            while let Some(c) = cursor.peek() {
                cursor.advance();
                if c == '\n' {
                    break;
                }
            }
        } else if ch == '/' && cursor.peek2() == Some('*') {
            let (line, col) = cursor.position();
            cursor.advance();
            cursor.advance();
            loop {
                match cursor.peek() {
                    None => {
                        return Err(CompileError::preprocess(
                            "unterminated block comment",
                            Span::new(line, col),
                        ));
                    }
                    Some('*') if cursor.peek2() == Some('/') => {
                        cursor.advance();
                        cursor.advance();
                        break;
                    }
                    Some('\n') => {
                        out.push('\n');
                        cursor.advance();
                    }
                    Some(_) => {
                        cursor.advance();
                    }
                }
            }
        } else {
            out.push(ch);
            cursor.advance();
        }
    }

    Ok(out)
}

/// Splice `#include "path"` directives. The directive must begin at column 1
/// (the `#` is the first character of the line); anything else starting
/// with `#` is left untouched (it isn't a directive this preprocessor
/// recognizes, and the lexer will reject it if it reaches one).
fn splice_includes(source: &str, base_dir: &Path) -> Result<String, CompileError> {
    let mut out = String::with_capacity(source.len());
    let mut at_line_start = true;

    let mut chars = source.char_indices().peekable();
    while let Some((i, ch)) = chars.next() {
        if ch == '#' && at_line_start && is_include_directive(&source[i..]) {
            let line_end = source[i..]
                .find('\n')
                .map(|off| i + off)
                .unwrap_or(source.len());
            let line = &source[i..line_end];
            let path = parse_include_path(line)
                .ok_or_else(|| CompileError::preprocess("malformed #include directive", Span::new(1, 1)))?;
            let resolved = base_dir.join(path);
            let included = std::fs::read_to_string(&resolved).map_err(|e| {
                CompileError::io(format!("#include {}: {e}", resolved.display()))
            })?;
            out.push_str(&included);
            while let Some(&(j, _)) = chars.peek() {
                if j >= line_end {
                    break;
                }
                chars.next();
            }
            at_line_start = false;
            continue;
        }

        out.push(ch);
        at_line_start = ch == '\n';
    }

    Ok(out)
}

fn is_include_directive(rest: &str) -> bool {
    rest.len() >= 9 && rest[1..9].eq_ignore_ascii_case("include ")
}

fn parse_include_path(line: &str) -> Option<PathBuf> {
    let after = line[1..].trim_start();
    let after = after.strip_prefix("include")?;
    let after = after.trim();
    let inner = after.strip_prefix('"')?.strip_suffix('"')?;
    Some(PathBuf::from(inner))
}
