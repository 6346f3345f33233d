//! Phase 1: Scanner
//!
//! The scanner converts raw source text into reader lines. It performs:
//! - Comment stripping (unescaped `#` outside quoted spans)
//! - Document marker handling (`---` start, `...` end)
//! - Character set validation (tab or printable ASCII 32-125)
//! - Indentation counting, rejecting tabs in the indentation region
//! - Whitespace trimming

use crate::error::{Error, Result};

/// A single logical line during parsing.
///
/// Created by the scanner, reshaped by the lexer, consumed by the tree
/// builder, and discarded when the parse returns.
#[derive(Debug, Clone)]
pub struct ReaderLine {
    /// Payload with surrounding spaces and tabs stripped.
    pub data: String,
    /// One-based line number in the raw input, for error reporting.
    pub no: usize,
    /// Count of leading spaces; defines the nesting level.
    pub offset: usize,
    /// Construct carried by this line, assigned by the lexer.
    pub kind: LineKind,
    /// Block scalar flags, copied onto continuation lines.
    pub flags: ScalarFlags,
}

impl ReaderLine {
    pub fn new(data: impl Into<String>, no: usize, offset: usize) -> Self {
        Self {
            data: data.into(),
            no,
            offset,
            kind: LineKind::Unclassified,
            flags: ScalarFlags::default(),
        }
    }
}

/// Syntactic construct carried by a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Not yet classified by the lexer.
    Unclassified,
    /// Sequence entry marker (`-`).
    Sequence,
    /// Mapping entry; the payload is the decoded key.
    Mapping,
    /// Scalar value; the payload is the text.
    Scalar,
}

/// Block scalar state attached to a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScalarFlags {
    /// Introduced by `|`: continuation lines join with newlines.
    pub literal: bool,
    /// Introduced by `>`: continuation lines join with spaces.
    pub folded: bool,
    /// Without the `-` chomping indicator: keep one final newline.
    pub keep_newline: bool,
}

impl ScalarFlags {
    /// Whether either block scalar style is active.
    pub fn block(&self) -> bool {
        self.literal || self.folded
    }
}

/// Scan source text into reader lines with validation.
pub fn read_lines(source: &str) -> Result<Vec<ReaderLine>> {
    let mut lines: Vec<ReaderLine> = Vec::new();
    let mut document_start_found = false;

    for (index, raw) in source.split('\n').enumerate() {
        let no = index + 1;
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        let line = strip_comment(raw);

        // Start of document: discard everything read so far.
        if !document_start_found && line == "---" {
            lines.clear();
            document_start_found = true;
            continue;
        }

        // End of document: the rest of the input is ignored.
        if line == "..." {
            break;
        }

        if trim_ws(line).is_empty() {
            continue;
        }

        validate_characters(line, no)?;

        let offset = count_indent(line);
        if let Some(tab) = line.find('\t') {
            let content = line
                .find(|c: char| c != ' ' && c != '\t')
                .unwrap_or(line.len());
            if tab < content {
                return Err(Error::TabInOffset {
                    line: no,
                    column: tab + 1,
                });
            }
        }

        lines.push(ReaderLine::new(trim_ws(line), no, offset));
    }

    Ok(lines)
}

/// Truncate at the first unescaped `#` outside any quoted span.
fn strip_comment(line: &str) -> &str {
    match find_not_cited(line, '#') {
        (Some(pos), _) => &line[..pos],
        (None, _) => line,
    }
}

/// Validate that every character is a tab or printable ASCII 32-125.
fn validate_characters(line: &str, no: usize) -> Result<()> {
    for (column, ch) in line.chars().enumerate() {
        if ch != '\t' && !(' '..='}').contains(&ch) {
            return Err(Error::InvalidCharacter {
                line: no,
                column: column + 1,
            });
        }
    }
    Ok(())
}

/// Count the number of leading spaces in a line.
fn count_indent(line: &str) -> usize {
    line.bytes().take_while(|&b| b == b' ').count()
}

/// Strip spaces and tabs from both ends.
pub fn trim_ws(s: &str) -> &str {
    s.trim_matches(|c| c == ' ' || c == '\t')
}

/// Find the first `needle` outside every quoted span.
///
/// A double-quoted span runs from an unescaped `"` to the next unescaped
/// `"`; single quotes delimit symmetric spans but are not escapable. The
/// needle itself must also be unescaped. Returns the byte position of the
/// match, if any, and the number of complete quote pairs before it.
pub fn find_not_cited(s: &str, needle: char) -> (Option<usize>, usize) {
    let mut in_double = false;
    let mut in_single = false;
    let mut escaped = false;
    let mut pairs = 0;

    for (pos, ch) in s.char_indices() {
        if ch == needle && !in_double && !in_single && !escaped {
            return (Some(pos), pairs);
        }
        match ch {
            '"' if !in_single && !escaped => {
                if in_double {
                    pairs += 1;
                }
                in_double = !in_double;
            }
            '\'' if !in_double => {
                if in_single {
                    pairs += 1;
                }
                in_single = !in_single;
            }
            _ => {}
        }
        escaped = ch == '\\' && !escaped;
    }

    (None, pairs)
}
