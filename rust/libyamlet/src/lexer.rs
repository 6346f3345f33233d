//! Phase 2: Line post-processor
//!
//! Classifies every reader line as a sequence entry, mapping entry, or
//! scalar, splitting compound lines so each carries exactly one construct:
//!
//! - `- value` becomes a sequence marker line followed by a value line.
//! - `key: value` becomes a mapping line holding the decoded key followed
//!   by a scalar line holding the value.
//! - `key:` with nothing deeper below gains an empty scalar placeholder.
//! - `key: |` (and `>`, `|-`, `>-`) flags a block scalar; the indented
//!   lines below are claimed as its continuation and merged into one
//!   scalar line.

use crate::error::{Error, Result};
use crate::scanner::{find_not_cited, trim_ws, LineKind, ReaderLine, ScalarFlags};

/// An open block scalar while classifying its continuation lines.
struct BlockRun {
    /// Offset of the mapping line that introduced the block.
    intro_offset: usize,
    /// Offset of the first continuation line, once seen.
    first_offset: Option<usize>,
    flags: ScalarFlags,
}

/// Classify and split lines, then merge block scalars.
///
/// On success every line carries exactly one construct and the list ends
/// with a scalar.
pub fn process_lines(mut lines: Vec<ReaderLine>) -> Result<Vec<ReaderLine>> {
    classify_lines(&mut lines)?;
    merge_block_scalars(&mut lines);

    if let Some(last) = lines.last() {
        if last.kind != LineKind::Scalar {
            return Err(Error::UnexpectedDocumentEnd);
        }
    }

    Ok(lines)
}

fn classify_lines(lines: &mut Vec<ReaderLine>) -> Result<()> {
    let mut block: Option<BlockRun> = None;
    let mut i = 0;

    while i < lines.len() {
        // Claim continuation lines of an open block scalar before any
        // other rule; their content is text, not structure.
        if let Some(run) = &mut block {
            let line = &mut lines[i];
            let continues = match run.first_offset {
                None => line.offset > run.intro_offset,
                Some(first) => line.offset >= first,
            };
            if continues {
                line.kind = LineKind::Scalar;
                line.flags = run.flags;
                if run.first_offset.is_none() {
                    run.first_offset = Some(line.offset);
                }
                i += 1;
                continue;
            }
            if run.first_offset.is_none() {
                // Block with no content: give the mapping an empty value.
                let placeholder = empty_scalar(lines[i].no, run.intro_offset + 1);
                lines.insert(i, placeholder);
                i += 1;
            }
            block = None;
        }

        // Lines inserted by earlier splits arrive already classified.
        if lines[i].kind == LineKind::Scalar {
            i += 1;
            continue;
        }

        if process_sequence_line(lines, i) {
            i += 1;
            continue;
        }

        if let Some(advance) = process_mapping_line(lines, i, &mut block)? {
            i += advance;
            continue;
        }

        // Plain scalar. Block continuation lines were already claimed
        // above, flags included, so no flags travel here.
        lines[i].kind = LineKind::Scalar;
        i += 1;
    }

    // Document ended while a block scalar was still open and empty.
    if let Some(run) = block {
        if run.first_offset.is_none() {
            let no = lines.last().map(|l| l.no).unwrap_or(0);
            lines.push(empty_scalar(no, run.intro_offset + 1));
        }
    }

    Ok(())
}

fn empty_scalar(no: usize, offset: usize) -> ReaderLine {
    let mut line = ReaderLine::new("", no, offset);
    line.kind = LineKind::Scalar;
    line
}

/// Split a `- value` line into a marker line and a value line.
///
/// Returns `true` when the line is a sequence entry. The remainder, if
/// any, is inserted after the marker and classified on its own turn.
fn process_sequence_line(lines: &mut Vec<ReaderLine>, i: usize) -> bool {
    if lines[i].data == "-" {
        lines[i].kind = LineKind::Sequence;
        return true;
    }
    if !lines[i].data.starts_with("- ") {
        return false;
    }

    let split = lines[i].data[1..]
        .find(|c: char| c != ' ' && c != '\t')
        .map(|p| p + 1)
        .unwrap_or(lines[i].data.len());
    let remainder = lines[i].data[split..].to_string();

    let line = ReaderLine::new(remainder, lines[i].no, lines[i].offset + split);
    lines[i].data = "-".to_string();
    lines[i].kind = LineKind::Sequence;
    lines.insert(i + 1, line);

    true
}

/// Recognize a `key:` line, decode the key, and place its value.
///
/// Returns how far to advance, or `None` when the line holds no mapping
/// entry. Opens a block scalar run for `|`/`>` values.
fn process_mapping_line(
    lines: &mut Vec<ReaderLine>,
    i: usize,
    block: &mut Option<BlockRun>,
) -> Result<Option<usize>> {
    let data = lines[i].data.clone();
    let no = lines[i].no;
    let offset = lines[i].offset;

    let (colon, pre_quotes) = find_not_cited(&data, ':');
    let Some(colon) = colon else {
        return Ok(None);
    };

    let key = decode_key(trim_ws(&data[..colon]), pre_quotes, no)?;
    lines[i].data = key;
    lines[i].kind = LineKind::Mapping;

    let after = &data[colon + 1..];
    let Some(value_at) = after.find(|c: char| c != ' ' && c != '\t') else {
        // No inline value: the entry's value is the deeper block below,
        // or empty when the next line does not indent deeper.
        let deeper = lines.get(i + 1).is_some_and(|next| next.offset > offset);
        if !deeper {
            let placeholder = empty_scalar(no, offset + colon + 1);
            lines.insert(i + 1, placeholder);
            return Ok(Some(2));
        }
        return Ok(Some(1));
    };
    let value_start = colon + 1 + value_at;
    let value = &data[value_start..];

    if let Some(flags) = block_scalar_flags(value) {
        lines[i].flags = flags;
        *block = Some(BlockRun {
            intro_offset: offset,
            first_offset: None,
            flags,
        });
        return Ok(Some(1));
    }

    // An inline value closes the entry; nothing below may indent deeper.
    if let Some(next) = lines.get(i + 1) {
        if next.offset > offset {
            return Err(Error::IncorrectOffset { line: next.no });
        }
    }

    if value == "-" || value.starts_with("- ") {
        return Err(Error::BlockSequenceNotAllowed { line: no });
    }

    let value = decode_value(value, no)?;
    let mut line = ReaderLine::new(value, no, offset + value_start);
    line.kind = LineKind::Scalar;
    lines.insert(i + 1, line);

    Ok(Some(2))
}

/// Strip one enclosing quote pair and resolve backslash escapes.
fn decode_key(raw: &str, pre_quotes: usize, no: usize) -> Result<String> {
    if raw.is_empty() {
        return Err(Error::MissingKey { line: no });
    }

    let bare = match pre_quotes {
        0 => raw,
        1 => {
            let first = raw.chars().next();
            let enclosed = raw.len() >= 2
                && (first == Some('"') || first == Some('\''))
                && raw.ends_with(first.unwrap_or('"'));
            if !enclosed {
                return Err(Error::IncorrectKey { line: no });
            }
            &raw[1..raw.len() - 1]
        }
        _ => return Err(Error::IncorrectKey { line: no }),
    };

    Ok(unescape(bare))
}

/// Strip enclosing double quotes from a value.
///
/// A double-quoted value must close at its very end. Single quotes are
/// not decoded, and escapes inside the value are left intact.
fn decode_value(value: &str, no: usize) -> Result<String> {
    if !value.starts_with('"') {
        return Ok(value.to_string());
    }

    let mut escaped = false;
    for (pos, ch) in value.char_indices().skip(1) {
        if ch == '"' && !escaped {
            if pos != value.len() - 1 {
                return Err(Error::IncorrectValue { line: no });
            }
            return Ok(value[1..pos].to_string());
        }
        escaped = ch == '\\' && !escaped;
    }

    Err(Error::IncorrectValue { line: no })
}

/// Replace `\<ch>` with `<ch>`.
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
                continue;
            }
        }
        out.push(ch);
    }
    out
}

/// Match a block scalar leader: `|`, `>`, `|-`, `>-`.
fn block_scalar_flags(value: &str) -> Option<ScalarFlags> {
    let (literal, folded) = match value.as_bytes().first() {
        Some(b'|') => (true, false),
        Some(b'>') => (false, true),
        _ => return None,
    };
    let keep_newline = match &value[1..] {
        "" => true,
        "-" => false,
        _ => return None,
    };
    Some(ScalarFlags {
        literal,
        folded,
        keep_newline,
    })
}

/// Join each flagged scalar run into its first line.
///
/// Literal runs join with newlines, folded runs with spaces; extra
/// indentation relative to the run start is preserved as spaces. The
/// chomping flag appends one final newline.
fn merge_block_scalars(lines: &mut Vec<ReaderLine>) {
    let mut i = 0;
    while i < lines.len() {
        if lines[i].kind != LineKind::Scalar || !lines[i].flags.block() {
            i += 1;
            continue;
        }

        let base = lines[i].offset;
        let separator = if lines[i].flags.literal { '\n' } else { ' ' };
        let mut merged = lines[i].data.clone();

        let mut j = i + 1;
        while j < lines.len()
            && lines[j].kind == LineKind::Scalar
            && lines[j].flags.block()
            && lines[j].offset >= base
        {
            merged.push(separator);
            for _ in base..lines[j].offset {
                merged.push(' ');
            }
            merged.push_str(&lines[j].data);
            j += 1;
        }

        if lines[i].flags.keep_newline {
            merged.push('\n');
        }
        lines[i].data = merged;
        lines.drain(i + 1..j);
        i += 1;
    }
}
