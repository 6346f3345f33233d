//! Encode node trees back to block-style text.
//!
//! The emitter walks the tree depth first, producing indented block
//! output. Scalars come out plain, literal (`|`) when they span lines, or
//! folded (`>`) when a long single line can be broken at spaces. Keys are
//! double-quoted only when their characters require it.

use crate::error::{Error, Result};
use crate::node::Node;

/// Characters in a key that force double-quoted emission.
const KEY_QUOTE_TRIGGERS: &str = "\":{}[],&*#?|-<>=!%@";

/// Emitter configuration.
#[derive(Debug, Clone)]
pub struct SerializeConfig {
    /// Spaces per nesting level; at least 2.
    pub spaces: usize,
    /// Fold plain scalars longer than this many characters; 0 disables.
    pub scalar_max_length: usize,
    /// Start a map that is a sequence element on the line after `- `.
    pub sequence_map_newline: bool,
    /// Start a scalar map value on the line after `key:`.
    pub map_scalar_newline: bool,
}

impl Default for SerializeConfig {
    fn default() -> Self {
        Self {
            spaces: 2,
            scalar_max_length: 64,
            sequence_map_newline: false,
            map_scalar_newline: false,
        }
    }
}

/// Serialize a tree to block-style text.
///
/// A [`Node::None`] root produces the empty string.
pub fn serialize(root: &Node, config: &SerializeConfig) -> Result<String> {
    if config.spaces < 2 {
        return Err(Error::IndentationTooSmall);
    }

    let mut out = String::new();
    emit_node(root, config, 0, false, &mut out);
    Ok(out)
}

fn emit_node(node: &Node, config: &SerializeConfig, level: usize, use_level: bool, out: &mut String) {
    match node {
        Node::None => {}
        Node::Scalar(value) => emit_scalar(value, config, level, use_level, out),
        Node::Sequence(items) => emit_sequence(items, config, level, out),
        Node::Map(entries) => emit_mapping(entries.iter(), config, level, use_level, out),
    }
}

fn emit_sequence(items: &[Node], config: &SerializeConfig, level: usize, out: &mut String) {
    for child in items {
        if child.is_none() {
            continue;
        }
        push_spaces(out, level);
        out.push_str("- ");
        if child.is_sequence() || (child.is_map() && config.sequence_map_newline) {
            out.push('\n');
            emit_node(child, config, level + 2, true, out);
        } else {
            emit_node(child, config, level + 2, false, out);
        }
    }
}

fn emit_mapping<'a>(
    entries: impl Iterator<Item = (&'a String, &'a Node)>,
    config: &SerializeConfig,
    level: usize,
    use_level: bool,
    out: &mut String,
) {
    let mut use_level = use_level;
    for (key, child) in entries {
        if child.is_none() {
            continue;
        }
        if use_level {
            push_spaces(out, level);
        }
        emit_key(key, out);
        out.push(':');
        if !child.is_scalar() || config.map_scalar_newline {
            out.push('\n');
            emit_node(child, config, level + config.spaces, true, out);
        } else {
            out.push(' ');
            emit_node(child, config, level + config.spaces, false, out);
        }
        use_level = true;
    }
}

/// Emit a key, escaped and double-quoted when its characters require it.
fn emit_key(key: &str, out: &mut String) {
    let quote = key.chars().any(|c| KEY_QUOTE_TRIGGERS.contains(c));
    if quote {
        out.push('"');
    }
    for ch in key.chars() {
        if ch == '\\' || ch == '"' {
            out.push('\\');
        }
        out.push(ch);
    }
    if quote {
        out.push('"');
    }
}

fn emit_scalar(
    value: &str,
    config: &SerializeConfig,
    level: usize,
    use_level: bool,
    out: &mut String,
) {
    if value.is_empty() {
        out.push('\n');
        return;
    }

    let mut pieces: Vec<&str> = value.split('\n').collect();
    let end_newline = pieces.last() == Some(&"");
    if end_newline {
        pieces.pop();
    }

    let style = if pieces.len() >= 2 {
        Some('|')
    } else if config.scalar_max_length > 0 && pieces[0].len() > config.scalar_max_length {
        let folded = fold_line(pieces[0], config.scalar_max_length);
        if folded.len() >= 2 {
            pieces = folded;
            Some('>')
        } else {
            None
        }
    } else {
        None
    };

    let Some(style) = style else {
        if use_level {
            push_spaces(out, level);
        }
        out.push_str(pieces[0]);
        out.push('\n');
        return;
    };

    if use_level {
        push_spaces(out, level);
    }
    out.push(style);
    if !end_newline {
        out.push('-');
    }
    out.push('\n');
    for piece in pieces {
        push_spaces(out, level);
        out.push_str(piece);
        out.push('\n');
    }
}

/// Break a line at spaces so every piece is at least `max` characters
/// apart, consuming the break space.
///
/// Returns at least one piece; two or more only when a space was found.
fn fold_line(line: &str, max: usize) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;

    let bytes = line.as_bytes();
    loop {
        let probe = start + max;
        if probe >= bytes.len() {
            break;
        }
        // Byte-wise search: a space byte never falls inside a multi-byte
        // character, so the resulting cuts are valid boundaries.
        match bytes[probe..].iter().position(|&b| b == b' ') {
            Some(found) => {
                let space = probe + found;
                pieces.push(&line[start..space]);
                start = space + 1;
            }
            None => break,
        }
    }

    pieces.push(&line[start..]);
    pieces
}

fn push_spaces(out: &mut String, count: usize) {
    for _ in 0..count {
        out.push(' ');
    }
}
