//! Phase 3: Tree builder
//!
//! Consumes the post-processed line list left to right, building the node
//! tree by recursive descent. The first line decides the root kind; the
//! indentation offset decides where each construct ends. Sibling entries
//! must share one offset and one kind.

use crate::error::{Error, Result};
use crate::node::Node;
use crate::scanner::{LineKind, ReaderLine};

/// Build the document tree from the processed line list.
///
/// Empty input produces a [`Node::None`] root.
pub fn parse_tree(lines: &[ReaderLine]) -> Result<Node> {
    let mut root = Node::None;
    if lines.is_empty() {
        return Ok(root);
    }

    let mut pos = 0;
    parse_node(lines, &mut pos, &mut root)?;

    if pos != lines.len() {
        return Err(Error::UnexpectedDocumentEnd);
    }
    Ok(root)
}

fn parse_node(lines: &[ReaderLine], pos: &mut usize, node: &mut Node) -> Result<()> {
    match lines[*pos].kind {
        LineKind::Scalar => {
            node.set_scalar(lines[*pos].data.as_str());
            *pos += 1;
            Ok(())
        }
        LineKind::Sequence => parse_sequence(lines, pos, node),
        LineKind::Mapping => parse_mapping(lines, pos, node),
        // The lexer classified every line; reaching one it did not is a bug.
        LineKind::Unclassified => Err(Error::SequenceError {
            line: lines[*pos].no,
        }),
    }
}

fn parse_sequence(lines: &[ReaderLine], pos: &mut usize, node: &mut Node) -> Result<()> {
    let offset = lines[*pos].offset;

    loop {
        let marker = &lines[*pos];
        *pos += 1;
        if *pos >= lines.len() {
            return Err(Error::SequenceError { line: marker.no });
        }

        let child = node.push_back();
        parse_node(lines, pos, child)?;

        if !next_entry(lines, *pos, offset, LineKind::Sequence)? {
            return Ok(());
        }
    }
}

fn parse_mapping(lines: &[ReaderLine], pos: &mut usize, node: &mut Node) -> Result<()> {
    let offset = lines[*pos].offset;

    loop {
        let entry = &lines[*pos];
        *pos += 1;
        if *pos >= lines.len() {
            return Err(Error::SequenceError { line: entry.no });
        }

        let child = node.key_mut(&entry.data);
        parse_node(lines, pos, child)?;

        if !next_entry(lines, *pos, offset, LineKind::Mapping)? {
            return Ok(());
        }
    }
}

/// Decide whether the line at `pos` is the next sibling entry.
///
/// A shallower line (or the end of input) closes the construct; a deeper
/// line or a sibling of another kind is an error.
fn next_entry(lines: &[ReaderLine], pos: usize, offset: usize, kind: LineKind) -> Result<bool> {
    let Some(next) = lines.get(pos) else {
        return Ok(false);
    };
    if next.offset < offset {
        return Ok(false);
    }
    if next.offset > offset {
        return Err(Error::IncorrectOffset { line: next.no });
    }
    if next.kind != kind {
        return Err(Error::DifferentEntryNotAllowed { line: next.no });
    }
    Ok(true)
}
