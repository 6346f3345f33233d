//! Block-style YAML subset reader and writer.
//!
//! This crate parses a subset of YAML 1.x block documents into a [`Node`]
//! tree and serializes trees back to text. Supported input: block
//! sequences (`- value`), block mappings (`key: value`), plain and
//! double-quoted scalars, literal (`|`) and folded (`>`) block scalars
//! with optional strip chomping (`-`), `---`/`...` document markers, and
//! `#` comments. Input is limited to printable 7-bit ASCII plus tab.
//!
//! Not supported: anchors, aliases, tags, flow style (`[…]`/`{…}`),
//! directives, and multi-document streams (only the first document is
//! consumed).
//!
//! # Parsing Pipeline
//!
//! The parser operates in three phases:
//!
//! 1. **Scanner**: Converts source text into reader lines, stripping
//!    comments and document markers, validating the character set, and
//!    recording indentation offsets.
//!
//! 2. **Lexer**: Classifies every line as a sequence entry, mapping
//!    entry, or scalar, splitting compound lines so each carries exactly
//!    one construct, and merging block scalars into single lines.
//!
//! 3. **Tree builder**: Recursively consumes the line list to build the
//!    node tree, driven by indentation offsets.
//!
//! # Example
//!
//! ```
//! use libyamlet::{parse, serialize, SerializeConfig};
//!
//! let doc = parse("name: yamlet\nkeywords:\n  - yaml\n  - parser\n").unwrap();
//! assert_eq!(doc["name"].as_str(), "yamlet");
//! assert_eq!(doc["keywords"][1].as_str(), "parser");
//!
//! let text = serialize(&doc, &SerializeConfig::default()).unwrap();
//! assert_eq!(text, "name: yamlet\nkeywords:\n  - yaml\n  - parser\n");
//! ```

mod encode;
mod error;
mod lexer;
mod node;
mod parser;
mod scanner;

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

pub use encode::{serialize, SerializeConfig};
pub use error::{Category, Error, Result};
pub use node::{Iter, Kind, Node};

/// Parse a document from a string.
///
/// # Example
///
/// ```
/// use libyamlet::parse;
///
/// let doc = parse("key: value").unwrap();
/// assert_eq!(doc["key"].as_str(), "value");
/// ```
pub fn parse(input: &str) -> Result<Node> {
    // Phase 1: Scan source into lines
    let lines = scanner::read_lines(input)?;

    // Phase 2: Classify and split lines
    let lines = lexer::process_lines(lines)?;

    // Phase 3: Build the tree
    parser::parse_tree(&lines)
}

/// Parse a document from a byte stream.
///
/// Bytes outside the accepted character set are reported as invalid
/// characters, so any byte stream can be handed over unchecked.
pub fn parse_from_reader(mut reader: impl Read) -> Result<Node> {
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;
    parse(&String::from_utf8_lossy(&buffer))
}

/// Parse a document from a file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Node> {
    let path = path.as_ref();
    let file = fs::File::open(path).map_err(|_| Error::CannotOpenFile {
        path: path.to_path_buf(),
    })?;
    parse_from_reader(file)
}

/// Serialize a tree to a byte stream.
pub fn serialize_to_writer(
    root: &Node,
    config: &SerializeConfig,
    mut writer: impl Write,
) -> Result<()> {
    let text = serialize(root, config)?;
    writer.write_all(text.as_bytes())?;
    Ok(())
}

/// Serialize a tree to a file.
pub fn serialize_file(root: &Node, config: &SerializeConfig, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let text = serialize(root, config)?;
    let mut file = fs::File::create(path).map_err(|_| Error::CannotOpenFile {
        path: path.to_path_buf(),
    })?;
    file.write_all(text.as_bytes())?;
    Ok(())
}
