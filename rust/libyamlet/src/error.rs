//! Error types for parsing and serialization.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for parsing and serialization operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of an [`Error`].
///
/// Mirrors the three failure surfaces of the library: malformed input,
/// a caller-side operation problem, and internal invariant violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Invalid input document; recoverable by fixing the input.
    Parsing,
    /// Bad configuration or environment; recoverable by the caller.
    Operation,
    /// Invariant violation inside the parser; indicates a bug.
    Internal,
}

/// Error type for parsing and serialization.
#[derive(Error, Debug)]
pub enum Error {
    /// A byte outside tab / printable ASCII 32-125.
    #[error("Invalid character found at line {line}, column {column}")]
    InvalidCharacter { line: usize, column: usize },

    /// Tab character inside the indentation region.
    #[error("Tab found in offset at line {line}, column {column}")]
    TabInOffset { line: usize, column: usize },

    /// Mapping entry with an empty key.
    #[error("Missing key at line {line}")]
    MissingKey { line: usize },

    /// Mapping key with stray or unbalanced quoting.
    #[error("Incorrect key at line {line}")]
    IncorrectKey { line: usize },

    /// Mapping value with an unterminated or misplaced closing quote.
    #[error("Incorrect value at line {line}")]
    IncorrectValue { line: usize },

    /// Sequence entry used as an inline mapping value.
    #[error("Sequence entry is not allowed as an inline value at line {line}")]
    BlockSequenceNotAllowed { line: usize },

    /// Line indented deeper than its context allows.
    #[error("Incorrect offset at line {line}")]
    IncorrectOffset { line: usize },

    /// Entry kind differs from its siblings at the same offset.
    #[error("Different entry is not allowed at line {line}")]
    DifferentEntryNotAllowed { line: usize },

    /// Input file could not be opened.
    #[error("Cannot open file {}", path.display())]
    CannotOpenFile { path: PathBuf },

    /// Stream read or write failure.
    #[error("Stream error: {0}")]
    Io(#[from] io::Error),

    /// Space indentation configured below the minimum of 2.
    #[error("Space indentation is less than 2")]
    IndentationTooSmall,

    /// Document ended while a construct was still open.
    #[error("Unexpected document end")]
    UnexpectedDocumentEnd,

    /// Sequence entry without a value line; a parser invariant was broken.
    #[error("Internal sequence error at line {line}")]
    SequenceError { line: usize },
}

impl Error {
    /// Classify this error into one of the three failure surfaces.
    pub fn category(&self) -> Category {
        match self {
            Error::InvalidCharacter { .. }
            | Error::TabInOffset { .. }
            | Error::MissingKey { .. }
            | Error::IncorrectKey { .. }
            | Error::IncorrectValue { .. }
            | Error::BlockSequenceNotAllowed { .. }
            | Error::IncorrectOffset { .. }
            | Error::DifferentEntryNotAllowed { .. } => Category::Parsing,
            Error::CannotOpenFile { .. } | Error::Io(_) | Error::IndentationTooSmall => {
                Category::Operation
            }
            Error::UnexpectedDocumentEnd | Error::SequenceError { .. } => Category::Internal,
        }
    }
}
