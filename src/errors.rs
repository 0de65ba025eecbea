use nom::error::{ErrorKind, ParseError as NomParseError};
use std::io;
use std::num::ParseIntError;

/// Custom error type for query parsing and validation
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("invalid character '{invalid_char}' in letter pool (only a-z and '*' allowed)")]
    InvalidLetterPool { invalid_char: char },

    #[error("empty word spec")]
    EmptyWordSpec,

    #[error("word spec \"{spec}\" has no open cells")]
    NoOpenCells { spec: String },

    #[error("invalid character '{invalid_char}' in word spec")]
    InvalidWordSpecChar { invalid_char: char },

    #[error("expected {open_cells} crossword(s) for {open_cells} open cell(s), got {provided}")]
    CrosswordCountMismatch { open_cells: usize, provided: usize },

    #[error("invalid crossword \"{token}\" (expected prefix.suffix with a-z letters)")]
    InvalidCrossword { token: String },

    #[error("rack cannot supply letter '{letter}' demanded by the word spec, even using blanks")]
    RackInsufficient { letter: char },

    #[error("int-parsing error: {0}")]
    ParseIntError(#[from] ParseIntError),

    // nom parser error (lowest level)
    #[error("nom parser error: {0:?}")]
    NomError(ErrorKind),
}

impl From<QueryError> for io::Error {
    fn from(qe: QueryError) -> Self {
        // String version is the least fragile (no Send/Sync bounds issues)
        io::Error::new(io::ErrorKind::InvalidInput, qe.to_string())
    }
}

impl From<ParseIntError> for Box<QueryError> {
    fn from(pie: ParseIntError) -> Self {
        Box::new(QueryError::ParseIntError(pie))
    }
}

impl<'a> NomParseError<&'a str> for Box<QueryError> {
    fn from_error_kind(_input: &'a str, kind: ErrorKind) -> Self {
        Box::new(QueryError::NomError(kind))
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        // usually just return the existing error unchanged
        other
    }
}
