//! nom grammars for the three query surfaces: letter pool, word spec,
//! and crossword tokens.
//!
//! Letter pool (case-insensitive): each item is an optional decimal count
//! followed by `a-z` (a letter tile) or `*` (a blank), so `detoau*` is seven
//! tiles and `3e2n*` is six.
//!
//! Word spec (case-sensitive): optional `/` anchors on either end around a
//! body of cell tokens: `.` open, `#` open with double-letter bonus, `!`
//! open with triple-letter bonus, `A-Z` a tile already on the board, `a-z`
//! an open cell that demands that letter from the rack.
//!
//! Crossword (case-insensitive): `prefix.suffix` with a-z letters on either
//! side of a single `.`; a bare `.` is unconstrained.

use crate::errors::QueryError;
use crate::letters::{Bonus, BLANK_CHAR};
use crate::query::{Cell, Crossword, Rack, WordSpec};
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{digit1, satisfy};
use nom::combinator::{map, opt};
use nom::IResult;
use nom::Parser;
use std::str::FromStr;

/// Parser result type: input, output, with our custom `QueryError`
pub type PResult<'a, O> = IResult<&'a str, O, Box<QueryError>>;

// === Token parsers ===

// one pool item: optional decimal count, then a tile character
fn pool_item(input: &str) -> PResult<'_, (usize, char)> {
    let (rest, count_str) = opt(digit1).parse(input)?;
    let (rest, c) = satisfy(|c: char| c.is_ascii_alphabetic() || c == BLANK_CHAR).parse(rest)?;

    let count = match count_str {
        Some(s) => s
            .parse::<usize>()
            .map_err(|e| nom::Err::Failure(Box::new(QueryError::ParseIntError(e))))?,
        None => 1,
    };

    Ok((rest, (count, c)))
}

fn open_cell(input: &str) -> PResult<'_, Cell> {
    alt((
        map(tag("."), |_| Cell::Open(Bonus::None)),
        map(tag("#"), |_| Cell::Open(Bonus::DoubleLetter)),
        map(tag("!"), |_| Cell::Open(Bonus::TripleLetter)),
    ))
    .parse(input)
}

fn fixed_cell(input: &str) -> PResult<'_, Cell> {
    map(satisfy(|c: char| c.is_ascii_uppercase()), |c| {
        Cell::Fixed(c.to_ascii_lowercase())
    })
    .parse(input)
}

fn required_cell(input: &str) -> PResult<'_, Cell> {
    map(satisfy(|c: char| c.is_ascii_lowercase()), |letter| {
        Cell::Required {
            letter,
            bonus: Bonus::None,
        }
    })
    .parse(input)
}

fn cell(input: &str) -> PResult<'_, Cell> {
    alt((open_cell, fixed_cell, required_cell)).parse(input)
}

// === Surface parsers ===

/// Parse a letter-pool string into a [`Rack`].
///
/// # Errors
///
/// `InvalidLetterPool` for any character outside digits, a-z, and `*`.
pub fn parse_letter_pool(s: &str) -> Result<Rack, Box<QueryError>> {
    let mut rack = Rack::new();
    let mut rest = s;

    while !rest.is_empty() {
        match pool_item(rest) {
            Ok((next, (count, c))) => {
                if c == BLANK_CHAR {
                    rack.add_blanks(count);
                } else {
                    rack.add(c.to_ascii_lowercase(), count);
                }
                rest = next;
            }
            Err(nom::Err::Failure(e)) => return Err(e),
            Err(_) => {
                return Err(Box::new(QueryError::InvalidLetterPool {
                    invalid_char: rest.chars().next().unwrap_or('?'),
                }));
            }
        }
    }

    Ok(rack)
}

/// Parse a word-spec string into a [`WordSpec`].
///
/// # Errors
///
/// `EmptyWordSpec` when nothing remains between the anchors;
/// `InvalidWordSpecChar` for any character outside the cell tokens.
pub fn parse_word_spec(s: &str) -> Result<WordSpec, Box<QueryError>> {
    let (body, anchor_left) = match s.strip_prefix('/') {
        Some(b) => (b, true),
        None => (s, false),
    };
    let (body, anchor_right) = match body.strip_suffix('/') {
        Some(b) => (b, true),
        None => (body, false),
    };

    if body.is_empty() {
        return Err(Box::new(QueryError::EmptyWordSpec));
    }

    let mut cells = Vec::with_capacity(body.len());
    let mut rest = body;
    while !rest.is_empty() {
        match cell(rest) {
            Ok((next, c)) => {
                cells.push(c);
                rest = next;
            }
            Err(_) => {
                return Err(Box::new(QueryError::InvalidWordSpecChar {
                    invalid_char: rest.chars().next().unwrap_or('?'),
                }));
            }
        }
    }

    Ok(WordSpec {
        cells,
        anchor_left,
        anchor_right,
    })
}

/// Parse one crossword token into a [`Crossword`]. Case-insensitive.
///
/// # Errors
///
/// `InvalidCrossword` unless the token is `[a-z]*` `.` `[a-z]*`.
pub fn parse_crossword(s: &str) -> Result<Crossword, Box<QueryError>> {
    let lowered = s.to_ascii_lowercase();
    let all_letters = |part: &str| part.chars().all(|c| c.is_ascii_lowercase());

    match lowered.split_once('.') {
        Some((prefix, suffix))
            if !suffix.contains('.') && all_letters(prefix) && all_letters(suffix) =>
        {
            Ok(Crossword {
                prefix: prefix.to_string(),
                suffix: suffix.to_string(),
            })
        }
        _ => Err(Box::new(QueryError::InvalidCrossword {
            token: s.to_string(),
        })),
    }
}

impl FromStr for Rack {
    type Err = Box<QueryError>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_letter_pool(s)
    }
}

impl FromStr for WordSpec {
    type Err = Box<QueryError>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_word_spec(s)
    }
}

impl FromStr for Crossword {
    type Err = Box<QueryError>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_crossword(s)
    }
}
