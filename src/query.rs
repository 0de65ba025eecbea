//! Typed query model: the rack, the word specification, and the crosswords.
//!
//! A [`Query`] is the validated combination of the three. Parsing from the
//! user syntax lives in [`crate::parser`]; this module owns the types and
//! the invariants checked at construction.

use crate::errors::QueryError;
use crate::letters::{index_to_letter, letter_index, Bonus, ALPHABET_SIZE, BLANK_CHAR};
use std::fmt;

/// A finite multiset of tiles: per-letter counts plus a blank count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rack {
    counts: [u8; ALPHABET_SIZE],
    blanks: u8,
}

impl Rack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `n` tiles showing `letter` (lowercase). Non-letters are ignored.
    pub fn add(&mut self, letter: char, n: usize) {
        if let Some(i) = letter_index(letter) {
            self.counts[i] = self.counts[i].saturating_add(n.min(u8::MAX as usize) as u8);
        }
    }

    pub fn add_blanks(&mut self, n: usize) {
        self.blanks = self.blanks.saturating_add(n.min(u8::MAX as usize) as u8);
    }

    /// Tiles showing `letter` (blanks not included).
    pub fn count(&self, letter: char) -> usize {
        letter_index(letter).map_or(0, |i| self.counts[i] as usize)
    }

    pub(crate) fn count_index(&self, index: usize) -> u8 {
        self.counts[index]
    }

    pub fn blank_count(&self) -> usize {
        self.blanks as usize
    }

    /// Total number of tiles, blanks included.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum::<usize>() + self.blanks as usize
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    // take/put pairs keep the search's backtracking explicit; callers check
    // availability before taking
    pub(crate) fn take_index(&mut self, index: usize) {
        debug_assert!(self.counts[index] > 0);
        self.counts[index] -= 1;
    }

    pub(crate) fn put_index(&mut self, index: usize) {
        self.counts[index] += 1;
    }

    pub(crate) fn take_blank(&mut self) {
        debug_assert!(self.blanks > 0);
        self.blanks -= 1;
    }

    pub(crate) fn put_blank(&mut self) {
        self.blanks += 1;
    }

    /// Multiset containment with blank substitution: find the first letter
    /// (alphabetically) that this rack cannot cover when asked to supply all
    /// of `letters` simultaneously. `None` means the rack suffices.
    pub(crate) fn uncoverable_letter(&self, letters: impl IntoIterator<Item = char>) -> Option<char> {
        let mut need = [0usize; ALPHABET_SIZE];
        for c in letters {
            if let Some(i) = letter_index(c) {
                need[i] += 1;
            }
        }

        let mut blanks_left = self.blanks as usize;
        for (i, &needed) in need.iter().enumerate() {
            let short = needed.saturating_sub(self.counts[i] as usize);
            if short > blanks_left {
                return Some(index_to_letter(i));
            }
            blanks_left -= short;
        }
        None
    }
}

/// Letters in alphabetical order, then one `*` per blank.
impl fmt::Display for Rack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &count) in self.counts.iter().enumerate() {
            for _ in 0..count {
                write!(f, "{}", index_to_letter(i))?;
            }
        }
        for _ in 0..self.blanks {
            write!(f, "{BLANK_CHAR}")?;
        }
        Ok(())
    }
}

/// One square of the word specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// No tile yet; any rack tile may land here.
    Open(Bonus),
    /// No tile yet, but only `letter`, drawn from the rack, may land here.
    Required { letter: char, bonus: Bonus },
    /// A tile already on the board; scores its face value, no bonus.
    Fixed(char),
}

impl Cell {
    /// True for squares that receive a new tile.
    pub fn is_open(self) -> bool {
        !matches!(self, Cell::Fixed(_))
    }

    pub(crate) fn bonus(self) -> Bonus {
        match self {
            Cell::Open(bonus) | Cell::Required { bonus, .. } => bonus,
            Cell::Fixed(_) => Bonus::None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // word bonuses have no surface token; they render as a plain open cell
            Cell::Open(Bonus::DoubleLetter) => write!(f, "#"),
            Cell::Open(Bonus::TripleLetter) => write!(f, "!"),
            Cell::Open(_) => write!(f, "."),
            Cell::Required { letter, .. } => write!(f, "{letter}"),
            Cell::Fixed(letter) => write!(f, "{}", letter.to_ascii_uppercase()),
        }
    }
}

/// An ordered line of cells plus the two anchor flags.
///
/// The formed word must start at cell 0 iff `anchor_left` and end at the
/// last cell iff `anchor_right`; an unanchored side may leave a run of open
/// cells unused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSpec {
    pub cells: Vec<Cell>,
    pub anchor_left: bool,
    pub anchor_right: bool,
}

impl WordSpec {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of open (tile-receiving) cells.
    pub fn open_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_open()).count()
    }

    /// Number of open cells strictly before cell `i`.
    pub(crate) fn open_cells_before(&self, i: usize) -> usize {
        self.cells[..i].iter().filter(|c| c.is_open()).count()
    }
}

impl fmt::Display for WordSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.anchor_left {
            write!(f, "/")?;
        }
        for cell in &self.cells {
            write!(f, "{cell}")?;
        }
        if self.anchor_right {
            write!(f, "/")?;
        }
        Ok(())
    }
}

/// Perpendicular context for one open cell: the letters already on the board
/// before and after it on the crossing line. Both empty means no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Crossword {
    pub prefix: String,
    pub suffix: String,
}

impl Crossword {
    pub fn unconstrained() -> Self {
        Self::default()
    }

    pub fn is_unconstrained(&self) -> bool {
        self.prefix.is_empty() && self.suffix.is_empty()
    }

    /// The crossing word formed when `letter` lands on the cell.
    #[must_use]
    pub fn materialize(&self, letter: char) -> String {
        format!("{}{}{}", self.prefix, letter, self.suffix)
    }
}

impl fmt::Display for Crossword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.prefix, self.suffix)
    }
}

/// A validated query: rack, word spec, and one crossword per open cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub rack: Rack,
    pub spec: WordSpec,
    pub crosswords: Vec<Crossword>,
}

impl Query {
    /// Combine the parts, checking the model invariants:
    /// the spec has at least one open cell; the crossword count matches the
    /// open-cell count (an empty list means all-unconstrained); and the rack
    /// can supply every `Required` letter, counting blanks.
    ///
    /// # Errors
    ///
    /// `NoOpenCells`, `CrosswordCountMismatch`, or `RackInsufficient`.
    pub fn new(
        rack: Rack,
        spec: WordSpec,
        crosswords: Vec<Crossword>,
    ) -> Result<Query, Box<QueryError>> {
        let open_cells = spec.open_count();
        if open_cells == 0 {
            return Err(Box::new(QueryError::NoOpenCells {
                spec: spec.to_string(),
            }));
        }

        let crosswords = if crosswords.is_empty() {
            vec![Crossword::unconstrained(); open_cells]
        } else if crosswords.len() != open_cells {
            return Err(Box::new(QueryError::CrosswordCountMismatch {
                open_cells,
                provided: crosswords.len(),
            }));
        } else {
            crosswords
        };

        let required = spec.cells.iter().filter_map(|cell| match cell {
            Cell::Required { letter, .. } => Some(*letter),
            _ => None,
        });
        if let Some(letter) = rack.uncoverable_letter(required) {
            return Err(Box::new(QueryError::RackInsufficient { letter }));
        }

        Ok(Query {
            rack,
            spec,
            crosswords,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec_of(cells: Vec<Cell>) -> WordSpec {
        WordSpec {
            cells,
            anchor_left: false,
            anchor_right: false,
        }
    }

    #[test]
    fn test_rack_counts() {
        let mut rack = Rack::new();
        rack.add('a', 2);
        rack.add('q', 1);
        rack.add_blanks(1);

        assert_eq!(rack.count('a'), 2);
        assert_eq!(rack.count('q'), 1);
        assert_eq!(rack.count('z'), 0);
        assert_eq!(rack.blank_count(), 1);
        assert_eq!(rack.total(), 4);
        assert!(!rack.is_empty());
    }

    #[test]
    fn test_rack_take_put_round_trip() {
        let mut rack = Rack::new();
        rack.add('c', 1);
        rack.take_index(2);
        assert_eq!(rack.count('c'), 0);
        rack.put_index(2);
        assert_eq!(rack.count('c'), 1);
    }

    #[test]
    fn test_rack_display_sorted() {
        let mut rack = Rack::new();
        rack.add('t', 1);
        rack.add('a', 2);
        rack.add_blanks(2);
        assert_eq!(rack.to_string(), "aat**");
    }

    #[test]
    fn test_uncoverable_letter_direct() {
        let mut rack = Rack::new();
        rack.add('c', 1);
        rack.add('a', 1);
        assert_eq!(rack.uncoverable_letter(['c', 'a']), None);
        assert_eq!(rack.uncoverable_letter(['c', 'c']), Some('c'));
    }

    #[test]
    fn test_uncoverable_letter_blank_substitution() {
        let mut rack = Rack::new();
        rack.add('c', 1);
        rack.add_blanks(1);
        // the blank covers the missing 'a'
        assert_eq!(rack.uncoverable_letter(['c', 'a']), None);
        // one blank cannot cover two missing letters
        assert_eq!(rack.uncoverable_letter(['a', 'b', 'c']), Some('b'));
    }

    #[test]
    fn test_cell_is_open() {
        assert!(Cell::Open(Bonus::None).is_open());
        assert!(Cell::Required { letter: 'a', bonus: Bonus::None }.is_open());
        assert!(!Cell::Fixed('a').is_open());
    }

    #[test]
    fn test_open_cells_before() {
        let spec = spec_of(vec![
            Cell::Open(Bonus::None),
            Cell::Fixed('a'),
            Cell::Open(Bonus::None),
        ]);
        assert_eq!(spec.open_cells_before(0), 0);
        assert_eq!(spec.open_cells_before(1), 1);
        assert_eq!(spec.open_cells_before(2), 1);
        assert_eq!(spec.open_cells_before(3), 2);
    }

    #[test]
    fn test_crossword_materialize() {
        let cw = Crossword {
            prefix: "ca".to_string(),
            suffix: "s".to_string(),
        };
        assert_eq!(cw.materialize('t'), "cats");
        assert!(!cw.is_unconstrained());
        assert!(Crossword::unconstrained().is_unconstrained());
    }

    #[test]
    fn test_query_rejects_no_open_cells() {
        let rack = Rack::new();
        let spec = spec_of(vec![Cell::Fixed('c'), Cell::Fixed('a')]);
        let err = Query::new(rack, spec, vec![]).unwrap_err();
        assert!(matches!(*err, QueryError::NoOpenCells { .. }));
    }

    #[test]
    fn test_query_rejects_crossword_count_mismatch() {
        let rack = Rack::new();
        let spec = spec_of(vec![Cell::Open(Bonus::None), Cell::Open(Bonus::None)]);
        let err = Query::new(rack, spec, vec![Crossword::unconstrained()]).unwrap_err();
        assert!(matches!(
            *err,
            QueryError::CrosswordCountMismatch { open_cells: 2, provided: 1 }
        ));
    }

    #[test]
    fn test_query_fills_missing_crosswords() {
        let rack = Rack::new();
        let spec = spec_of(vec![Cell::Open(Bonus::None), Cell::Open(Bonus::None)]);
        let query = Query::new(rack, spec, vec![]).unwrap();
        assert_eq!(query.crosswords.len(), 2);
        assert!(query.crosswords.iter().all(Crossword::is_unconstrained));
    }

    #[test]
    fn test_query_rejects_unsatisfiable_required_letter() {
        let mut rack = Rack::new();
        rack.add('a', 1);
        let spec = spec_of(vec![
            Cell::Required { letter: 'q', bonus: Bonus::None },
            Cell::Open(Bonus::None),
        ]);
        let err = Query::new(rack, spec, vec![]).unwrap_err();
        assert!(matches!(*err, QueryError::RackInsufficient { letter: 'q' }));
    }

    #[test]
    fn test_query_accepts_required_letter_via_blank() {
        let mut rack = Rack::new();
        rack.add_blanks(1);
        let spec = spec_of(vec![Cell::Required { letter: 'q', bonus: Bonus::None }]);
        assert!(Query::new(rack, spec, vec![]).is_ok());
    }
}
