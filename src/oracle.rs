//! Per-open-cell crossword legality, precomputed before the search runs.
//!
//! For each open cell the oracle stores which letters keep the crossing word
//! legal (a 26-bit mask) and the fixed part of that word's score, so the
//! inner search loop pays one mask test instead of a dictionary lookup.

use crate::letters::{letter_value, ALPHABET_SIZE};
use crate::lexicon::Lexicon;
use crate::query::{Crossword, Query};

/// Bit mask with every letter allowed.
pub(crate) const ALL_LETTERS: u32 = (1 << ALPHABET_SIZE) - 1;

/// The set of letters that keep one open cell legal, plus the fixed score
/// contribution of the crossing word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossSet {
    /// Bit i set when letter i forms a valid crossing word
    /// (all bits set when the cell has no crossword).
    pub allowed: u32,
    /// Sum of letter values of the crossing word's pre-existing tiles.
    pub base_score: i32,
    /// Whether there is a crossing word to form and score at all.
    pub has_cross: bool,
}

impl CrossSet {
    fn unconstrained() -> Self {
        CrossSet {
            allowed: ALL_LETTERS,
            base_score: 0,
            has_cross: false,
        }
    }

    fn for_crossword(crossword: &Crossword, lexicon: &Lexicon) -> Self {
        let mut allowed = 0u32;

        // walk the prefix once, then try every letter against the suffix
        if let Some(prefix_node) = lexicon.walk(lexicon.root(), &crossword.prefix) {
            for i in 0..ALPHABET_SIZE {
                let legal = lexicon
                    .step_index(prefix_node, i)
                    .and_then(|n| lexicon.walk(n, &crossword.suffix))
                    .is_some_and(|n| lexicon.is_terminal(n));
                if legal {
                    allowed |= 1 << i;
                }
            }
        }

        let base_score = crossword
            .prefix
            .chars()
            .chain(crossword.suffix.chars())
            .map(letter_value)
            .sum();

        CrossSet {
            allowed,
            base_score,
            has_cross: true,
        }
    }

    pub(crate) fn allows_index(&self, index: usize) -> bool {
        self.allowed & (1 << index) != 0
    }
}

/// Precomputed cross sets, index-aligned with the open cells of the word spec.
#[derive(Debug, Clone)]
pub struct Oracle {
    sets: Vec<CrossSet>,
}

impl Oracle {
    pub fn build(query: &Query, lexicon: &Lexicon) -> Oracle {
        let sets: Vec<_> = query
            .crosswords
            .iter()
            .map(|crossword| {
                if crossword.is_unconstrained() {
                    CrossSet::unconstrained()
                } else {
                    CrossSet::for_crossword(crossword, lexicon)
                }
            })
            .collect();

        log::debug!(
            "built {} cross set(s), {} constrained",
            sets.len(),
            sets.iter().filter(|s| s.has_cross).count()
        );
        Oracle { sets }
    }

    pub(crate) fn get(&self, open_index: usize) -> &CrossSet {
        &self.sets[open_index]
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
