//! Result collection: dedup, scoring, ranking, top-N selection.

use crate::oracle::Oracle;
use crate::query::{Crossword, WordSpec};
use crate::scoring;
use crate::search::Placement;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

// A constant to split up items in our dedup hashes
const HASH_SPLIT: u16 = 0xFFFFu16;

/// One ranked answer row: the main-line word, the crossing words actually
/// formed (in open-cell order), and the total score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryHit {
    pub word: String,
    pub crosswords: Vec<String>,
    pub score: i32,
}

/// `WORD CROSSWORD... SCORE`, uppercased
impl fmt::Display for QueryHit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.word.to_ascii_uppercase())?;
        for crossword in &self.crosswords {
            write!(f, " {}", crossword.to_ascii_uppercase())?;
        }
        write!(f, " {}", self.score)
    }
}

/// Everything a finished query returns: the ranked hits plus how many
/// placements existed before any top-N truncation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResults {
    pub hits: Vec<QueryHit>,
    pub total: usize,
}

/// Accepts placements from the search, drops duplicates, scores the rest.
pub struct Collector<'a> {
    spec: &'a WordSpec,
    oracle: &'a Oracle,
    crosswords: &'a [Crossword],
    seen: HashSet<u64>,
    hits: Vec<QueryHit>,
}

impl<'a> Collector<'a> {
    pub fn new(spec: &'a WordSpec, oracle: &'a Oracle, crosswords: &'a [Crossword]) -> Self {
        Collector {
            spec,
            oracle,
            crosswords,
            seen: HashSet::new(),
            hits: Vec::new(),
        }
    }

    /// Stable fingerprint of a placement. Two placements are duplicates iff
    /// they agree on (start, end, letter sequence, blank mask).
    fn placement_key(placement: &Placement) -> u64 {
        let mut hasher = DefaultHasher::new();
        placement.start.hash(&mut hasher);
        placement.end.hash(&mut hasher);
        HASH_SPLIT.hash(&mut hasher);
        placement.letters.hash(&mut hasher);
        HASH_SPLIT.hash(&mut hasher);
        placement.blanks.hash(&mut hasher);
        hasher.finish()
    }

    pub fn push(&mut self, placement: &Placement) {
        if !self.seen.insert(Self::placement_key(placement)) {
            return;
        }

        let score = scoring::score_placement(self.spec, self.oracle, placement);
        let crosswords = self.formed_crosswords(placement);
        self.hits.push(QueryHit {
            word: placement.word(),
            crosswords,
            score,
        });
    }

    /// The crossing words actually formed: one per covered open cell that
    /// has a crossword, in open-cell order.
    fn formed_crosswords(&self, placement: &Placement) -> Vec<String> {
        let mut formed = Vec::new();
        let mut open_index = self.spec.open_cells_before(placement.start);

        for (offset, cell) in self.spec.cells[placement.start..placement.end]
            .iter()
            .enumerate()
        {
            if cell.is_open() {
                if !self.crosswords[open_index].is_unconstrained() {
                    formed.push(self.crosswords[open_index].materialize(placement.letters[offset]));
                }
                open_index += 1;
            }
        }
        formed
    }

    /// Rank by score descending, then word ascending, and truncate to
    /// `num_results` if given.
    pub fn into_results(mut self, num_results: Option<usize>) -> QueryResults {
        self.hits.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.word.cmp(&b.word))
                .then_with(|| a.crosswords.cmp(&b.crosswords))
        });

        let total = self.hits.len();
        if let Some(n) = num_results {
            self.hits.truncate(n);
        }
        QueryResults {
            hits: self.hits,
            total,
        }
    }
}
