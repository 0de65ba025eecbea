//! The joint placement search.
//!
//! For every alignment of the word spec permitted by the anchors, the
//! search walks the lexicon cell by cell, consuming rack tiles for open
//! cells and consulting the cross sets, and hands every completed word to
//! the collector. The admissible letters at an open cell are the three-way
//! intersection of the cell's cross set, the current trie node's children,
//! and the letters the rack can still supply.

use crate::letters::{index_to_letter, letter_index, ALPHABET_SIZE};
use crate::lexicon::{Lexicon, NodeId};
use crate::oracle::Oracle;
use crate::query::{Cell, Query, Rack, WordSpec};
use crate::results::{Collector, QueryResults};
use log::debug;

/// A fully realized candidate move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// First covered cell of the word spec.
    pub start: usize,
    /// One past the last covered cell.
    pub end: usize,
    /// Letter at each covered cell, fixed tiles included.
    pub letters: Vec<char>,
    /// Per covered open cell, in order: whether the tile used was a blank.
    pub blanks: Vec<bool>,
    /// How many rack tiles the placement consumes.
    pub tiles_used: usize,
}

impl Placement {
    /// The word formed on the main line.
    #[must_use]
    pub fn word(&self) -> String {
        self.letters.iter().collect()
    }
}

/// Run the full search and return ranked, deduplicated hits.
///
/// The engine itself cannot fail at runtime: an unsatisfiable query simply
/// yields an empty result set.
pub fn run_query(lexicon: &Lexicon, query: &Query, num_results: Option<usize>) -> QueryResults {
    let spec = &query.spec;
    let len = spec.len();

    // 1. Precompute the cross sets for every open cell.
    let oracle = Oracle::build(query, lexicon);

    // 2. Enumerate the alignments the anchors allow. A word may leave cells
    //    outside its range uncovered only if they are open; a fixed tile
    //    always joins the word it touches.
    let mut starts = vec![0];
    if !spec.anchor_left {
        for (i, cell) in spec.cells.iter().enumerate() {
            if cell.is_open() {
                starts.push(i + 1);
            } else {
                break;
            }
        }
    }

    let mut ends = vec![len];
    if !spec.anchor_right {
        for (i, cell) in spec.cells.iter().enumerate().rev() {
            if cell.is_open() {
                ends.push(i);
            } else {
                break;
            }
        }
    }

    // open-cell index for each cell position, shared by every alignment
    let open_before: Vec<usize> = (0..len).map(|i| spec.open_cells_before(i)).collect();

    // 3. Walk the lexicon over each alignment, collecting as we go.
    let mut collector = Collector::new(spec, &oracle, &query.crosswords);
    let mut alignments = 0usize;

    for &start in &starts {
        for &end in &ends {
            if end <= start {
                continue;
            }
            alignments += 1;
            let mut walker = Walker {
                lexicon,
                spec,
                oracle: &oracle,
                open_before: &open_before,
                start,
                end,
                rack: query.rack.clone(),
                letters: Vec::with_capacity(end - start),
                blanks: Vec::with_capacity(end - start),
                tiles_used: 0,
            };
            walker.extend(start, lexicon.root(), &mut collector);
        }
    }

    debug!("searched {alignments} alignment(s)");
    collector.into_results(num_results)
}

/// State of one alignment's recursive walk. The rack and the accumulators
/// are mutated on the way down and restored on the way back up.
struct Walker<'a> {
    lexicon: &'a Lexicon,
    spec: &'a WordSpec,
    oracle: &'a Oracle,
    open_before: &'a [usize],
    start: usize,
    end: usize,
    rack: Rack,
    letters: Vec<char>,
    blanks: Vec<bool>,
    tiles_used: usize,
}

impl Walker<'_> {
    fn extend(&mut self, i: usize, node: NodeId, collector: &mut Collector<'_>) {
        if i == self.end {
            // a placement that draws no tile is not a move
            if self.tiles_used > 0 && self.lexicon.is_terminal(node) {
                collector.push(&Placement {
                    start: self.start,
                    end: self.end,
                    letters: self.letters.clone(),
                    blanks: self.blanks.clone(),
                    tiles_used: self.tiles_used,
                });
            }
            return;
        }

        match self.spec.cells[i] {
            Cell::Fixed(letter) => {
                if let Some(next) = self.lexicon.step(node, letter) {
                    self.letters.push(letter);
                    self.extend(i + 1, next, collector);
                    self.letters.pop();
                }
            }
            cell => {
                let cross = self.oracle.get(self.open_before[i]);
                let required = match cell {
                    Cell::Required { letter, .. } => letter_index(letter),
                    _ => None,
                };

                for index in 0..ALPHABET_SIZE {
                    if required.is_some_and(|r| r != index) {
                        continue;
                    }
                    if !cross.allows_index(index) {
                        continue;
                    }
                    let Some(next) = self.lexicon.step_index(node, index) else {
                        continue;
                    };
                    let letter = index_to_letter(index);

                    // a direct tile and a blank are distinct placements with
                    // distinct scores, so both branches are explored
                    if self.rack.count_index(index) > 0 {
                        self.rack.take_index(index);
                        self.push_open(letter, false);
                        self.extend(i + 1, next, collector);
                        self.pop_open();
                        self.rack.put_index(index);
                    }
                    if self.rack.blank_count() > 0 {
                        self.rack.take_blank();
                        self.push_open(letter, true);
                        self.extend(i + 1, next, collector);
                        self.pop_open();
                        self.rack.put_blank();
                    }
                }
            }
        }
    }

    fn push_open(&mut self, letter: char, from_blank: bool) {
        self.letters.push(letter);
        self.blanks.push(from_blank);
        self.tiles_used += 1;
    }

    fn pop_open(&mut self) {
        self.letters.pop();
        self.blanks.pop();
        self.tiles_used -= 1;
    }
}
