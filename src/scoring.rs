//! Standard Scrabble scoring over realized placements.

use crate::letters::letter_value;
use crate::oracle::Oracle;
use crate::query::{Cell, WordSpec};
use crate::search::Placement;

const FULL_RACK: usize = 7;
const FULL_RACK_BONUS: i32 = 50;

/// Score a placement:
///
/// 1. Each covered cell contributes its letter value to the main-line sum;
///    newly placed tiles get their cell's letter multiplier, fixed tiles
///    their face value, blanks zero.
/// 2. The main-line sum is multiplied by the product of the word
///    multipliers of the newly covered cells.
/// 3. Each crossing word scores its placed letter (with the cell's letter
///    multiplier) plus its fixed base, all times that one cell's word
///    multiplier. Main-line word multipliers never reach crossings.
/// 4. Using all seven rack tiles adds 50.
pub fn score_placement(spec: &WordSpec, oracle: &Oracle, placement: &Placement) -> i32 {
    let mut letter_sum = 0;
    let mut word_multiplier = 1;
    let mut cross_score = 0;

    let mut open_index = spec.open_cells_before(placement.start);
    let mut blank_slot = 0;

    for (offset, cell) in spec.cells[placement.start..placement.end].iter().enumerate() {
        let letter = placement.letters[offset];
        match cell {
            Cell::Fixed(_) => letter_sum += letter_value(letter),
            _ => {
                let from_blank = placement.blanks[blank_slot];
                blank_slot += 1;

                let value = if from_blank { 0 } else { letter_value(letter) };
                let bonus = cell.bonus();
                let placed = value * bonus.letter_multiplier();

                letter_sum += placed;
                word_multiplier *= bonus.word_multiplier();

                let cross = oracle.get(open_index);
                if cross.has_cross {
                    cross_score += (placed + cross.base_score) * bonus.word_multiplier();
                }
                open_index += 1;
            }
        }
    }

    let mut total = letter_sum * word_multiplier + cross_score;
    if placement.tiles_used == FULL_RACK {
        total += FULL_RACK_BONUS;
    }
    total
}
