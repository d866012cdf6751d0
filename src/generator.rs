//! Randomized depth-first placement of words into a letter grid.
//!
//! The search keeps an explicit stack of [`SearchState`] frames instead of recursing. Each frame owns the grid as it
//! stands at that depth, the words still to place, and the untried directions and positions for the next word.
//! Backtracking is a pop.

use array2d::Array2D;
use log::{debug, trace};
use rand::{seq::SliceRandom, Rng};

use crate::{LineKey, Position, WordDirection, WordSpan};

/// Validated inputs for one run of the search.
pub(crate) struct Search<'w> {
    pub num_rows: usize,
    pub num_columns: usize,
    pub words: &'w [String],
    pub placeholder: char,
    pub filler: Vec<char>,
    pub directions: &'static [WordDirection],
    pub reset_positions_per_word: bool,
}

/// A fully placed and filled grid, with one span per word in input order.
pub(crate) struct Placement {
    pub grid: Array2D<char>,
    pub spans: Vec<(usize, WordSpan)>,
}

#[derive(Clone, Debug)]
struct SearchState {
    grid: Array2D<char>,
    /// Words `words[..remaining]` are still unplaced; the next one is `words[remaining - 1]`.
    remaining: usize,
    directions: Vec<WordDirection>,
    positions: Vec<Position>,
    /// Spans placed along this branch, tagged with the index of their word.
    spans: Vec<(usize, WordSpan)>,
}

impl<'w> Search<'w> {
    /// Runs the search to completion. Returns [`None`] once every branch is exhausted.
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Placement> {
        let words: Vec<Vec<char>> = self.words.iter().map(|word| word.chars().collect()).collect();

        debug!(
            "placing {} words into a {}x{} grid",
            words.len(),
            self.num_rows,
            self.num_columns
        );

        let root = SearchState {
            grid: Array2D::filled_with(self.placeholder, self.num_rows, self.num_columns),
            remaining: words.len(),
            directions: self.shuffled_directions(rng),
            positions: self.shuffled_positions(rng),
            spans: Vec::new(),
        };

        let mut states = vec![root];
        let mut iterations: u64 = 0;
        let mut pushed: u64 = 0;

        loop {
            let Some(state) = states.last_mut() else {
                debug!("search exhausted after {iterations} iterations ({pushed} frames pushed)");
                return None;
            };
            iterations += 1;

            if state.remaining == 0 {
                break;
            }

            let direction = match state.directions.pop() {
                Some(direction) => direction,
                None => {
                    // every direction failed here, move on to the next position
                    state.positions.pop();
                    state.directions = self.shuffled_directions(rng);
                    let Some(direction) = state.directions.pop() else {
                        states.pop();
                        continue;
                    };
                    direction
                }
            };

            let Some(&start) = state.positions.last() else {
                trace!("backtracking with {} words left", state.remaining);
                states.pop();
                continue;
            };

            let index = state.remaining - 1;
            let word = &words[index];

            let Some((grid, end)) = place_word(&state.grid, word, start, direction, self.placeholder)
            else {
                continue;
            };

            let key = LineKey::new(start, end);
            if state.spans.iter().any(|(_, span)| span.key() == key) {
                continue;
            }

            let positions = if self.reset_positions_per_word {
                self.shuffled_positions(rng)
            } else {
                state.positions.clone()
            };

            let mut spans = state.spans.clone();
            spans.push((index, WordSpan::new(start, end, word.len(), direction)));

            let child = SearchState {
                grid,
                remaining: index,
                directions: self.shuffled_directions(rng),
                positions,
                spans,
            };

            states.push(child);
            pushed += 1;
        }

        let SearchState {
            mut grid,
            mut spans,
            ..
        } = states.pop()?;

        debug!("search finished after {iterations} iterations ({pushed} frames pushed)");

        fill_placeholders(&mut grid, self.placeholder, &self.filler, rng);
        spans.sort_by_key(|(index, _)| *index);

        Some(Placement { grid, spans })
    }

    fn shuffled_directions<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<WordDirection> {
        let mut directions = self.directions.to_vec();
        directions.shuffle(rng);
        directions
    }

    fn shuffled_positions<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Position> {
        let num_columns = self.num_columns;
        let mut positions: Vec<Position> = (0..self.num_rows)
            .flat_map(|row| (0..num_columns).map(move |col| Position::new(row, col)))
            .collect();
        positions.shuffle(rng);
        positions
    }
}

/// Tries to write `word` into `grid` from `start` along `direction`.
///
/// Placeholder cells accept any letter, letter cells only accept the same letter. On success returns a copy of the
/// grid with the word written in and the position of the word's last letter. `grid` itself is never modified.
pub(crate) fn place_word(
    grid: &Array2D<char>,
    word: &[char],
    start: Position,
    direction: WordDirection,
    placeholder: char,
) -> Option<(Array2D<char>, Position)> {
    let last = word.len().checked_sub(1)?;

    // a straight line is in bounds iff both of its ends are
    let end = start.offset(direction, last, grid.num_rows(), grid.num_columns())?;
    let span = WordSpan::new(start, end, word.len(), direction);

    let fits = span.positions().zip(word).all(|(position, &ch)| {
        let cell = grid[(position.row, position.col)];
        cell == placeholder || cell == ch
    });

    if !fits {
        return None;
    }

    let mut placed = grid.clone();
    for (position, &ch) in span.positions().zip(word) {
        placed[(position.row, position.col)] = ch;
    }

    Some((placed, end))
}

fn fill_placeholders<R: Rng + ?Sized>(
    grid: &mut Array2D<char>,
    placeholder: char,
    letters: &[char],
    rng: &mut R,
) {
    for row in 0..grid.num_rows() {
        for col in 0..grid.num_columns() {
            if grid[(row, col)] == placeholder {
                grid[(row, col)] = letters[rng.gen_range(0..letters.len())];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use array2d::Array2D;

    use super::place_word;
    use crate::{Position, WordDirection};

    fn chars(word: &str) -> Vec<char> {
        word.chars().collect()
    }

    #[test]
    fn place_into_empty_grid() {
        let grid = Array2D::filled_with('#', 3, 3);

        let (placed, end) = place_word(
            &grid,
            &chars("CAT"),
            Position::new(0, 0),
            WordDirection::DiagonalDownRight,
            '#',
        )
        .unwrap();

        assert_eq!(end, Position::new(2, 2));
        assert_eq!(placed[(0, 0)], 'C');
        assert_eq!(placed[(1, 1)], 'A');
        assert_eq!(placed[(2, 2)], 'T');
        assert_eq!(placed[(0, 1)], '#');

        // the input grid is left alone
        assert!(grid.elements_row_major_iter().all(|&ch| ch == '#'));
    }

    #[test]
    fn out_of_bounds_fails() {
        let grid = Array2D::filled_with('#', 3, 3);

        assert!(place_word(&grid, &chars("CAT"), Position::new(0, 1), WordDirection::Right, '#').is_none());
        assert!(place_word(&grid, &chars("CAT"), Position::new(1, 0), WordDirection::Up, '#').is_none());
        assert!(place_word(&grid, &chars("CATS"), Position::new(0, 0), WordDirection::Down, '#').is_none());
    }

    #[test]
    fn conflicting_letter_fails() {
        let mut grid = Array2D::filled_with('#', 3, 3);
        grid[(0, 1)] = 'X';

        assert!(place_word(&grid, &chars("CAT"), Position::new(0, 0), WordDirection::Right, '#').is_none());
    }

    #[test]
    fn matching_letter_is_shared() {
        let mut grid = Array2D::filled_with('#', 3, 3);
        grid[(1, 2)] = 'A';

        let (placed, end) =
            place_word(&grid, &chars("BAT"), Position::new(0, 2), WordDirection::Down, '#').unwrap();

        assert_eq!(end, Position::new(2, 2));
        assert_eq!(placed[(0, 2)], 'B');
        assert_eq!(placed[(1, 2)], 'A');
        assert_eq!(placed[(2, 2)], 'T');
    }

    #[test]
    fn single_letter_word_ends_where_it_starts() {
        let grid = Array2D::filled_with('#', 1, 1);

        let (placed, end) = place_word(&grid, &chars("Q"), Position::new(0, 0), WordDirection::Left, '#').unwrap();

        assert_eq!(end, Position::new(0, 0));
        assert_eq!(placed[(0, 0)], 'Q');
    }
}
