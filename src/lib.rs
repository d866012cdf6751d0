#![warn(missing_docs)]

//! # Word grids
//!
//! A crate that generates word search grids. Words are placed along any of eight directions by a randomized
//! backtracking search, may share matching letters, and every remaining cell is filled with a random letter.
//!
//! Alongside the grid, a [`WordSearch`] keeps an index from each word's `(start, end)` line to the word, so a line
//! drawn by a player can be resolved back to the word it covers with [`WordSearch::word_at`].
//!
//! The search is randomized and is allowed to fail: [`Error::NoSolution`] means no placement was found on this
//! attempt. Callers decide whether to retry with fresh randomness or relax the grid.

use std::{collections::BTreeSet, collections::HashMap, fmt::Display, ops::Index, str::FromStr};

use array2d::Array2D;
use rand::Rng;

mod generator;

/// Letters used to fill cells that no word occupies, unless configured otherwise.
pub const DEFAULT_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Marks a cell that no word has claimed yet while the search is running. Must not appear in any word.
pub const PLACEHOLDER: char = '#';

/// An error that happened when creating the word search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error<'a> {
    /// The search tried every position and direction without placing all of the given words in a grid of
    /// `rows x columns`. This is an expected outcome of a randomized search; retrying may succeed.
    NoSolution(usize, usize, &'a [String]),

    /// The grid has zero rows or zero columns.
    EmptyGrid(usize, usize),

    /// One of the given words is the empty string.
    EmptyWord,

    /// The placeholder character appears in one of the words or in the filler alphabet.
    PlaceholderConflict(char),

    /// The filler alphabet contains no characters.
    EmptyAlphabet,

    /// When the word search was configured to fill non-word spaces using only letters contained in the word, but
    /// no words were given when creating the word search, this error is returned.
    NoGivenLettersToUseInGrid,
}

impl Error<'_> {
    /// Whether trying again with fresh randomness can succeed. Only true for [`Error::NoSolution`]; every other
    /// variant is a problem with the configuration itself.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::NoSolution(..))
    }
}

impl<'a> Display for Error<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NoSolution(num_rows, num_columns, words) => {
                write!(
                    f,
                    "Could not place word list {:?} in a grid of {} rows x {} columns",
                    words, num_rows, num_columns
                )
            }
            Error::EmptyGrid(num_rows, num_columns) => {
                write!(
                    f,
                    "Grid dimensions {} rows x {} columns leave no cells to place words in",
                    num_rows, num_columns
                )
            }
            Error::EmptyWord => write!(f, "Word list contains an empty word"),
            Error::PlaceholderConflict(placeholder) => {
                write!(
                    f,
                    "Placeholder character {:?} appears in the word list or the filler alphabet",
                    placeholder
                )
            }
            Error::EmptyAlphabet => write!(f, "Filler alphabet is empty"),
            Error::NoGivenLettersToUseInGrid => {
                write!(f, "Word search was configured to only use the letters from the given word list to fill the grid, but no words were provided")
            }
        }
    }
}

impl<'a> std::error::Error for Error<'a> {}

/// The direction a word is placed in inside the word search grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WordDirection {
    /// The word goes up from the start position.
    Up,

    /// The word goes down from the start position.
    Down,

    /// The word goes left from the start position.
    Left,

    /// The word goes right from the start position.
    Right,

    /// The word goes diagonally up and left from the start position.
    DiagonalUpLeft,

    /// The word goes diagonally up and right from the start position.
    DiagonalUpRight,

    /// The word goes diagonally down and left from the start position.
    DiagonalDownLeft,

    /// The word goes diagonally down and right from the start position.
    DiagonalDownRight,
}

impl WordDirection {
    /// All eight directions.
    pub const ALL: [WordDirection; 8] = [
        WordDirection::Up,
        WordDirection::Down,
        WordDirection::Left,
        WordDirection::Right,
        WordDirection::DiagonalUpLeft,
        WordDirection::DiagonalUpRight,
        WordDirection::DiagonalDownLeft,
        WordDirection::DiagonalDownRight,
    ];

    /// The "forward-facing" directions, i.e. excluding [WordDirection::Up] and all left-facing directions.
    pub const FORWARD: [WordDirection; 4] = [
        WordDirection::Down,
        WordDirection::Right,
        WordDirection::DiagonalUpRight,
        WordDirection::DiagonalDownRight,
    ];

    /// The `(row, column)` change of one step in this direction.
    pub fn step(self) -> (isize, isize) {
        use WordDirection::*;

        match self {
            Up => (-1, 0),
            Down => (1, 0),
            Left => (0, -1),
            Right => (0, 1),
            DiagonalUpLeft => (-1, -1),
            DiagonalUpRight => (-1, 1),
            DiagonalDownLeft => (1, -1),
            DiagonalDownRight => (1, 1),
        }
    }

    /// Whether this is one of the [WordDirection::FORWARD] directions.
    pub fn is_forward(self) -> bool {
        Self::FORWARD.contains(&self)
    }

    /// Returns the direction of the straight line from `start` to `end`, or [`None`] if the two positions are
    /// equal or not on a common row, column or diagonal.
    pub fn between(start: Position, end: Position) -> Option<Self> {
        let d_row = end.row as isize - start.row as isize;
        let d_col = end.col as isize - start.col as isize;

        if (d_row, d_col) == (0, 0) {
            return None;
        }
        if d_row != 0 && d_col != 0 && d_row.abs() != d_col.abs() {
            return None;
        }

        let step = (d_row.signum(), d_col.signum());
        Self::ALL.into_iter().find(|direction| direction.step() == step)
    }
}

/// A cell of the grid, addressed by row and column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Zero-based row.
    pub row: usize,

    /// Zero-based column.
    pub col: usize,
}

impl Position {
    /// Creates a new [Position].
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The position `distance` steps away in `direction`, or [`None`] if it falls outside a grid of
    /// `num_rows x num_columns`.
    pub fn offset(
        self,
        direction: WordDirection,
        distance: usize,
        num_rows: usize,
        num_columns: usize,
    ) -> Option<Position> {
        let distance = isize::try_from(distance).ok()?;
        let (d_row, d_col) = direction.step();

        let row = self.row.checked_add_signed(d_row.checked_mul(distance)?)?;
        let col = self.col.checked_add_signed(d_col.checked_mul(distance)?)?;

        (row < num_rows && col < num_columns).then_some(Position { row, col })
    }
}

/// Key of the word index: the first and last cell of a placed word, in reading order.
///
/// Renders as `startRow:startCol:endRow:endCol` and parses back from the same form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineKey {
    /// Position of the word's first letter.
    pub start: Position,

    /// Position of the word's last letter.
    pub end: Position,
}

impl LineKey {
    /// Creates a new [LineKey].
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

impl Display for LineKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.start.row, self.start.col, self.end.row, self.end.col
        )
    }
}

/// Returned when a string is not a `startRow:startCol:endRow:endCol` line key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseLineKeyError(String);

impl Display for ParseLineKeyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Invalid line key {:?}, expected startRow:startCol:endRow:endCol",
            self.0
        )
    }
}

impl std::error::Error for ParseLineKeyError {}

impl FromStr for LineKey {
    type Err = ParseLineKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseLineKeyError(s.to_owned());

        let parts = s
            .split(':')
            .map(|part| {
                // usize::from_str also takes a leading '+', which would give one key two spellings
                if !part.starts_with(|ch: char| ch.is_ascii_digit()) {
                    return Err(invalid());
                }
                part.parse::<usize>().map_err(|_| invalid())
            })
            .collect::<Result<Vec<_>, _>>()?;

        match parts[..] {
            [start_row, start_col, end_row, end_col] => Ok(LineKey::new(
                Position::new(start_row, start_col),
                Position::new(end_row, end_col),
            )),
            _ => Err(invalid()),
        }
    }
}

/// Describes where a word's letters are placed in the word search grid. Includes a start and end coordinate, a
/// length, and a direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WordSpan {
    /// The coordinate in the grid of the first letter of the word.
    pub start: Position,

    /// The coordinate in the grid of the last letter of the word.
    pub end: Position,

    /// The length of the word that this WordSpan refers to.
    pub len: usize,

    /// The direction that the word goes in.
    pub direction: WordDirection,
}

impl WordSpan {
    /// Creates a new [WordSpan].
    pub fn new(start: Position, end: Position, len: usize, direction: WordDirection) -> Self {
        Self {
            start,
            end,
            len,
            direction,
        }
    }

    /// The key this span is stored under in the word index.
    pub fn key(&self) -> LineKey {
        LineKey::new(self.start, self.end)
    }

    /// Returns all positions of the grid that the word spans across, from first letter to last.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let start = self.start;
        let (d_row, d_col) = self.direction.step();

        (0..self.len as isize).map(move |i| Position {
            row: start.row.wrapping_add_signed(d_row * i),
            col: start.col.wrapping_add_signed(d_col * i),
        })
    }
}

/// The configuration for the word search. See [`WordSearch::new`] for details.
///
/// [`WordSearch::new`]: struct.WordSearch.html#method.new
#[derive(Clone, Copy, Debug)]
pub struct WordSearchConfig<'a> {
    /// The number of rows.
    pub num_rows: usize,

    /// The number of columns.
    pub num_columns: usize,

    /// The list of words that will appear in the word search. Words are expected to be in the same case as the
    /// alphabet (uppercase for the default one).
    pub words: &'a [String],

    /// Letters used to fill the cells that no word occupies.
    pub alphabet: &'a str,

    /// Sentinel for unclaimed cells during generation. It must not appear in any word or in the alphabet.
    pub placeholder: char,

    /// Whether to fill empty (non-word) spaces in the word search with only letters that appear in the given list
    /// of words. If the list of words is empty, an error is returned from [`WordSearch::new`].
    ///
    /// [`WordSearch::new`]: struct.WordSearch.html#method.new
    pub use_only_given_letters_in_grid: bool,

    /// Whether backward-facing directions are allowed. Backward-facing directions are any direction that is read
    /// right-to-left or down-to-up.
    pub allow_backward_words: bool,

    /// Whether every placed word hands the next one a freshly shuffled list of all positions. When false, the next
    /// word inherits the positions its predecessor had not yet ruled out, which narrows the search as it goes
    /// deeper but can miss placements that a full restart would find.
    pub reset_positions_per_word: bool,
}

impl Default for WordSearchConfig<'_> {
    fn default() -> Self {
        Self {
            num_rows: 10,
            num_columns: 10,
            words: &[],
            alphabet: DEFAULT_ALPHABET,
            placeholder: PLACEHOLDER,
            use_only_given_letters_in_grid: false,
            allow_backward_words: true,
            reset_positions_per_word: false,
        }
    }
}

/// A word search object that contains a grid of characters, each word's position within the grid, and an index
/// from `(start, end)` lines to words.
#[derive(Debug)]
pub struct WordSearch {
    grid: Array2D<char>,
    word_spans: Vec<(String, WordSpan)>,
    words_map: HashMap<LineKey, String>,
}

impl WordSearch {
    /// Creates and generates a new word search with the specified configuration, or returns an error if the word
    /// search can't be created. Randomness comes from [`rand::thread_rng`]; use [`WordSearch::with_rng`] to supply
    /// a seeded generator instead.
    ///
    /// When `config.use_only_given_letters_in_grid` is true, then the spaces in the grid that are not taken up by the
    /// given words will randomly select from all unique letters contained in the given words. As such, when this is
    /// set to true and the words list is empty, an [Error] will be returned. When it is false, letters from
    /// `config.alphabet` are used to fill empty space in the grid.
    ///
    /// When `config.allow_backward_words` is false, words will only appear in down, up-right, right, and down-right
    /// directions. Otherwise, any word direction is allowed, including left-facing and up-facing directions.
    ///
    /// Words longer than the grid, or more letters than it can hold, are not rejected up front: the search runs out
    /// of options and [`Error::NoSolution`] is returned.
    pub fn new<'a>(config: &WordSearchConfig<'a>) -> Result<Self, Error<'a>> {
        Self::with_rng(config, &mut rand::thread_rng())
    }

    /// Like [`WordSearch::new`], drawing every random choice from `rng`. The same configuration and the same
    /// sequence of random values always produce the same word search.
    pub fn with_rng<'a, R: Rng + ?Sized>(
        config: &WordSearchConfig<'a>,
        rng: &mut R,
    ) -> Result<Self, Error<'a>> {
        if config.num_rows == 0 || config.num_columns == 0 {
            return Err(Error::EmptyGrid(config.num_rows, config.num_columns));
        }

        if config.words.iter().any(String::is_empty) {
            return Err(Error::EmptyWord);
        }

        let filler = if config.use_only_given_letters_in_grid {
            Self::letters_from_words(config.words)?
        } else {
            config.alphabet.chars().collect()
        };

        if filler.is_empty() {
            return Err(Error::EmptyAlphabet);
        }

        if filler.contains(&config.placeholder)
            || config
                .words
                .iter()
                .any(|word| word.contains(config.placeholder))
        {
            return Err(Error::PlaceholderConflict(config.placeholder));
        }

        let search = generator::Search {
            num_rows: config.num_rows,
            num_columns: config.num_columns,
            words: config.words,
            placeholder: config.placeholder,
            filler,
            directions: if config.allow_backward_words {
                &WordDirection::ALL
            } else {
                &WordDirection::FORWARD
            },
            reset_positions_per_word: config.reset_positions_per_word,
        };

        let placement = search.run(rng).ok_or(Error::NoSolution(
            config.num_rows,
            config.num_columns,
            config.words,
        ))?;

        let word_spans: Vec<(String, WordSpan)> = placement
            .spans
            .into_iter()
            .map(|(index, span)| (config.words[index].clone(), span))
            .collect();

        let words_map = word_spans
            .iter()
            .map(|(word, span)| (span.key(), word.clone()))
            .collect();

        Ok(Self {
            grid: placement.grid,
            word_spans,
            words_map,
        })
    }

    /// Unique letters of the words, sorted so that seeded generation stays reproducible.
    fn letters_from_words<'a>(words: &[String]) -> Result<Vec<char>, Error<'a>> {
        if words.is_empty() {
            // we can't create the grid using letters from the given words if there are no words
            return Err(Error::NoGivenLettersToUseInGrid);
        }

        let letters: BTreeSet<char> = words.iter().flat_map(|word| word.chars()).collect();

        Ok(letters.into_iter().collect())
    }

    /// The number of rows in the word search grid.
    pub fn num_rows(&self) -> usize {
        self.grid.num_rows()
    }

    /// The number of columns in the word search grid.
    pub fn num_columns(&self) -> usize {
        self.grid.num_columns()
    }

    /// Provides a reference to the inner word search grid.
    pub fn grid(&self) -> &Array2D<char> {
        &self.grid
    }

    /// Gets the character at the specified coordinate, returning [`Option::None`] if the coordinates are out of bounds.
    pub fn get(&self, row: usize, column: usize) -> Option<char> {
        self.grid.get(row, column).copied()
    }

    /// A list containing tuples, where the first element is a word that appears in the list, and the second element contains
    /// information about the word's location within the list. Ordered like the configured word list.
    pub fn word_spans(&self) -> &[(String, WordSpan)] {
        &self.word_spans
    }

    /// The index from each placed word's `(start, end)` line to the word. Holds exactly one entry per word.
    pub fn words_map(&self) -> &HashMap<LineKey, String> {
        &self.words_map
    }

    /// The word whose first letter is at `start` and last letter is at `end`, if any. A line drawn in the opposite
    /// direction does not match.
    pub fn word_at(&self, start: Position, end: Position) -> Option<&str> {
        self.words_map
            .get(&LineKey::new(start, end))
            .map(String::as_str)
    }
}

impl Index<(usize, usize)> for WordSearch {
    type Output = char;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.grid[index]
    }
}

impl Display for WordSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut words_iter = self.word_spans.iter().map(|(word, _)| word.as_str());

        for row in self.grid.rows_iter() {
            for &ch in row {
                f.write_fmt(format_args!("{} ", ch))?;
            }

            f.write_fmt(format_args!("| {} \n", words_iter.next().unwrap_or("")))?;
        }

        Ok(())
    }
}
