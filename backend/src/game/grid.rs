use rand::Rng;
use thiserror::Error;

use crate::{
    models::{Direction, Placement, Position, WordGrid},
    utils::letters::random_letter,
};

/// Grid dimension used when nothing else is configured
pub const DEFAULT_GRID_SIZE: usize = 10;
/// Placement attempts per word before it is dropped
pub const DEFAULT_MAX_ATTEMPTS: u32 = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid size must be at least 1, got {0}")]
    InvalidSize(usize),
    #[error("placement retry budget must be at least 1")]
    InvalidRetryBudget,
}

/// Places words into a square letter grid along four line directions
#[derive(Debug, Clone)]
pub struct GridGenerator {
    size: usize,
    max_attempts: u32,
}

impl Default for GridGenerator {
    fn default() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl GridGenerator {
    pub fn new(size: usize, max_attempts: u32) -> Result<Self, GridError> {
        if size == 0 {
            return Err(GridError::InvalidSize(size));
        }
        if max_attempts == 0 {
            return Err(GridError::InvalidRetryBudget);
        }
        Ok(Self { size, max_attempts })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Generate a grid using the thread-local random source
    pub fn generate<S: AsRef<str>>(&self, words: &[S]) -> WordGrid {
        self.generate_with_rng(words, &mut rand::rng())
    }

    /// Generate a grid from an explicit random source.
    ///
    /// Each word gets up to `max_attempts` random (start, direction) tries. A word
    /// that never fits is left out of [`WordGrid::placed_words`]; no error is raised.
    /// Words may cross only where they share the same letter.
    pub fn generate_with_rng<S, R>(&self, words: &[S], rng: &mut R) -> WordGrid
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        let mut cells: Vec<Vec<Option<char>>> = vec![vec![None; self.size]; self.size];
        let mut placements = Vec::with_capacity(words.len());

        for word in words {
            let word = word.as_ref();
            let letters: Vec<char> = word.chars().collect();

            let path = (0..self.max_attempts).find_map(|_| {
                let start = Position::new(
                    rng.random_range(0..self.size),
                    rng.random_range(0..self.size),
                );
                let direction = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
                Self::fit(&cells, &letters, start, direction)
            });

            match path {
                Some(path) => {
                    for (pos, letter) in path.iter().zip(&letters) {
                        cells[pos.row][pos.col] = Some(*letter);
                    }
                    placements.push(Placement {
                        word: word.to_string(),
                        path,
                    });
                }
                None => tracing::debug!(
                    "Dropped {:?} after {} placement attempts on a {}x{} grid",
                    word,
                    self.max_attempts,
                    self.size,
                    self.size
                ),
            }
        }

        let cells = cells
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| cell.unwrap_or_else(|| random_letter(rng)))
                    .collect()
            })
            .collect();

        WordGrid::new(cells, placements)
    }

    /// Cells the word would occupy, or `None` if it leaves the grid or clashes
    /// with a different letter already written there.
    fn fit(
        cells: &[Vec<Option<char>>],
        letters: &[char],
        start: Position,
        direction: Direction,
    ) -> Option<Vec<Position>> {
        if letters.is_empty() {
            return None;
        }

        let size = cells.len();
        let (d_row, d_col) = direction.delta();
        let mut path = Vec::with_capacity(letters.len());

        for (i, letter) in letters.iter().enumerate() {
            let pos = start.offset(d_row, d_col, i, size)?;
            match cells[pos.row][pos.col] {
                Some(existing) if existing != *letter => return None,
                _ => path.push(pos),
            }
        }

        Some(path)
    }
}
