use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Move `steps` times along `(d_row, d_col)`, staying inside a `size`x`size` grid
    pub fn offset(self, d_row: isize, d_col: isize, steps: usize, size: usize) -> Option<Self> {
        let steps = isize::try_from(steps).ok()?;
        let row = (self.row as isize).checked_add(d_row.checked_mul(steps)?)?;
        let col = (self.col as isize).checked_add(d_col.checked_mul(steps)?)?;

        let in_bounds = |v: isize| v >= 0 && (v as usize) < size;
        if in_bounds(row) && in_bounds(col) {
            Some(Self::new(row as usize, col as usize))
        } else {
            None
        }
    }
}

/// Line along which a word is written into the grid
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Left to right
    Horizontal,
    /// Top to bottom
    Vertical,
    /// Down and to the right
    DiagonalDown,
    /// Up and to the right
    DiagonalUp,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagonalDown,
        Direction::DiagonalUp,
    ];

    /// (row step, column step)
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DiagonalDown => (1, 1),
            Direction::DiagonalUp => (-1, 1),
        }
    }
}

/// A word written into the grid and the cells it occupies, first letter first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub word: String,
    pub path: Vec<Position>,
}

/// A finished, fully populated word-search grid
#[derive(Debug, Clone)]
pub struct WordGrid {
    cells: Vec<Vec<char>>,
    placements: Vec<Placement>,
}

impl WordGrid {
    pub(crate) fn new(cells: Vec<Vec<char>>, placements: Vec<Placement>) -> Self {
        Self { cells, placements }
    }

    /// Build a grid from literal rows, locating each placed word in it. Returns `None`
    /// unless the rows form a non-empty square containing every placed word.
    #[cfg(test)]
    pub fn from_rows(rows: &[&str], placed: &[&str]) -> Option<Self> {
        let cells: Vec<Vec<char>> = rows.iter().map(|row| row.chars().collect()).collect();
        let size = cells.len();
        if size == 0 || cells.iter().any(|row| row.len() != size) {
            return None;
        }

        let mut grid = Self::new(cells, Vec::new());
        let placements = placed
            .iter()
            .map(|word| {
                let path = crate::game::WordFinder::locate(&grid, word)?;
                Some(Placement {
                    word: word.to_string(),
                    path,
                })
            })
            .collect::<Option<Vec<_>>>()?;
        grid.placements = placements;

        Some(grid)
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn rows(&self) -> &[Vec<char>] {
        &self.cells
    }

    pub fn letter(&self, pos: Position) -> Option<char> {
        self.cells.get(pos.row)?.get(pos.col).copied()
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Words that made it into the grid, in the order they were requested
    pub fn placed_words(&self) -> Vec<&str> {
        self.placements
            .iter()
            .map(|placement| placement.word.as_str())
            .collect()
    }

    /// Cells where `word` was written
    pub fn path_of(&self, word: &str) -> Option<&[Position]> {
        self.placements
            .iter()
            .find(|placement| placement.word == word)
            .map(|placement| placement.path.as_slice())
    }
}

impl fmt::Display for WordGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let line: Vec<String> = row.iter().map(|c| c.to_string()).collect();
            write!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_stays_in_bounds() {
        let start = Position::new(0, 0);
        assert_eq!(start.offset(1, 1, 4, 5), Some(Position::new(4, 4)));
        assert_eq!(start.offset(1, 1, 5, 5), None);
        assert_eq!(start.offset(-1, 1, 1, 5), None);
        assert_eq!(Position::new(4, 0).offset(-1, 1, 4, 5), Some(Position::new(0, 4)));
    }

    #[test]
    fn test_from_rows_requires_square() {
        assert!(WordGrid::from_rows(&["AB", "CD"], &[]).is_some());
        assert!(WordGrid::from_rows(&["AB", "C"], &[]).is_none());
        assert!(WordGrid::from_rows(&[], &[]).is_none());
    }

    #[test]
    fn test_from_rows_records_paths() {
        let grid = WordGrid::from_rows(&["CAT", "XOX", "XXG"], &["CAT", "COG"]).unwrap();
        assert_eq!(grid.placed_words(), vec!["CAT", "COG"]);
        assert_eq!(
            grid.path_of("COG"),
            Some(&[Position::new(0, 0), Position::new(1, 1), Position::new(2, 2)][..])
        );
        assert_eq!(grid.path_of("DOG"), None);
        assert!(WordGrid::from_rows(&["CAT", "XOX", "XXG"], &["DOG"]).is_none());
    }

    #[test]
    fn test_display_renders_rows() {
        let grid = WordGrid::from_rows(&["AB", "CD"], &[]).unwrap();
        assert_eq!(grid.to_string(), "A B\nC D");
        assert_eq!(grid.letter(Position::new(1, 0)), Some('C'));
        assert_eq!(grid.letter(Position::new(2, 0)), None);
    }
}
