use std::cmp::Ordering;

use crate::models::{Position, WordGrid};

/// Row and column steps a player may sweep along: the four placement lines and their reverses
const READ_DIRECTIONS: [(isize, isize); 8] = [
    (0, 1),
    (1, 0),
    (1, 1),
    (-1, 1),
    (0, -1),
    (-1, 0),
    (-1, -1),
    (1, -1),
];

pub struct WordFinder;

impl WordFinder {
    /// Expand a start/end pair into every cell on the straight line between them.
    /// Both ends must lie inside a `size`x`size` grid. Only horizontal, vertical and
    /// 45 degree lines are accepted; a single cell is not a line.
    pub fn line(start: Position, end: Position, size: usize) -> Option<Vec<Position>> {
        let inside = |pos: &Position| pos.row < size && pos.col < size;
        if !inside(&start) || !inside(&end) {
            return None;
        }

        let rows = start.row.abs_diff(end.row);
        let cols = start.col.abs_diff(end.col);

        let steps = rows.max(cols);
        if steps == 0 {
            return None;
        }
        if rows != 0 && cols != 0 && rows != cols {
            return None;
        }

        let direction = |from: usize, to: usize| match to.cmp(&from) {
            Ordering::Greater => 1,
            Ordering::Less => -1,
            Ordering::Equal => 0,
        };
        let (step_row, step_col) = (direction(start.row, end.row), direction(start.col, end.col));

        (0..=steps)
            .map(|i| start.offset(step_row, step_col, i, size))
            .collect()
    }

    /// Check that positions are in bounds and walk a single straight line one cell at a time
    pub fn is_valid_selection(grid: &WordGrid, positions: &[Position]) -> bool {
        if positions.is_empty() {
            return false;
        }

        let size = grid.size();
        if !positions.iter().all(|pos| pos.row < size && pos.col < size) {
            return false;
        }

        if positions.len() == 1 {
            return true;
        }

        let step = Self::step(&positions[0], &positions[1]);
        step.is_some()
            && positions
                .windows(2)
                .all(|window| Self::step(&window[0], &window[1]) == step)
    }

    /// Unit step between two neighbouring cells, including diagonals
    fn step(from: &Position, to: &Position) -> Option<(isize, isize)> {
        let d_row = to.row as isize - from.row as isize;
        let d_col = to.col as isize - from.col as isize;

        if d_row.abs() <= 1 && d_col.abs() <= 1 && (d_row, d_col) != (0, 0) {
            Some((d_row, d_col))
        } else {
            None
        }
    }

    /// Read the letters under the selected cells
    pub fn extract_word(grid: &WordGrid, positions: &[Position]) -> String {
        positions
            .iter()
            .filter_map(|pos| grid.letter(*pos))
            .collect()
    }

    /// The candidate spelled by the selection, read forwards first and then backwards
    pub fn match_word<'a>(selected: &str, candidates: &'a [String]) -> Option<&'a str> {
        let reversed: String = selected.chars().rev().collect();

        candidates
            .iter()
            .find(|word| word.as_str() == selected)
            .or_else(|| candidates.iter().find(|word| **word == reversed))
            .map(String::as_str)
    }

    /// Find the cells spelling `word` in any of the eight reading directions
    pub fn locate(grid: &WordGrid, word: &str) -> Option<Vec<Position>> {
        let letters: Vec<char> = word.chars().collect();
        let first = *letters.first()?;
        let size = grid.size();

        for row in 0..size {
            for col in 0..size {
                let start = Position::new(row, col);
                if grid.letter(start) != Some(first) {
                    continue;
                }

                for (d_row, d_col) in READ_DIRECTIONS {
                    let path: Option<Vec<Position>> = (0..letters.len())
                        .map(|i| start.offset(d_row, d_col, i, size))
                        .collect();

                    if let Some(path) = path {
                        let matches = path
                            .iter()
                            .zip(&letters)
                            .all(|(pos, letter)| grid.letter(*pos) == Some(*letter));
                        if matches {
                            return Some(path);
                        }
                    }
                }
            }
        }

        None
    }
}
