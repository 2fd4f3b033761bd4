pub mod grid;
pub mod theme;

pub use grid::{Direction, Placement, Position, WordGrid};
pub use theme::WordTheme;
