pub mod finder;
pub mod grid;
pub mod round;

pub use finder::WordFinder;
pub use grid::GridGenerator;
pub use round::{Round, SelectionOutcome};
