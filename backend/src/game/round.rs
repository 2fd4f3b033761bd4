use std::time::Instant;

use uuid::Uuid;

use crate::{
    game::finder::WordFinder,
    models::{Position, WordGrid},
};

/// What happened when a player submitted a selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    Found(String),
    AlreadyFound(String),
    NotAWord,
    InvalidSelection,
}

/// One word-search round: a themed grid and the words found in it so far
#[derive(Debug, Clone)]
pub struct Round {
    pub id: Uuid,
    pub topic: String,
    pub created_at: Instant,
    grid: WordGrid,
    words: Vec<String>,
    found: Vec<String>,
}

impl Round {
    /// The words to find are the ones the generator managed to place, never the
    /// full requested list.
    pub fn new(topic: impl Into<String>, grid: WordGrid) -> Self {
        let mut words: Vec<String> = Vec::with_capacity(grid.placed_words().len());
        for word in grid.placed_words() {
            if !words.iter().any(|listed| listed == word) {
                words.push(word.to_string());
            }
        }

        Self {
            id: Uuid::new_v4(),
            topic: topic.into(),
            created_at: Instant::now(),
            grid,
            words,
            found: Vec::new(),
        }
    }

    pub fn grid(&self) -> &WordGrid {
        &self.grid
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn found(&self) -> &[String] {
        &self.found
    }

    pub fn is_complete(&self) -> bool {
        self.found.len() == self.words.len()
    }

    /// Cell where the first word not found yet was placed
    pub fn hint(&self) -> Option<(&str, Position)> {
        self.words
            .iter()
            .filter(|word| !self.found.contains(*word))
            .find_map(|word| {
                let start = *self.grid.path_of(word)?.first()?;
                Some((word.as_str(), start))
            })
    }

    /// Check a selection against the words still to find, then against the ones already found
    pub fn submit(&mut self, positions: &[Position]) -> SelectionOutcome {
        if !WordFinder::is_valid_selection(&self.grid, positions) {
            return SelectionOutcome::InvalidSelection;
        }

        let selected = WordFinder::extract_word(&self.grid, positions);
        let remaining: Vec<String> = self
            .words
            .iter()
            .filter(|word| !self.found.contains(*word))
            .cloned()
            .collect();

        if let Some(word) = WordFinder::match_word(&selected, &remaining) {
            tracing::debug!("Round {}: found {}", self.id, word);
            self.found.push(word.to_string());
            return SelectionOutcome::Found(word.to_string());
        }

        match WordFinder::match_word(&selected, &self.found) {
            Some(word) => SelectionOutcome::AlreadyFound(word.to_string()),
            None => SelectionOutcome::NotAWord,
        }
    }
}
