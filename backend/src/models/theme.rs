use serde::{Deserialize, Serialize};

use crate::utils::letters::normalize_word;

/// A themed word list supplied by the content provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WordTheme {
    pub topic: String,
    pub words: Vec<String>,
}

impl WordTheme {
    pub fn new(topic: impl Into<String>, words: &[&str]) -> Self {
        Self {
            topic: topic.into(),
            words: words.iter().map(|word| word.to_string()).collect(),
        }
    }

    /// Uppercase every word and drop the ones that cannot go into a grid of `max_len`:
    /// empty, non-alphabetic, too long, or already listed.
    pub fn normalized(self, max_len: usize) -> Self {
        let mut words: Vec<String> = Vec::with_capacity(self.words.len());

        for raw in &self.words {
            match normalize_word(raw) {
                Some(word) if word.chars().count() <= max_len => {
                    if !words.contains(&word) {
                        words.push(word);
                    }
                }
                _ => tracing::debug!("Skipping unusable word {:?} for topic {}", raw, self.topic),
            }
        }

        Self {
            topic: self.topic.trim().to_string(),
            words,
        }
    }
}
