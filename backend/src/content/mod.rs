pub mod fallback;
pub mod gemini;

use async_trait::async_trait;

use crate::models::WordTheme;

pub use fallback::FallbackProvider;
pub use gemini::GeminiProvider;

/// Supplies a topic and a list of candidate words at the start of a round
#[async_trait]
pub trait ContentProvider: Send + Sync {
    async fn fetch_word_theme(&self) -> anyhow::Result<WordTheme>;
}

/// Ask the provider for a theme, falling back to the built-in payload on any failure
pub async fn fetch_or_fallback(provider: &dyn ContentProvider) -> WordTheme {
    match provider.fetch_word_theme().await {
        Ok(theme) => theme,
        Err(e) => {
            tracing::warn!("Failed to fetch word theme: {:#}. Using fallback words.", e);
            fallback::fallback_theme()
        }
    }
}
