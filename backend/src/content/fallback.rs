use async_trait::async_trait;
use once_cell::sync::Lazy;

use super::ContentProvider;
use crate::models::WordTheme;

/// Payload served when the content API is unavailable
static FALLBACK_THEME: Lazy<WordTheme> = Lazy::new(|| {
    WordTheme::new(
        "Fast Food",
        &["LAVASH", "BURGER", "HOTDOG", "NONKABOB", "PITTER", "DONAR", "PIZZA", "COLA"],
    )
});

pub fn fallback_theme() -> WordTheme {
    FALLBACK_THEME.clone()
}

/// Provider that never leaves the process; used when no API key is configured
pub struct FallbackProvider;

#[async_trait]
impl ContentProvider for FallbackProvider {
    async fn fetch_word_theme(&self) -> anyhow::Result<WordTheme> {
        Ok(fallback_theme())
    }
}
