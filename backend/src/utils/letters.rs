use rand::Rng;

/// Filler alphabet for cells no word claimed
pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Pick a filler letter uniformly from A-Z
pub fn random_letter<R: Rng + ?Sized>(rng: &mut R) -> char {
    ALPHABET[rng.random_range(0..ALPHABET.len())] as char
}

/// Trim and uppercase a candidate word. Returns `None` for empty words or words
/// containing anything other than ASCII letters.
pub fn normalize_word(raw: &str) -> Option<String> {
    let word = raw.trim().to_ascii_uppercase();
    if word.is_empty() || !word.chars().all(|c| c.is_ascii_uppercase()) {
        return None;
    }
    Some(word)
}
