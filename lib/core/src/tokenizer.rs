// Shared tokenizer for the vectorizer, the reason explainer and trending.
use ahash::AHashMap;

/// Lowercases, strips punctuation and splits on whitespace.
///
/// Punctuation is removed rather than treated as a separator, so
/// `"e-procurement"` becomes the single token `"eprocurement"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tokenizer {
    min_token_len: usize,
}

impl Tokenizer {
    #[inline]
    #[must_use]
    pub fn new(min_token_len: usize) -> Self {
        Self { min_token_len }
    }

    #[inline]
    pub fn min_token_len(&self) -> usize {
        self.min_token_len
    }

    /// Lowercase and remove every character that is neither alphanumeric
    /// nor whitespace
    pub fn normalize(text: &str) -> String {
        text.chars()
            .filter(|c| c.is_alphanumeric() || c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect()
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        Self::normalize(text)
            .split_whitespace()
            .filter(|t| t.chars().count() >= self.min_token_len)
            .map(str::to_string)
            .collect()
    }

    /// Token frequencies in order of first occurrence
    pub fn counts(&self, text: &str) -> Vec<(String, u32)> {
        let mut slots: AHashMap<String, usize> = AHashMap::new();
        let mut counts: Vec<(String, u32)> = Vec::new();
        for token in self.tokenize(text) {
            match slots.get(&token) {
                Some(&slot) => counts[slot].1 += 1,
                None => {
                    slots.insert(token.clone(), counts.len());
                    counts.push((token, 1));
                }
            }
        }
        counts
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_MIN_TOKEN_LEN)
    }
}
