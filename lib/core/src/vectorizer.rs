//! Bag-of-words vectorizer
//!
//! Turns free text into a fixed-length vector of normalized term frequencies.
//! The basis is per document: slot `i` holds the weight of this document's
//! `i`-th most frequent token, not of a shared vocabulary entry. Two vectors
//! therefore only line up when their frequent terms happen to fall in the same
//! slot order.

use crate::cache::{ContentHash, VectorCache};
use crate::config::VectorizerConfig;
use crate::tokenizer::Tokenizer;
use crate::vector::Vector;
use crate::Result;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Vectorizer {
    config: VectorizerConfig,
    tokenizer: Tokenizer,
    cache: Option<Arc<VectorCache>>,
}

impl Vectorizer {
    /// Create a vectorizer, rejecting invalid configs
    pub fn new(config: VectorizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            tokenizer: Tokenizer::new(config.min_token_len),
            cache: None,
        })
    }

    /// Attach a shared cache keyed by content hash
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<VectorCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.config.dim
    }

    #[inline]
    pub fn config(&self) -> &VectorizerConfig {
        &self.config
    }

    #[inline]
    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn cache(&self) -> Option<&Arc<VectorCache>> {
        self.cache.as_ref()
    }

    /// Vectorize `text`, going through the cache when one is attached.
    ///
    /// Never fails: empty or unrecognized text yields the zero vector.
    pub fn vectorize(&self, text: &str) -> Vector {
        match &self.cache {
            Some(cache) => {
                let key = ContentHash::of(text, &self.config);
                cache.get_or_insert_with(key, || self.compute(text))
            }
            None => self.compute(text),
        }
    }

    fn compute(&self, text: &str) -> Vector {
        let mut counts = self.tokenizer.counts(text);
        let total: u32 = counts.iter().map(|(_, c)| *c).sum();
        if total == 0 {
            return Vector::zeros(self.config.dim);
        }

        // Stable: equal counts keep first-occurrence order
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        let mut data = vec![0.0f32; self.config.dim];
        for (slot, (_, count)) in data.iter_mut().zip(counts.iter()) {
            *slot = *count as f32 / total as f32;
        }
        Vector::new(data)
    }
}

impl Default for Vectorizer {
    fn default() -> Self {
        let config = VectorizerConfig::default();
        Self {
            config,
            tokenizer: Tokenizer::new(config.min_token_len),
            cache: None,
        }
    }
}
