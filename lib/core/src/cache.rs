//! Content-addressed vector cache
//!
//! Maps a SHA-256 of the source text (plus the vectorizer settings) to its
//! computed [`Vector`]. Vectorization is deterministic, so two threads racing on the
//! same key write identical values and last-write-wins is safe.

use crate::config::VectorizerConfig;
use crate::vector::Vector;
use ahash::AHashMap;
use parking_lot::RwLock;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicU64, Ordering};

/// Cache key: SHA-256 over every setting that shapes the vector, then the raw text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    pub fn of(text: &str, config: &VectorizerConfig) -> Self {
        let mut hasher = Sha256::new();
        hasher.update((config.dim as u64).to_le_bytes());
        hasher.update((config.min_token_len as u64).to_le_bytes());
        hasher.update(text.as_bytes());
        Self(hasher.finalize().into())
    }
}

impl std::fmt::LowerHex for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for b in &self.0 {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

/// Snapshot of cache counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Injectable vector cache; share it behind an `Arc`
#[derive(Debug, Default)]
pub struct VectorCache {
    entries: RwLock<AHashMap<ContentHash, Vector>>,
    max_entries: Option<usize>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl VectorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop admitting new entries once `max_entries` are held
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            max_entries: Some(max_entries),
            ..Self::default()
        }
    }

    pub fn get(&self, key: &ContentHash) -> Option<Vector> {
        let found = self.entries.read().get(key).cloned();
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        found
    }

    pub fn insert(&self, key: ContentHash, vector: Vector) {
        let mut entries = self.entries.write();
        if let Some(max) = self.max_entries {
            if entries.len() >= max && !entries.contains_key(&key) {
                tracing::debug!(max, key = %format!("{:x}", key), "vector cache full, not admitting entry");
                return;
            }
        }
        entries.insert(key, vector);
    }

    /// Look up `key`, computing and storing the vector on a miss.
    ///
    /// The computation runs without holding the lock.
    pub fn get_or_insert_with<F>(&self, key: ContentHash, compute: F) -> Vector
    where
        F: FnOnce() -> Vector,
    {
        if let Some(v) = self.get(&key) {
            return v;
        }
        let vector = compute();
        self.insert(key, vector.clone());
        vector
    }

    pub fn max_entries(&self) -> Option<usize> {
        self.max_entries
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn key(text: &str, dim: usize) -> ContentHash {
        ContentHash::of(text, &VectorizerConfig::with_dim(dim))
    }

    #[test]
    fn test_hash_depends_on_config_and_text() {
        let a = key("bridge repair", 100);
        assert_eq!(a, key("bridge repair", 100));
        assert_ne!(a, key("bridge repair", 50));
        assert_ne!(a, key("bridge repairs", 100));

        let strict = VectorizerConfig {
            min_token_len: 4,
            ..VectorizerConfig::default()
        };
        assert_ne!(a, ContentHash::of("bridge repair", &strict));
    }

    #[test]
    fn test_hash_lower_hex() {
        let hex = format!("{:x}", key("bridge repair", 100));
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_get_or_insert_computes_once() {
        let cache = VectorCache::new();
        let text_key = key("text", 2);
        let mut calls = 0;
        let first = cache.get_or_insert_with(text_key, || {
            calls += 1;
            Vector::new(vec![1.0, 0.0])
        });
        let second = cache.get_or_insert_with(text_key, || {
            calls += 1;
            Vector::new(vec![0.0, 1.0])
        });
        assert_eq!(calls, 1);
        assert_eq!(first, second);

        let stats = cache.stats();
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_max_entries() {
        let cache = VectorCache::with_max_entries(1);
        cache.insert(key("a", 1), Vector::new(vec![1.0]));
        cache.insert(key("b", 1), Vector::new(vec![1.0]));
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&key("b", 1)).is_none());
    }

    #[test]
    fn test_concurrent_writers_same_key() {
        let cache = Arc::new(VectorCache::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    cache.get_or_insert_with(key("shared", 3), || {
                        Vector::new(vec![0.5, 0.5, 0.0])
                    })
                })
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap().as_slice(), &[0.5, 0.5, 0.0]);
        }
        assert_eq!(cache.len(), 1);
    }
}
