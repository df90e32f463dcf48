//! Brute-force cosine similarity over a pre-filtered candidate list.
//!
//! Candidate pools reach this component already narrowed by attribute
//! predicates, so an exact O(|candidates| × N) scan is used instead of an
//! approximate index.

use crate::document::{Document, DocumentId};
use crate::vector::Vector;
use crate::vectorizer::Vectorizer;
use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Pools at least this large are scored on the rayon pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1024;

/// One scored pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    /// The query document, absent for raw-vector queries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<DocumentId>,
    pub target_id: DocumentId,
    /// Cosine similarity in `[0, 1]`
    pub score: f32,
}

/// A vector eligible for ranking, with optional recency for tie-breaks
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub id: &'a DocumentId,
    pub vector: &'a Vector,
    pub recency: Option<DateTime<Utc>>,
}

impl<'a> Candidate<'a> {
    pub fn new(id: &'a DocumentId, vector: &'a Vector) -> Self {
        Self {
            id,
            vector,
            recency: None,
        }
    }

    #[must_use]
    pub fn with_recency(mut self, recency: DateTime<Utc>) -> Self {
        self.recency = Some(recency);
        self
    }
}

/// What to search with
#[derive(Debug, Clone, Copy)]
pub enum Query<'a> {
    Vector(&'a Vector),
    /// Vectorized on demand; its own id is always excluded
    Document(&'a Document),
}

#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    parallel_threshold: usize,
}

impl Default for SimilarityIndex {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl SimilarityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parallel_threshold(parallel_threshold: usize) -> Self {
        Self { parallel_threshold }
    }

    /// Rank `candidates` against `query` and keep the best `k`.
    ///
    /// Excluded ids are removed before scoring. Equal scores are ordered by
    /// recency (newer first) when both candidates carry it, otherwise they
    /// keep their input order.
    pub fn top_k(
        &self,
        query: &Vector,
        candidates: &[Candidate<'_>],
        k: usize,
        exclude_ids: &HashSet<DocumentId>,
    ) -> Vec<SimilarityResult> {
        if k == 0 || candidates.is_empty() {
            return Vec::new();
        }

        let mut ranked = self.rank(query, candidates, exclude_ids);
        ranked.truncate(k);

        ranked
            .into_iter()
            .map(|(candidate, score)| SimilarityResult {
                source_id: None,
                target_id: candidate.id.clone(),
                score,
            })
            .collect()
    }

    /// Score and sort every non-excluded candidate
    pub fn rank<'c, 'a>(
        &self,
        query: &Vector,
        candidates: &'c [Candidate<'a>],
        exclude_ids: &HashSet<DocumentId>,
    ) -> Vec<(&'c Candidate<'a>, f32)> {
        let score = |c: &'c Candidate<'a>| {
            if exclude_ids.contains(c.id) {
                None
            } else {
                Some((c, query.cosine_similarity(c.vector)))
            }
        };

        let mut scored: Vec<(&'c Candidate<'a>, f32)> = if candidates.len() >= self.parallel_threshold {
            candidates.par_iter().filter_map(score).collect()
        } else {
            candidates.iter().filter_map(score).collect()
        };

        // sort_by is stable; ties that compare Equal keep input order
        scored.sort_by(|(a, sa), (b, sb)| {
            OrderedFloat(*sb)
                .cmp(&OrderedFloat(*sa))
                .then_with(|| match (a.recency, b.recency) {
                    (Some(ra), Some(rb)) => rb.cmp(&ra),
                    _ => Ordering::Equal,
                })
        });

        tracing::debug!(
            candidates = candidates.len(),
            scored = scored.len(),
            "ranked similarity candidates"
        );
        scored
    }

    /// Top-`k` documents of `pool` most similar to `query`.
    ///
    /// Pool documents reuse their stored vector when it has the right length.
    pub fn find_similar(
        &self,
        query: Query<'_>,
        pool: &[Document],
        vectorizer: &Vectorizer,
        k: usize,
        exclude_ids: &HashSet<DocumentId>,
    ) -> Vec<SimilarityResult> {
        if pool.is_empty() || k == 0 {
            return Vec::new();
        }

        let (query_vector, source_id) = match query {
            Query::Vector(v) => (v.clone(), None),
            Query::Document(d) => (d.vector_or_compute(vectorizer), Some(d.id.clone())),
        };

        let mut excluded = exclude_ids.clone();
        if let Some(id) = &source_id {
            excluded.insert(id.clone());
        }

        let eligible: Vec<&Document> = pool.iter().filter(|d| !excluded.contains(&d.id)).collect();
        let vectors: Vec<Vector> = eligible
            .iter()
            .map(|d| d.vector_or_compute(vectorizer))
            .collect();
        let candidates: Vec<Candidate<'_>> = eligible
            .iter()
            .zip(vectors.iter())
            .map(|(d, v)| Candidate::new(&d.id, v).with_recency(d.updated_at))
            .collect();

        let mut results = self.top_k(&query_vector, &candidates, k, &excluded);
        for r in &mut results {
            r.source_id = source_id.clone();
        }
        results
    }
}
