//! Two-phase recommendation ranking
//!
//! 1. **Similarity**: the preference keywords are vectorized and matched
//!    against the hard-filtered pool; results clearing `min_match_score` are
//!    kept in score order.
//! 2. **Fallback**: remaining slots are filled from the same filtered pool by
//!    recency, then popularity.
//!
//! Similarity items always precede fallback items and no document appears
//! twice.

use crate::explain::ReasonExplainer;
use crate::preference::Preference;
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tenderx_core::{Candidate, Document, DocumentId, SimilarityIndex, Vector, Vectorizer};

pub const DEFAULT_LIMIT: usize = 10;

/// Which phase produced a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    Similarity,
    Fallback,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationItem {
    pub document: Document,
    /// Keyword similarity in `[0, 1]`; 0 for fallback items without a keyword query
    pub score: f32,
    pub reasons: Vec<String>,
    pub phase: MatchPhase,
}

impl RecommendationItem {
    pub fn id(&self) -> &DocumentId {
        &self.document.id
    }
}

/// Summary of one `recommend` call
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecommendationStats {
    /// Pool size as received
    pub candidates_count: usize,
    /// Pool size after hard constraints and de-duplication
    pub filtered_count: usize,
    pub similarity_count: usize,
    pub fallback_count: usize,
    pub avg_score: f32,
    pub best_score: f32,
}

impl RecommendationStats {
    pub fn compute(items: &[RecommendationItem], candidates_count: usize, filtered_count: usize) -> Self {
        let similarity_count = items
            .iter()
            .filter(|i| i.phase == MatchPhase::Similarity)
            .count();
        let (avg_score, best_score) = if items.is_empty() {
            (0.0, 0.0)
        } else {
            let sum: f32 = items.iter().map(|i| i.score).sum();
            let best = items.iter().map(|i| i.score).fold(0.0f32, f32::max);
            (sum / items.len() as f32, best)
        };

        Self {
            candidates_count,
            filtered_count,
            similarity_count,
            fallback_count: items.len() - similarity_count,
            avg_score,
            best_score,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendations {
    pub items: Vec<RecommendationItem>,
    pub stats: RecommendationStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankerConfig {
    /// Limit used when the caller does not give one
    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecommendationRanker {
    vectorizer: Vectorizer,
    index: SimilarityIndex,
    explainer: ReasonExplainer,
    config: RankerConfig,
}

impl RecommendationRanker {
    /// Reasons are matched with the vectorizer's own tokenizer
    pub fn new(vectorizer: Vectorizer) -> Self {
        Self {
            explainer: ReasonExplainer::with_tokenizer(*vectorizer.tokenizer()),
            vectorizer,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: RankerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_index(mut self, index: SimilarityIndex) -> Self {
        self.index = index;
        self
    }

    pub fn vectorizer(&self) -> &Vectorizer {
        &self.vectorizer
    }

    pub fn config(&self) -> &RankerConfig {
        &self.config
    }

    pub fn recommend(
        &self,
        preference: &Preference,
        pool: &[Document],
        limit: usize,
    ) -> Vec<RecommendationItem> {
        self.recommend_with_stats(preference, pool, limit).items
    }

    pub fn recommend_with_stats(
        &self,
        preference: &Preference,
        pool: &[Document],
        limit: usize,
    ) -> Recommendations {
        let filtered = self.filter_pool(preference, pool);
        let filtered_count = filtered.len();

        let mut items: Vec<RecommendationItem> = Vec::with_capacity(limit.min(filtered_count));
        if limit == 0 || filtered.is_empty() {
            return Recommendations {
                stats: RecommendationStats::compute(&items, pool.len(), filtered_count),
                items,
            };
        }

        let mut chosen: AHashSet<&DocumentId> = AHashSet::new();
        let mut scores: AHashMap<&DocumentId, f32> = AHashMap::new();

        if let Some(query_text) = preference.keyword_query() {
            let query = self.vectorizer.vectorize(&query_text);
            let vectors: Vec<Vector> = filtered
                .iter()
                .map(|d| d.vector_or_compute(&self.vectorizer))
                .collect();
            let candidates: Vec<Candidate<'_>> = filtered
                .iter()
                .zip(vectors.iter())
                .map(|(d, v)| Candidate::new(&d.id, v).with_recency(d.updated_at))
                .collect();

            let by_id: AHashMap<&DocumentId, &Document> =
                filtered.iter().map(|d| (&d.id, *d)).collect();
            for (candidate, score) in self.index.rank(&query, &candidates, &HashSet::new()) {
                let Some(&document) = by_id.get(candidate.id) else {
                    continue;
                };
                scores.insert(&document.id, score);
                if items.len() < limit && preference.accepts_score(score) {
                    chosen.insert(&document.id);
                    items.push(self.item(document, score, preference, MatchPhase::Similarity));
                }
            }
        }

        if items.len() < limit {
            let mut backfill: Vec<&Document> = filtered
                .iter()
                .copied()
                .filter(|d| !chosen.contains(&d.id))
                .collect();
            backfill.sort_by(|a, b| {
                b.updated_at
                    .cmp(&a.updated_at)
                    .then_with(|| b.view_count.cmp(&a.view_count))
            });

            let remaining = limit - items.len();
            for document in backfill.into_iter().take(remaining) {
                let score = scores.get(&document.id).copied().unwrap_or(0.0);
                items.push(self.item(document, score, preference, MatchPhase::Fallback));
            }
        }

        let stats = RecommendationStats::compute(&items, pool.len(), filtered_count);
        tracing::debug!(
            user_id = %preference.user_id,
            candidates = stats.candidates_count,
            filtered = stats.filtered_count,
            similarity = stats.similarity_count,
            fallback = stats.fallback_count,
            "computed recommendations"
        );

        Recommendations { items, stats }
    }

    /// Hard constraints, then first-occurrence de-duplication by id
    fn filter_pool<'p>(&self, preference: &Preference, pool: &'p [Document]) -> Vec<&'p Document> {
        let filter = preference.hard_filter();
        let mut seen: AHashSet<&DocumentId> = AHashSet::new();
        filter
            .apply(pool)
            .into_iter()
            .filter(|d| seen.insert(&d.id))
            .collect()
    }

    fn item(
        &self,
        document: &Document,
        score: f32,
        preference: &Preference,
        phase: MatchPhase,
    ) -> RecommendationItem {
        RecommendationItem {
            document: document.clone(),
            score,
            reasons: self.explainer.explain(document, preference),
            phase,
        }
    }
}
