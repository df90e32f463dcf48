//! # TenderX
//!
//! Similarity and recommendation engine for a tender-bidding marketplace.
//!
//! TenderX turns tender and proposal text into fixed-length bag-of-words
//! vectors, ranks candidates by cosine similarity, produces personalized
//! recommendations with short human-readable reasons, and reports trending
//! keywords over a time window.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! tenderx --http-port 8080 --vector-dim 100
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use tenderx::prelude::*;
//! use chrono::Utc;
//!
//! let pool = vec![
//!     Document::tender("t1", "cloud migration kubernetes", Utc::now()).with_category("it_software"),
//!     Document::tender("t2", "kubernetes cluster security", Utc::now()).with_category("it_software"),
//! ];
//!
//! let preference = Preference::new("user-1")
//!     .with_categories(["it_software"])
//!     .with_keywords(["kubernetes"]);
//!
//! let ranker = RecommendationRanker::new(Vectorizer::default());
//! let items = ranker.recommend(&preference, &pool, 10);
//! assert_eq!(items.len(), 2);
//! assert!(!items[0].reasons.is_empty());
//! ```
//!
//! ## Crate Structure
//!
//! - `tenderx-core` - vectors, documents, vectorizer, filters, similarity index, cache
//! - `tenderx-similarity` - preferences, recommendation ranking, reasons, trending
//! - `tenderx-api` - REST endpoints over the engine

pub use tenderx_core::{
    CacheStats, Candidate, Document, DocumentFilter, DocumentId, DocumentKind, Error, Filter,
    FilterCondition, Query, Result, SimilarityIndex, SimilarityResult, Tokenizer, Vector,
    VectorCache, Vectorizer, VectorizerConfig,
};

pub use tenderx_similarity::{
    BudgetRange, MatchPhase, Preference, RecommendationItem, RecommendationRanker,
    RecommendationStats, Recommendations, ReasonExplainer, TrendingAggregator, TrendingConfig,
    TrendingEntry, TrendingReport,
};

pub use tenderx_api::{ApiConfig, ApiState, RestApi};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BudgetRange, Document, DocumentId, DocumentKind, Error, MatchPhase, Preference, Query,
        RecommendationRanker, Result, SimilarityIndex, TrendingAggregator, Vector, Vectorizer,
        VectorizerConfig,
    };
}
