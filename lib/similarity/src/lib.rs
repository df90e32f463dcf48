//! # TenderX Similarity
//!
//! Recommendation layer on top of `tenderx-core`.
//!
//! ## Features
//!
//! - **Preferences**: categories, skills, excluded keywords, budget and
//!   location constraints for one user
//! - **Two-phase ranking**: keyword similarity first, recency/popularity backfill
//! - **Explainability**: ordered rule table producing short reasons
//! - **Trending**: keyword and category frequencies over a time window
//!
//! ## Example
//!
//! ```rust
//! use chrono::Utc;
//! use tenderx_core::Document;
//! use tenderx_similarity::{MatchPhase, Preference, RecommendationRanker};
//!
//! let pool = vec![
//!     Document::tender("t1", "cloud migration kubernetes", Utc::now()).with_category("it_software"),
//!     Document::tender("t2", "office furniture supply", Utc::now()).with_category("office_supplies"),
//! ];
//! let preference = Preference::new("user-1")
//!     .with_categories(["it_software"])
//!     .with_keywords(["kubernetes"])
//!     .with_min_match_score(10.0);
//!
//! let items = RecommendationRanker::default().recommend(&preference, &pool, 5);
//! assert_eq!(items.len(), 1);
//! assert_eq!(items[0].phase, MatchPhase::Similarity);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Preference  │────>│ hard filter │────>│ Vectorizer  │
//! │ (profile)   │     │ (pool)      │     │ (keywords)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │                   │
//!                            │            ┌─────────────┐
//!                            │            │ Similarity  │
//!                            │            │ (phase 1)   │
//!                            │            └─────────────┘
//!                            │                   │
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │  Backfill   │────>│  Explainer  │
//!                     │ (phase 2)   │     │ (reasons)   │
//!                     └─────────────┘     └─────────────┘
//! ```

pub mod explain;
pub mod preference;
pub mod ranker;
pub mod trending;

pub use explain::{ReasonExplainer, ReasonKind, ReasonRule, DEFAULT_REASON, MAX_REASONS};
pub use preference::{BudgetRange, Preference, PreferenceError};
pub use ranker::{
    MatchPhase, RankerConfig, RecommendationItem, RecommendationRanker, RecommendationStats,
    Recommendations, DEFAULT_LIMIT,
};
pub use trending::{TrendingAggregator, TrendingConfig, TrendingEntry, TrendingReport};
