//! # TenderX Core
//!
//! Core library for the TenderX similarity engine.
//!
//! This crate provides the fundamental data structures and algorithms:
//!
//! - [`Vectorizer`] - Text to fixed-length term-frequency vector
//! - [`Vector`] - Dense vector with cosine similarity
//! - [`Document`] - A tender or proposal with its ranking attributes
//! - [`VectorCache`] - Content-addressed cache of computed vectors
//! - [`SimilarityIndex`] - Exact top-k cosine ranking
//! - [`DocumentFilter`] - Attribute predicates for candidate pools
//!
//! ## Example
//!
//! ```rust
//! use std::collections::HashSet;
//! use chrono::Utc;
//! use tenderx_core::{Document, Query, SimilarityIndex, Vectorizer};
//!
//! let vectorizer = Vectorizer::default();
//! let pool = vec![
//!     Document::tender("t1", "cloud migration kubernetes", Utc::now()),
//!     Document::tender("t2", "office furniture supply", Utc::now()),
//! ];
//!
//! let query = vectorizer.vectorize("kubernetes");
//! let results = SimilarityIndex::new().find_similar(
//!     Query::Vector(&query),
//!     &pool,
//!     &vectorizer,
//!     5,
//!     &HashSet::new(),
//! );
//! assert_eq!(results.len(), 2);
//! ```

pub mod cache;
pub mod config;
pub mod document;
pub mod error;
pub mod filter;
pub mod index;
pub mod tokenizer;
pub mod vector;
pub mod vectorizer;

/// Dot product and norm kernels used by [`Vector`]
pub mod simd;

pub use cache::{CacheStats, ContentHash, VectorCache};
pub use config::{VectorizerConfig, DEFAULT_MIN_TOKEN_LEN, DEFAULT_VECTOR_DIM};
pub use document::{Document, DocumentId, DocumentKind};
pub use error::{Error, Result};
pub use filter::{DocumentFilter, Filter, FilterCondition};
pub use index::{Candidate, Query, SimilarityIndex, SimilarityResult};
pub use tokenizer::Tokenizer;
pub use vector::Vector;
pub use vectorizer::Vectorizer;
