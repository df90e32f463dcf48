use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tenderx_core::{SimilarityIndex, VectorCache, Vectorizer, VectorizerConfig};
use tenderx_similarity::{RankerConfig, RecommendationRanker, TrendingAggregator, TrendingConfig};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_POOL_SIZE: usize = 10_000;
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 100_000;

/// Server configuration. Nested engine configs keep their own defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Requests whose pool exceeds this are rejected
    #[serde(default = "default_max_pool_size")]
    pub max_pool_size: usize,
    #[serde(default = "default_true")]
    pub cache_enabled: bool,
    /// Vector cache capacity; new texts are not cached once it is reached
    #[serde(default = "default_cache_max_entries")]
    pub cache_max_entries: usize,
    #[serde(default)]
    pub vectorizer: VectorizerConfig,
    #[serde(default)]
    pub ranker: RankerConfig,
    #[serde(default)]
    pub trending: TrendingConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_max_pool_size() -> usize {
    DEFAULT_MAX_POOL_SIZE
}

fn default_cache_max_entries() -> usize {
    DEFAULT_CACHE_MAX_ENTRIES
}

fn default_true() -> bool {
    true
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: DEFAULT_PORT,
            max_pool_size: DEFAULT_MAX_POOL_SIZE,
            cache_enabled: true,
            cache_max_entries: DEFAULT_CACHE_MAX_ENTRIES,
            vectorizer: VectorizerConfig::default(),
            ranker: RankerConfig::default(),
            trending: TrendingConfig::default(),
        }
    }
}

/// Engine components shared by every worker
#[derive(Debug)]
pub struct ApiState {
    pub config: ApiConfig,
    pub vectorizer: Vectorizer,
    pub index: SimilarityIndex,
    pub ranker: RecommendationRanker,
    pub trending: TrendingAggregator,
    pub cache: Option<Arc<VectorCache>>,
}

impl ApiState {
    /// Validate `config` and build the engine components
    pub fn new(config: ApiConfig) -> tenderx_core::Result<Self> {
        if config.max_pool_size == 0 {
            return Err(tenderx_core::Error::InvalidConfig(
                "max_pool_size must be greater than zero".to_string(),
            ));
        }

        if config.cache_enabled && config.cache_max_entries == 0 {
            return Err(tenderx_core::Error::InvalidConfig(
                "cache_max_entries must be greater than zero when the cache is enabled".to_string(),
            ));
        }

        let cache = config
            .cache_enabled
            .then(|| Arc::new(VectorCache::with_max_entries(config.cache_max_entries)));

        let mut vectorizer = Vectorizer::new(config.vectorizer)?;
        if let Some(cache) = &cache {
            vectorizer = vectorizer.with_cache(cache.clone());
        }

        let index = SimilarityIndex::new();
        let ranker = RecommendationRanker::new(vectorizer.clone())
            .with_index(index.clone())
            .with_config(config.ranker);
        let trending = TrendingAggregator::new(config.trending)?;

        Ok(Self {
            config,
            vectorizer,
            index,
            ranker,
            trending,
            cache,
        })
    }
}
