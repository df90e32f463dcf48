//! Typed configuration for the vectorizer.
//!
//! Higher-level crates define their own config structs in the same shape:
//! a `Default` carrying the production values plus a `validate()` that
//! rejects settings the algorithms cannot honour.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default vector length
pub const DEFAULT_VECTOR_DIM: usize = 100;

/// Tokens shorter than this are dropped before counting
pub const DEFAULT_MIN_TOKEN_LEN: usize = 3;

/// Configuration for [`crate::Vectorizer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorizerConfig {
    /// Fixed vector length `N`
    #[serde(default = "default_dim")]
    pub dim: usize,
    /// Minimum token length in characters
    #[serde(default = "default_min_token_len")]
    pub min_token_len: usize,
}

fn default_dim() -> usize {
    DEFAULT_VECTOR_DIM
}

fn default_min_token_len() -> usize {
    DEFAULT_MIN_TOKEN_LEN
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            dim: DEFAULT_VECTOR_DIM,
            min_token_len: DEFAULT_MIN_TOKEN_LEN,
        }
    }
}

impl VectorizerConfig {
    pub fn with_dim(dim: usize) -> Self {
        Self {
            dim,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.dim == 0 {
            return Err(Error::InvalidConfig(
                "vector dimension must be greater than zero".to_string(),
            ));
        }
        if self.min_token_len == 0 {
            return Err(Error::InvalidConfig(
                "minimum token length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
