use serde::{Deserialize, Serialize};

/// A fixed-length vector of non-negative term-frequency weights
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Vector {
    data: Vec<f32>,
}

impl Vector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    /// All-zero vector: the representation of empty or unrecognized text
    #[inline]
    #[must_use]
    pub fn zeros(dim: usize) -> Self {
        Self {
            data: vec![0.0; dim],
        }
    }

    #[inline]
    #[must_use]
    pub fn from_slice(data: &[f32]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    #[must_use]
    pub fn into_inner(self) -> Vec<f32> {
        self.data
    }

    #[inline]
    pub fn magnitude(&self) -> f32 {
        crate::simd::norm_simd(&self.data)
    }

    /// True when every slot is zero
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|x| *x == 0.0)
    }

    /// Sum of all weights; ~1.0 for a frequency-normalized, non-empty text
    #[inline]
    pub fn total_weight(&self) -> f32 {
        crate::simd::sum_simd(&self.data)
    }

    /// Cosine similarity clipped to `[0, 1]`.
    ///
    /// Returns 0.0 when either side has zero magnitude or the dimensions
    /// differ, so the result is never NaN.
    #[inline]
    pub fn cosine_similarity(&self, other: &Vector) -> f32 {
        if self.dim() != other.dim() {
            return 0.0;
        }

        let norm_a = self.magnitude();
        let norm_b = other.magnitude();

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        let dot_product = crate::simd::dot_product_simd(&self.data, &other.data);
        (dot_product / (norm_a * norm_b)).clamp(0.0, 1.0)
    }
}

impl From<Vec<f32>> for Vector {
    fn from(data: Vec<f32>) -> Self {
        Self::new(data)
    }
}
