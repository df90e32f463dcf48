//! User preference profile
//!
//! Edited by the user-profile subsystem and consumed read-only by the
//! ranker and the explainer. Sets are ordered so keyword concatenation and
//! reason texts are reproducible.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tenderx_core::{DocumentFilter, FilterCondition};

/// Inclusive budget bounds; either side may be open
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl BudgetRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn between(min: f64, max: f64) -> Self {
        Self::new(Some(min), Some(max))
    }

    /// At least one bound is set
    pub fn is_bounded(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |m| value >= m) && self.max.map_or(true, |m| value <= m)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preference {
    #[serde(alias = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub categories: BTreeSet<String>,
    #[serde(default)]
    pub keywords: BTreeSet<String>,
    #[serde(default, alias = "excludeKeywords")]
    pub exclude_keywords: BTreeSet<String>,
    #[serde(default, alias = "budgetRange")]
    pub budget_range: BudgetRange,
    #[serde(default)]
    pub locations: BTreeSet<String>,
    /// Minimum similarity on a 0-100 scale for the similarity phase
    #[serde(default, alias = "minMatchScore")]
    pub min_match_score: f32,
}

impl Preference {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories.extend(categories.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_exclude_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_locations<I, S>(mut self, locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locations.extend(locations.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_budget(mut self, budget_range: BudgetRange) -> Self {
        self.budget_range = budget_range;
        self
    }

    #[must_use]
    pub fn with_min_match_score(mut self, min_match_score: f32) -> Self {
        self.min_match_score = min_match_score;
        self
    }

    /// Keywords that are not blank after trimming
    pub fn effective_keywords(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(|k| k.trim()).filter(|k| !k.is_empty())
    }

    /// Space-joined keywords, or `None` when there is no keyword signal
    pub fn keyword_query(&self) -> Option<String> {
        let joined = self.effective_keywords().collect::<Vec<_>>().join(" ");
        if joined.is_empty() {
            None
        } else {
            Some(joined)
        }
    }

    /// `min_match_score` clamped to 0-100; NaN counts as 0
    pub fn match_threshold(&self) -> f32 {
        if self.min_match_score.is_nan() {
            return 0.0;
        }
        self.min_match_score.clamp(0.0, 100.0)
    }

    /// Whether a `[0, 1]` similarity clears the threshold
    pub fn accepts_score(&self, score: f32) -> bool {
        score * 100.0 >= self.match_threshold()
    }

    /// Hard constraints applied to a pool before any scoring
    pub fn hard_filter(&self) -> DocumentFilter {
        let mut conditions = Vec::new();
        if !self.categories.is_empty() {
            conditions.push(FilterCondition::category_in(&self.categories));
        }
        if self.budget_range.is_bounded() {
            conditions.push(FilterCondition::ValueWithin {
                min: self.budget_range.min,
                max: self.budget_range.max,
            });
        }
        if !self.exclude_keywords.is_empty() {
            conditions.push(FilterCondition::excludes_keywords(&self.exclude_keywords));
        }
        if !self.locations.is_empty() {
            conditions.push(FilterCondition::location_in(&self.locations));
        }
        DocumentFilter::new(FilterCondition::And(conditions))
    }

    /// Boundary validation for preferences arriving over the wire
    pub fn validate(&self) -> Result<(), PreferenceError> {
        if !(0.0..=100.0).contains(&self.min_match_score) {
            return Err(PreferenceError::MatchScoreOutOfRange(self.min_match_score));
        }
        if let (Some(min), Some(max)) = (self.budget_range.min, self.budget_range.max) {
            if min > max {
                return Err(PreferenceError::InvertedBudget { min, max });
            }
        }
        if [self.budget_range.min, self.budget_range.max]
            .iter()
            .flatten()
            .any(|v| !v.is_finite())
        {
            return Err(PreferenceError::NonFiniteBudget);
        }
        Ok(())
    }
}

/// Errors raised when validating a preference at the API boundary
#[derive(Debug, Clone, thiserror::Error)]
pub enum PreferenceError {
    #[error("min_match_score must be within 0-100, got {0}")]
    MatchScoreOutOfRange(f32),

    #[error("budget range is inverted: min {min} > max {max}")]
    InvertedBudget { min: f64, max: f64 },

    #[error("budget bounds must be finite numbers")]
    NonFiniteBudget,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tenderx_core::{Document, Filter};

    #[test]
    fn test_keyword_query_sorted_and_trimmed() {
        let pref = Preference::new("u1").with_keywords(["rust", " ", "kubernetes"]);
        assert_eq!(pref.keyword_query().as_deref(), Some("kubernetes rust"));
        assert_eq!(Preference::new("u2").keyword_query(), None);
    }

    #[test]
    fn test_match_threshold_clamped() {
        assert_eq!(Preference::new("u").with_min_match_score(250.0).match_threshold(), 100.0);
        assert_eq!(Preference::new("u").with_min_match_score(-5.0).match_threshold(), 0.0);
        assert_eq!(Preference::new("u").with_min_match_score(f32::NAN).match_threshold(), 0.0);
    }

    #[test]
    fn test_accepts_score() {
        let pref = Preference::new("u").with_min_match_score(50.0);
        assert!(pref.accepts_score(0.5));
        assert!(pref.accepts_score(0.9));
        assert!(!pref.accepts_score(0.49));
        assert!(Preference::new("u").accepts_score(0.0));
    }

    #[test]
    fn test_hard_filter_combines_constraints() {
        let pref = Preference::new("u")
            .with_categories(["it_software"])
            .with_exclude_keywords(["furniture"])
            .with_budget(BudgetRange::new(None, Some(10_000.0)));
        let filter = pref.hard_filter();
        let now = Utc::now();

        assert!(filter.matches(&Document::tender("1", "cloud", now).with_category("it_software")));
        assert!(!filter.matches(
            &Document::tender("2", "cloud", now)
                .with_category("it_software")
                .with_value(20_000.0)
        ));
        assert!(!filter.matches(
            &Document::tender("3", "furniture for IT office", now).with_category("it_software")
        ));
        assert!(!filter.matches(&Document::tender("4", "cloud", now).with_category("health")));
    }

    #[test]
    fn test_empty_preference_accepts_everything() {
        let filter = Preference::new("u").hard_filter();
        assert!(filter.matches(&Document::tender("1", "anything", Utc::now())));
    }

    #[test]
    fn test_validate() {
        assert!(Preference::new("u").validate().is_ok());
        assert!(matches!(
            Preference::new("u").with_min_match_score(120.0).validate(),
            Err(PreferenceError::MatchScoreOutOfRange(_))
        ));
        assert!(matches!(
            Preference::new("u").with_budget(BudgetRange::between(5.0, 1.0)).validate(),
            Err(PreferenceError::InvertedBudget { .. })
        ));
    }

    #[test]
    fn test_camel_case_json() {
        let pref: Preference = serde_json::from_str(
            r#"{
                "userId": "u9",
                "keywords": ["kubernetes"],
                "excludeKeywords": ["furniture"],
                "budgetRange": {"min": 100.0},
                "minMatchScore": 10
            }"#,
        )
        .unwrap();
        assert_eq!(pref.user_id, "u9");
        assert!(pref.exclude_keywords.contains("furniture"));
        assert_eq!(pref.budget_range.min, Some(100.0));
        assert!(pref.categories.is_empty());
        assert_eq!(pref.min_match_score, 10.0);
    }
}
