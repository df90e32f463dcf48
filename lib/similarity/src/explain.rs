//! Human-readable reasons for a recommendation
//!
//! Rules are data: an ordered table of matcher + template pairs evaluated in
//! sequence. Every rule that fires contributes one reason; at most
//! [`MAX_REASONS`] are kept.

use crate::preference::Preference;
use serde::Serialize;
use smallvec::SmallVec;
use tenderx_core::{Document, Tokenizer};

/// Reasons kept per recommendation
pub const MAX_REASONS: usize = 3;

/// Keywords quoted in the skills reason
pub const MAX_MATCHED_KEYWORDS: usize = 2;

pub const DEFAULT_REASON: &str = "Popular item in your area of interest";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonKind {
    Category,
    Skills,
    Budget,
    Location,
}

/// One row of the rule table.
///
/// `matcher` returns the value substituted for `{}` in `template`, or `None`
/// when the rule does not fire. Text rules tokenize with the same tokenizer
/// the vectorizer uses.
#[derive(Clone, Copy)]
pub struct ReasonRule {
    pub kind: ReasonKind,
    pub template: &'static str,
    matcher: fn(&Document, &Preference, &Tokenizer) -> Option<String>,
}

impl ReasonRule {
    pub fn evaluate(
        &self,
        document: &Document,
        preference: &Preference,
        tokenizer: &Tokenizer,
    ) -> Option<String> {
        (self.matcher)(document, preference, tokenizer).map(|arg| self.template.replace("{}", &arg))
    }
}

impl std::fmt::Debug for ReasonRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReasonRule")
            .field("kind", &self.kind)
            .field("template", &self.template)
            .finish()
    }
}

const RULES: [ReasonRule; 4] = [
    ReasonRule {
        kind: ReasonKind::Category,
        template: "Matches your preferred category: {}",
        matcher: category_match,
    },
    ReasonRule {
        kind: ReasonKind::Skills,
        template: "Matches your skills: {}",
        matcher: keyword_match,
    },
    ReasonRule {
        kind: ReasonKind::Budget,
        template: "Within your preferred budget range",
        matcher: budget_match,
    },
    ReasonRule {
        kind: ReasonKind::Location,
        template: "Located in your preferred area: {}",
        matcher: location_match,
    },
];

fn contains_ignore_case<'a>(set: impl IntoIterator<Item = &'a String>, value: &str) -> bool {
    let value = value.trim().to_lowercase();
    set.into_iter().any(|s| s.trim().to_lowercase() == value)
}

fn category_match(document: &Document, preference: &Preference, _: &Tokenizer) -> Option<String> {
    let category = document.category.as_deref()?;
    contains_ignore_case(&preference.categories, category).then(|| category.to_string())
}

fn keyword_match(document: &Document, preference: &Preference, tokenizer: &Tokenizer) -> Option<String> {
    let tokens = tokenizer.tokenize(document.text());
    if tokens.is_empty() {
        return None;
    }

    let mut matched: SmallVec<[&str; MAX_MATCHED_KEYWORDS]> = SmallVec::new();
    for keyword in preference.effective_keywords() {
        let needle = keyword.to_lowercase();
        let hit = tokens
            .iter()
            .any(|t| t.contains(needle.as_str()) || needle.contains(t.as_str()));
        if hit {
            matched.push(keyword);
            if matched.len() == MAX_MATCHED_KEYWORDS {
                break;
            }
        }
    }

    (!matched.is_empty()).then(|| matched.join(", "))
}

fn budget_match(document: &Document, preference: &Preference, _: &Tokenizer) -> Option<String> {
    let value = document.value?;
    (preference.budget_range.is_bounded() && preference.budget_range.contains(value))
        .then(String::new)
}

fn location_match(document: &Document, preference: &Preference, _: &Tokenizer) -> Option<String> {
    let location = document.location.as_deref()?;
    contains_ignore_case(&preference.locations, location).then(|| location.to_string())
}

/// Explainer over the fixed rule table
#[derive(Debug, Clone, Copy, Default)]
pub struct ReasonExplainer {
    tokenizer: Tokenizer,
}

impl ReasonExplainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match skills with `tokenizer`; pass the ranking vectorizer's tokenizer
    pub fn with_tokenizer(tokenizer: Tokenizer) -> Self {
        Self { tokenizer }
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// The rules in evaluation order
    pub fn rules(&self) -> &'static [ReasonRule] {
        &RULES
    }

    /// Reasons for recommending `document`; never empty
    pub fn explain(&self, document: &Document, preference: &Preference) -> Vec<String> {
        let mut reasons: Vec<String> = RULES
            .iter()
            .filter_map(|rule| rule.evaluate(document, preference, &self.tokenizer))
            .take(MAX_REASONS)
            .collect();

        if reasons.is_empty() {
            reasons.push(DEFAULT_REASON.to_string());
        }
        reasons
    }
}
