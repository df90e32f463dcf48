// Attribute predicates applied to candidate pools before scoring
use crate::document::{Document, DocumentKind};
use chrono::{DateTime, Utc};

pub trait Filter {
    fn matches(&self, document: &Document) -> bool;
}

/// Closures work as ad-hoc filters
impl<F> Filter for F
where
    F: Fn(&Document) -> bool,
{
    fn matches(&self, document: &Document) -> bool {
        self(document)
    }
}

/// Hard constraints over document attributes.
///
/// String comparisons are case-insensitive. Conditions over an optional
/// attribute (value, location) pass when the document does not carry it,
/// except `CategoryIn`, which requires a category.
#[derive(Debug, Clone)]
pub enum FilterCondition {
    CategoryIn(Vec<String>),
    LocationIn(Vec<String>),
    ValueWithin { min: Option<f64>, max: Option<f64> },
    /// Reject documents whose text contains any of these keywords
    ExcludesKeywords(Vec<String>),
    KindIs(DocumentKind),
    UpdatedSince(DateTime<Utc>),
    And(Vec<FilterCondition>),
    Or(Vec<FilterCondition>),
    Not(Box<FilterCondition>),
}

impl FilterCondition {
    pub fn category_in<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        FilterCondition::CategoryIn(lowercase_all(categories))
    }

    pub fn location_in<I, S>(locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        FilterCondition::LocationIn(lowercase_all(locations))
    }

    pub fn excludes_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        FilterCondition::ExcludesKeywords(lowercase_all(keywords))
    }
}

fn lowercase_all<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| s.as_ref().trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

pub struct DocumentFilter {
    condition: FilterCondition,
}

impl DocumentFilter {
    pub fn new(condition: FilterCondition) -> Self {
        Self { condition }
    }

    /// Filter that accepts every document
    pub fn accept_all() -> Self {
        Self::new(FilterCondition::And(Vec::new()))
    }

    pub fn condition(&self) -> &FilterCondition {
        &self.condition
    }

    /// Keep the documents that pass, preserving input order
    pub fn apply<'a>(&self, documents: &'a [Document]) -> Vec<&'a Document> {
        documents.iter().filter(|d| self.matches(d)).collect()
    }

    fn matches_condition(condition: &FilterCondition, document: &Document) -> bool {
        match condition {
            FilterCondition::CategoryIn(categories) => document
                .category
                .as_deref()
                .map(|c| categories.contains(&c.trim().to_lowercase()))
                .unwrap_or(false),
            FilterCondition::LocationIn(locations) => document
                .location
                .as_deref()
                .map(|l| locations.contains(&l.trim().to_lowercase()))
                .unwrap_or(true),
            FilterCondition::ValueWithin { min, max } => document
                .value
                .map(|v| min.map_or(true, |m| v >= m) && max.map_or(true, |m| v <= m))
                .unwrap_or(true),
            FilterCondition::ExcludesKeywords(keywords) => {
                if keywords.is_empty() {
                    return true;
                }
                let text = document.text().to_lowercase();
                !keywords.iter().any(|k| text.contains(k.as_str()))
            }
            FilterCondition::KindIs(kind) => document.kind == *kind,
            FilterCondition::UpdatedSince(since) => document.updated_at >= *since,
            FilterCondition::And(conditions) => conditions
                .iter()
                .all(|c| Self::matches_condition(c, document)),
            FilterCondition::Or(conditions) => conditions
                .iter()
                .any(|c| Self::matches_condition(c, document)),
            FilterCondition::Not(condition) => !Self::matches_condition(condition, document),
        }
    }
}

impl Filter for DocumentFilter {
    fn matches(&self, document: &Document) -> bool {
        Self::matches_condition(&self.condition, document)
    }
}
