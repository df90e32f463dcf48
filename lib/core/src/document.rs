use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::vector::Vector;
use crate::vectorizer::Vectorizer;

/// Which record a document was derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Tender,
    Proposal,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentId {
    Integer(u64),
    Uuid(Uuid),
    String(String),
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentId::String(s) => write!(f, "{}", s),
            DocumentId::Uuid(u) => write!(f, "{}", u),
            DocumentId::Integer(i) => write!(f, "{}", i),
        }
    }
}

impl From<String> for DocumentId {
    fn from(s: String) -> Self {
        DocumentId::String(s)
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        DocumentId::String(s.to_string())
    }
}

impl From<u64> for DocumentId {
    fn from(i: u64) -> Self {
        DocumentId::Integer(i)
    }
}

impl From<Uuid> for DocumentId {
    fn from(u: Uuid) -> Self {
        DocumentId::Uuid(u)
    }
}

/// A tender or proposal as seen by the similarity engine.
///
/// The originating record owns the document; the engine only reads text and
/// attributes and fills in `vector`. Attributes are optional because the
/// storage layer may not know them for every record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub kind: DocumentKind,
    text: String,
    /// Cached vector of `text`; cleared whenever the text changes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    vector: Option<Vector>,
    #[serde(alias = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Budget or contract value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, alias = "viewCount")]
    pub view_count: u64,
}

impl Document {
    #[must_use]
    pub fn new(
        id: impl Into<DocumentId>,
        kind: DocumentKind,
        text: impl Into<String>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            text: text.into(),
            vector: None,
            updated_at,
            category: None,
            value: None,
            location: None,
            view_count: 0,
        }
    }

    #[must_use]
    pub fn tender(id: impl Into<DocumentId>, text: impl Into<String>, updated_at: DateTime<Utc>) -> Self {
        Self::new(id, DocumentKind::Tender, text, updated_at)
    }

    #[must_use]
    pub fn proposal(id: impl Into<DocumentId>, text: impl Into<String>, updated_at: DateTime<Utc>) -> Self {
        Self::new(id, DocumentKind::Proposal, text, updated_at)
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text. A previously computed vector is dropped.
    pub fn set_text(&mut self, text: impl Into<String>, updated_at: DateTime<Utc>) {
        let text = text.into();
        if text != self.text {
            self.vector = None;
        }
        self.text = text;
        self.updated_at = updated_at;
    }

    #[inline]
    pub fn vector(&self) -> Option<&Vector> {
        self.vector.as_ref()
    }

    /// Attach a vector computed elsewhere (e.g. loaded from the host's store)
    #[inline]
    #[must_use]
    pub fn with_vector(mut self, vector: Vector) -> Self {
        self.vector = Some(vector);
        self
    }

    /// Compute the vector if missing and return it
    pub fn ensure_vector(&mut self, vectorizer: &Vectorizer) -> &Vector {
        if !matches!(&self.vector, Some(v) if v.dim() == vectorizer.dim()) {
            self.vector = None;
        }
        let text = &self.text;
        self.vector.get_or_insert_with(|| vectorizer.vectorize(text))
    }

    /// The stored vector when its length matches, otherwise a fresh one
    pub fn vector_or_compute(&self, vectorizer: &Vectorizer) -> Vector {
        match &self.vector {
            Some(v) if v.dim() == vectorizer.dim() => v.clone(),
            _ => vectorizer.vectorize(&self.text),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_view_count(mut self, view_count: u64) -> Self {
        self.view_count = view_count;
        self
    }
}
