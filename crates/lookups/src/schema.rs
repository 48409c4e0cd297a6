use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// --- Normalized records, one per provider ---

/// A claim found in the fact-check database with its published reviews.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FactCheckClaim {
    pub claim_text: Option<String>,
    pub reviews: Vec<ClaimReview>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClaimReview {
    pub publisher_name: Option<String>,
    pub url: Option<String>,
    pub rating: Option<String>, // textual, e.g. "False", "Pants on Fire"
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: Option<String>,
    pub url: Option<String>,
    pub source_name: Option<String>,
    /// Raw `publishedAt` as sent by the provider.
    pub published_at: Option<String>,
    /// `published_at` when it parses as RFC 3339.
    pub published: Option<DateTime<Utc>>,
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncyclopediaHit {
    pub title: String,
    /// Plain text, highlight markup removed.
    pub snippet: String,
    /// Empty when the provider omitted the page id.
    pub url: String,
}
