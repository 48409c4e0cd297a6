use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::provider::{read_json, LookupProvider, RESULT_CAP};
use crate::NewsArticle;

const BASE_URL: &str = "https://newsapi.org/v2/everything";

/// NewsAPI `everything` search, English only, sorted by relevancy.
pub struct NewsClient {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl NewsClient {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl LookupProvider for NewsClient {
    type Record = NewsArticle;

    fn name(&self) -> &'static str {
        "news"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn search(&self, query: &str) -> crate::Result<Vec<NewsArticle>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(crate::LookupError::MissingCredential(self.name()))?;
        let page_size = RESULT_CAP.to_string();
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", query),
                ("apiKey", api_key),
                ("language", "en"),
                ("sortBy", "relevancy"),
                ("pageSize", page_size.as_str()),
            ])
            .send()
            .await?;

        let body: EverythingResponse = read_json(resp).await?;
        Ok(body.articles.into_iter().map(NewsArticle::from).collect())
    }
}

// --- Wire format ---

#[derive(Debug, Deserialize)]
pub(crate) struct EverythingResponse {
    #[serde(default)]
    pub articles: Vec<WireArticle>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireArticle {
    pub title: Option<String>,
    pub url: Option<String>,
    pub source: Option<WireSource>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireSource {
    pub name: Option<String>,
}

impl From<WireArticle> for NewsArticle {
    fn from(a: WireArticle) -> Self {
        let published = a
            .published_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|d| d.with_timezone(&Utc));

        NewsArticle {
            title: a.title,
            url: a.url,
            source_name: a.source.and_then(|s| s.name),
            published_at: a.published_at,
            published,
            description: a.description,
        }
    }
}
