use async_trait::async_trait;
use serde::Deserialize;

use crate::provider::{read_json, LookupProvider, RESULT_CAP};
use crate::EncyclopediaHit;

const BASE_URL: &str = "https://en.wikipedia.org/w/api.php";
const PAGE_URL: &str = "https://en.wikipedia.org/?curid=";

const HIGHLIGHT_OPEN: &str = r#"<span class="searchmatch">"#;
const HIGHLIGHT_CLOSE: &str = "</span>";

/// English Wikipedia full-text search. Needs no credential.
pub struct EncyclopediaClient {
    client: reqwest::Client,
    base_url: String,
}

impl EncyclopediaClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl LookupProvider for EncyclopediaClient {
    type Record = EncyclopediaHit;

    fn name(&self) -> &'static str {
        "encyclopedia"
    }

    async fn search(&self, query: &str) -> crate::Result<Vec<EncyclopediaHit>> {
        let limit = RESULT_CAP.to_string();
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", query),
                ("format", "json"),
                ("srlimit", limit.as_str()),
            ])
            .send()
            .await?;

        let body: QueryResponse = read_json(resp).await?;
        let hits = body
            .query
            .map(|q| q.search)
            .unwrap_or_default()
            .into_iter()
            .map(EncyclopediaHit::from)
            .collect();
        Ok(hits)
    }
}

/// Remove the search-match highlighting the API wraps around matched terms.
pub fn strip_highlight(snippet: &str) -> String {
    snippet.replace(HIGHLIGHT_OPEN, "").replace(HIGHLIGHT_CLOSE, "")
}

// --- Wire format ---

#[derive(Debug, Deserialize)]
pub(crate) struct QueryResponse {
    pub query: Option<QueryBody>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QueryBody {
    #[serde(default)]
    pub search: Vec<WireHit>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireHit {
    pub title: Option<String>,
    pub snippet: Option<String>,
    pub pageid: Option<u64>,
}

impl From<WireHit> for EncyclopediaHit {
    fn from(h: WireHit) -> Self {
        EncyclopediaHit {
            title: h.title.unwrap_or_else(|| "N/A".to_string()),
            snippet: strip_highlight(h.snippet.as_deref().unwrap_or("")),
            url: h.pageid.map(|id| format!("{PAGE_URL}{id}")).unwrap_or_default(),
        }
    }
}
