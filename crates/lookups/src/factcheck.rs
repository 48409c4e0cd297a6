use async_trait::async_trait;
use serde::Deserialize;

use crate::provider::{read_json, LookupProvider, RESULT_CAP};
use crate::{ClaimReview, FactCheckClaim};

const BASE_URL: &str = "https://factchecktools.googleapis.com/v1alpha1/claims:search";

/// Google Fact Check Tools claim search.
pub struct FactCheckClient {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl FactCheckClient {
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
impl LookupProvider for FactCheckClient {
    type Record = FactCheckClaim;

    fn name(&self) -> &'static str {
        "factcheck"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn search(&self, query: &str) -> crate::Result<Vec<FactCheckClaim>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(crate::LookupError::MissingCredential(self.name()))?;
        let page_size = RESULT_CAP.to_string();
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[
                ("query", query),
                ("key", api_key),
                ("languageCode", "en"),
                ("pageSize", page_size.as_str()),
            ])
            .send()
            .await?;

        let body: ClaimSearchResponse = read_json(resp).await?;
        Ok(body.claims.into_iter().map(FactCheckClaim::from).collect())
    }
}

// --- Wire format ---

#[derive(Debug, Deserialize)]
pub(crate) struct ClaimSearchResponse {
    #[serde(default)]
    pub claims: Vec<WireClaim>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireClaim {
    pub text: Option<String>,
    #[serde(rename = "claimReview", default)]
    pub claim_review: Vec<WireReview>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireReview {
    pub publisher: Option<WirePublisher>,
    pub url: Option<String>,
    #[serde(rename = "textualRating")]
    pub textual_rating: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WirePublisher {
    pub name: Option<String>,
}

impl From<WireClaim> for FactCheckClaim {
    fn from(c: WireClaim) -> Self {
        FactCheckClaim {
            claim_text: c.text,
            reviews: c
                .claim_review
                .into_iter()
                .map(|r| ClaimReview {
                    publisher_name: r.publisher.and_then(|p| p.name),
                    url: r.url,
                    rating: r.textual_rating,
                })
                .collect(),
        }
    }
}
