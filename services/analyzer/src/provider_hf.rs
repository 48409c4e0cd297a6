use anyhow::{bail, Context};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use crate::provider::{ClassifierLoader, Prediction, ProviderInfo, TextClassifier};

/// Hugging Face hosted inference for a text-classification model.
pub struct HfClassifier {
    base_url: String,
    model: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl HfClassifier {
    fn endpoint(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), self.model)
    }

    /// `timeout` overrides the client timeout for this one request.
    async fn infer(&self, body: serde_json::Value, timeout: Option<Duration>) -> anyhow::Result<serde_json::Value> {
        let mut req = self.client.post(self.endpoint()).json(&body);
        if let Some(timeout) = timeout {
            req = req.timeout(timeout);
        }
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        let resp = req.send().await?.error_for_status()?;
        Ok(resp.json().await?)
    }
}

#[async_trait]
impl TextClassifier for HfClassifier {
    async fn classify(&self, text: &str) -> anyhow::Result<Prediction> {
        let json = self.infer(serde_json::json!({ "inputs": text }), None).await?;
        parse_prediction(json)
    }

    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            name: "huggingface".to_string(),
            base_url: self.base_url.clone(),
            model: self.model.clone(),
        }
    }
}

pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub struct HfLoader {
    pub base_url: String,
    pub model: String,
    pub token: Option<String>,
    /// Per-inference timeout.
    pub timeout: Duration,
    /// Timeout for the warm-up request, which waits for the model to load.
    pub load_timeout: Duration,
}

#[async_trait]
impl ClassifierLoader for HfLoader {
    async fn load(&self) -> anyhow::Result<Arc<dyn TextClassifier>> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("failed to build classifier http client")?;

        let classifier = HfClassifier {
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            token: self.token.clone(),
            client,
        };

        // Cold models answer 503 until loaded; ask the service to wait instead.
        let body = serde_json::json!({
            "inputs": "warm up",
            "options": { "wait_for_model": true }
        });
        let warm = classifier
            .infer(body, Some(self.load_timeout))
            .await
            .with_context(|| format!("warm-up of {} failed", self.model))?;
        parse_prediction(warm).context("warm-up returned an unexpected shape")?;

        Ok(Arc::new(classifier))
    }

    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            name: "huggingface".to_string(),
            base_url: self.base_url.clone(),
            model: self.model.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Batched(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

/// Accepts `[{label, score}, ..]` and `[[{label, score}, ..]]`; keeps the best label.
pub fn parse_prediction(json: serde_json::Value) -> anyhow::Result<Prediction> {
    let resp: InferenceResponse =
        serde_json::from_value(json).context("malformed classifier response")?;

    let labels = match resp {
        InferenceResponse::Batched(batches) => batches.into_iter().flatten().collect::<Vec<_>>(),
        InferenceResponse::Flat(labels) => labels,
    };

    let Some(best) = labels.into_iter().max_by(|a, b| a.score.total_cmp(&b.score)) else {
        bail!("classifier returned no labels");
    };

    Ok(Prediction {
        label: best.label,
        score: best.score,
    })
}
