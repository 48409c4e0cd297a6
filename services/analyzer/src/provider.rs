use async_trait::async_trait;
use std::sync::Arc;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ProviderInfo {
    pub name: String,
    pub base_url: String,
    pub model: String,
}

/// Top label returned by the classification service.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub score: f64, // probability, 0.0..1.0
}

#[async_trait]
pub trait TextClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> anyhow::Result<Prediction>;
    fn info(&self) -> ProviderInfo;
}

/// Builds a ready classifier. Loading may be slow, so the runtime calls it once.
#[async_trait]
pub trait ClassifierLoader: Send + Sync {
    async fn load(&self) -> anyhow::Result<Arc<dyn TextClassifier>>;
    fn info(&self) -> ProviderInfo;
}
