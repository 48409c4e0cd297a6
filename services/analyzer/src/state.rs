use anyhow::{Context, Result};
use std::sync::Arc;

use lookups::{EncyclopediaClient, FactCheckClient, NewsClient};

use crate::aggregate::Aggregator;
use crate::config::AppConfig;
use crate::provider::ClassifierLoader;
use crate::provider_hf::HfLoader;
use crate::runtime::ClassifierRuntime;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub aggregator: Arc<Aggregator>,
    pub runtime: Arc<ClassifierRuntime>,
    pub max_input_chars: usize,
}

impl AppState {
    pub fn new(aggregator: Arc<Aggregator>, runtime: Arc<ClassifierRuntime>, max_input_chars: usize) -> Self {
        Self {
            aggregator,
            runtime,
            max_input_chars,
        }
    }

    /// Wire the Hugging Face classifier and the three lookup clients from config.
    pub fn from_config(cfg: &AppConfig) -> Result<Self> {
        let http = lookups::http_client(cfg.http_timeout).context("Failed to build http client")?;

        let loader: Arc<dyn ClassifierLoader> = Arc::new(HfLoader {
            base_url: cfg.classifier_url.clone(),
            model: cfg.classifier_model.clone(),
            token: cfg.hf_api_token.clone(),
            timeout: cfg.http_timeout,
            load_timeout: cfg.classifier_load_timeout,
        });
        let runtime = Arc::new(ClassifierRuntime::new(
            loader,
            cfg.classifier_load_timeout,
            cfg.http_timeout,
        ));

        let aggregator = Aggregator::new(
            runtime.clone(),
            Arc::new(FactCheckClient::new(http.clone(), cfg.factcheck_api_key.clone())),
            Arc::new(NewsClient::new(http.clone(), cfg.newsapi_key.clone())),
            Arc::new(EncyclopediaClient::new(http)),
        );

        Ok(Self::new(Arc::new(aggregator), runtime, cfg.max_input_chars))
    }
}
