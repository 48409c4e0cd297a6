use anyhow::{bail, Context, Result};
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "hamzab/roberta-fake-news-classification";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: String,

    pub classifier_url: String,
    pub classifier_model: String,
    pub hf_api_token: Option<String>,

    pub factcheck_api_key: Option<String>,
    pub newsapi_key: Option<String>,

    pub http_timeout: Duration,
    pub classifier_load_timeout: Duration,
    pub max_input_chars: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let bind_addr = std::env::var("ANALYZER_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let classifier_url = std::env::var("CLASSIFIER_URL")
            .unwrap_or_else(|_| "https://api-inference.huggingface.co/models".to_string());
        let classifier_model = std::env::var("CLASSIFIER_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let hf_api_token = optional("HF_API_TOKEN");

        // Lookups without a key are disabled, never fatal.
        let factcheck_api_key = optional("GOOGLE_FACTCHECK_API_KEY");
        let newsapi_key = optional("NEWSAPI_KEY");

        let http_timeout = Duration::from_secs(parse_or("HTTP_TIMEOUT_SECS", 10)?);
        let classifier_load_timeout = Duration::from_secs(parse_or("CLASSIFIER_LOAD_TIMEOUT_SECS", 60)?);
        let max_input_chars = parse_or("MAX_INPUT_CHARS", 500)? as usize;

        if !classifier_url.starts_with("http://") && !classifier_url.starts_with("https://") {
            bail!("CLASSIFIER_URL must start with http:// or https://");
        }
        if http_timeout.is_zero() {
            bail!("HTTP_TIMEOUT_SECS must be greater than zero");
        }

        Ok(Self {
            bind_addr,
            classifier_url,
            classifier_model,
            hf_api_token,
            factcheck_api_key,
            newsapi_key,
            http_timeout,
            classifier_load_timeout,
            max_input_chars,
        })
    }
}

/// Unset and blank both mean "not configured".
fn optional(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_or(key: &str, default: u64) -> Result<u64> {
    match std::env::var(key) {
        Ok(v) => v
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a non-negative integer, got {v:?}")),
        Err(_) => Ok(default),
    }
}
