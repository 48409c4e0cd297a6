use anyhow::anyhow;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{OnceCell, RwLock};
use tracing::{info, warn};

use crate::provider::{ClassifierLoader, Prediction, ProviderInfo, TextClassifier};
use crate::verdict::ClassifierVerdict;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "phase")]
pub enum RuntimeStatus {
    Empty,
    Loading { attempt: u64, started_at: DateTime<Utc> },
    Ready { loaded_at: DateTime<Utc> },
    Failed { error: String, failed_at: DateTime<Utc> },
}

/// Process-wide classifier handle. The loader runs at most once successfully;
/// concurrent first callers wait on the same load.
pub struct ClassifierRuntime {
    loader: Arc<dyn ClassifierLoader>,
    classifier: OnceCell<Arc<dyn TextClassifier>>,
    status: RwLock<RuntimeStatus>,
    attempts: AtomicU64,
    load_timeout: Duration,
    call_timeout: Duration,
}

impl ClassifierRuntime {
    pub fn new(loader: Arc<dyn ClassifierLoader>, load_timeout: Duration, call_timeout: Duration) -> Self {
        Self {
            loader,
            classifier: OnceCell::new(),
            status: RwLock::new(RuntimeStatus::Empty),
            attempts: AtomicU64::new(0),
            load_timeout,
            call_timeout,
        }
    }

    pub fn info(&self) -> ProviderInfo {
        self.loader.info()
    }

    pub async fn status(&self) -> RuntimeStatus {
        self.status.read().await.clone()
    }

    /// Loaded classifier, loading it on first use.
    pub async fn classifier(&self) -> anyhow::Result<Arc<dyn TextClassifier>> {
        if let Some(c) = self.classifier.get() {
            return Ok(c.clone());
        }

        // Set only if this caller ends up running the load itself.
        let mut owned: Option<u64> = None;
        let init = self.classifier.get_or_try_init(|| {
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
            owned = Some(attempt);
            self.load(attempt)
        });

        let res = tokio::time::timeout(self.load_timeout, init).await;
        match res {
            Ok(res) => res.cloned(),
            Err(_) => {
                let error = format!("classifier load timed out after {:?}", self.load_timeout);
                if let Some(attempt) = owned {
                    self.fail_attempt(attempt, &error).await;
                }
                Err(anyhow!(error))
            }
        }
    }

    async fn load(&self, attempt: u64) -> anyhow::Result<Arc<dyn TextClassifier>> {
        let info = self.loader.info();
        info!(model = %info.model, attempt, "classifier: loading");
        self.set_status(RuntimeStatus::Loading {
            attempt,
            started_at: Utc::now(),
        })
        .await;

        match self.loader.load().await {
            Ok(c) => {
                info!(model = %info.model, "classifier: ready");
                self.set_status(RuntimeStatus::Ready { loaded_at: Utc::now() }).await;
                Ok(c)
            }
            Err(e) => {
                warn!(model = %info.model, error = %format!("{e:#}"), "classifier: load failed");
                self.set_status(RuntimeStatus::Failed {
                    error: format!("provider load failed: {e:#}"),
                    failed_at: Utc::now(),
                })
                .await;
                Err(e)
            }
        }
    }

    async fn set_status(&self, status: RuntimeStatus) {
        *self.status.write().await = status;
    }

    /// Mark a cancelled load as failed, unless a later load has moved the status on.
    async fn fail_attempt(&self, attempt: u64, error: &str) {
        let mut status = self.status.write().await;
        if matches!(*status, RuntimeStatus::Loading { attempt: current, .. } if current == attempt) {
            *status = RuntimeStatus::Failed {
                error: error.to_string(),
                failed_at: Utc::now(),
            };
        }
    }

    async fn predict(&self, text: &str) -> anyhow::Result<Prediction> {
        let classifier = self.classifier().await?;
        tokio::time::timeout(self.call_timeout, classifier.classify(text))
            .await
            .map_err(|_| anyhow!("classifier call timed out after {:?}", self.call_timeout))?
    }

    /// Never fails: any error becomes the sentinel verdict.
    pub async fn classify(&self, text: &str) -> ClassifierVerdict {
        match self.predict(text).await {
            Ok(p) => ClassifierVerdict::from_prediction(&p),
            Err(e) => {
                warn!(error = %format!("{e:#}"), "classifier: falling back to error verdict");
                ClassifierVerdict::error(format!("{e:#}"))
            }
        }
    }
}
