#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use analyzer::aggregate::Aggregator;
use analyzer::provider::{ClassifierLoader, Prediction, ProviderInfo, TextClassifier};
use analyzer::runtime::ClassifierRuntime;
use lookups::{EncyclopediaHit, FactCheckClaim, LookupError, LookupProvider, NewsArticle};

pub fn info() -> ProviderInfo {
    ProviderInfo {
        name: "mock".into(),
        base_url: "http://mock".into(),
        model: "mock-model".into(),
    }
}

/// Classifier returning a fixed prediction or a fixed error, optionally after a delay.
pub struct MockClassifier {
    pub answer: Result<Prediction, String>,
    pub delay: Duration,
    pub calls: AtomicUsize,
}

#[async_trait]
impl TextClassifier for MockClassifier {
    async fn classify(&self, _text: &str) -> anyhow::Result<Prediction> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.answer.clone().map_err(|e| anyhow::anyhow!(e))
    }

    fn info(&self) -> ProviderInfo {
        info()
    }
}

/// Loader that counts loads and can be slowed down or made to fail.
pub struct MockLoader {
    pub loads: AtomicUsize,
    pub delay: Duration,
    /// Extra delay applied to the first load only.
    pub first_delay: Duration,
    pub fail: bool,
    pub classifier: Arc<MockClassifier>,
}

impl MockLoader {
    pub fn answering(label: &str, score: f64) -> Self {
        Self {
            loads: AtomicUsize::new(0),
            delay: Duration::ZERO,
            first_delay: Duration::ZERO,
            fail: false,
            classifier: Arc::new(MockClassifier {
                answer: Ok(Prediction { label: label.into(), score }),
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
            }),
        }
    }

    pub fn erroring(msg: &str) -> Self {
        let mut l = Self::answering("LABEL_0", 0.0);
        l.classifier = Arc::new(MockClassifier {
            answer: Err(msg.into()),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        });
        l
    }
}

#[async_trait]
impl ClassifierLoader for MockLoader {
    async fn load(&self) -> anyhow::Result<Arc<dyn TextClassifier>> {
        let previous = self.loads.fetch_add(1, Ordering::SeqCst);
        if previous == 0 && !self.first_delay.is_zero() {
            tokio::time::sleep(self.first_delay).await;
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail {
            anyhow::bail!("model download refused");
        }
        Ok(self.classifier.clone())
    }

    fn info(&self) -> ProviderInfo {
        info()
    }
}

/// Lookup provider with a call counter.
pub struct CountingLookup<R> {
    pub configured: bool,
    pub answer: Result<Vec<R>, u16>,
    pub calls: AtomicUsize,
}

impl<R> CountingLookup<R> {
    pub fn returning(records: Vec<R>) -> Arc<Self> {
        Arc::new(Self {
            configured: true,
            answer: Ok(records),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(status: u16) -> Arc<Self> {
        Arc::new(Self {
            configured: true,
            answer: Err(status),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn unconfigured() -> Arc<Self> {
        Arc::new(Self {
            configured: false,
            answer: Ok(vec![]),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<R: Clone + Send + Sync + 'static> LookupProvider for CountingLookup<R> {
    type Record = R;

    fn name(&self) -> &'static str {
        "counting"
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn search(&self, _query: &str) -> lookups::Result<Vec<R>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.answer {
            Ok(records) => Ok(records.clone()),
            Err(status) => Err(LookupError::Api {
                status: *status,
                message: "mock failure".into(),
            }),
        }
    }
}

pub struct Fixture {
    pub loader: Arc<MockLoader>,
    pub runtime: Arc<ClassifierRuntime>,
    pub fact_check: Arc<CountingLookup<FactCheckClaim>>,
    pub news: Arc<CountingLookup<NewsArticle>>,
    pub encyclopedia: Arc<CountingLookup<EncyclopediaHit>>,
}

impl Fixture {
    pub fn new(
        loader: MockLoader,
        fact_check: Arc<CountingLookup<FactCheckClaim>>,
        news: Arc<CountingLookup<NewsArticle>>,
        encyclopedia: Arc<CountingLookup<EncyclopediaHit>>,
    ) -> Self {
        let loader = Arc::new(loader);
        let runtime = Arc::new(ClassifierRuntime::new(
            loader.clone(),
            Duration::from_secs(2),
            Duration::from_secs(2),
        ));
        Self {
            loader,
            runtime,
            fact_check,
            news,
            encyclopedia,
        }
    }

    pub fn aggregator(&self) -> Aggregator {
        Aggregator::new(
            self.runtime.clone(),
            self.fact_check.clone(),
            self.news.clone(),
            self.encyclopedia.clone(),
        )
    }

    pub fn external_calls(&self) -> usize {
        self.loader.loads.load(Ordering::SeqCst)
            + self.loader.classifier.calls.load(Ordering::SeqCst)
            + self.fact_check.calls()
            + self.news.calls()
            + self.encyclopedia.calls()
    }
}

pub fn hit(title: &str) -> EncyclopediaHit {
    EncyclopediaHit {
        title: title.into(),
        snippet: format!("{title} snippet"),
        url: "https://en.wikipedia.org/?curid=1".into(),
    }
}
