use serde::Serialize;
use std::sync::Arc;
use tracing::{info, Instrument};
use uuid::Uuid;

use heuristics::HeuristicVerdict;
use lookups::{lookup, EncyclopediaHit, FactCheckClaim, LookupOutcome, LookupProvider, NewsArticle};

use crate::runtime::ClassifierRuntime;
use crate::verdict::ClassifierVerdict;

pub const SUBJECT_MAX_CHARS: usize = 50;
pub const EMPTY_INPUT_MESSAGE: &str = "Please enter text to analyze.";

pub type FactCheckProvider = Arc<dyn LookupProvider<Record = FactCheckClaim>>;
pub type NewsProvider = Arc<dyn LookupProvider<Record = NewsArticle>>;
pub type EncyclopediaProvider = Arc<dyn LookupProvider<Record = EncyclopediaHit>>;

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Analysis {
    EmptyInput { message: String },
    Completed(AggregatedResult),
}

#[derive(Clone, Debug, Serialize)]
pub struct AggregatedResult {
    pub analysis_id: Uuid,
    /// Input shortened for headings.
    pub subject: String,
    pub classifier: ClassifierVerdict,
    pub heuristic: HeuristicVerdict,
    pub fact_checks: LookupOutcome<FactCheckClaim>,
    pub news: LookupOutcome<NewsArticle>,
    pub encyclopedia: LookupOutcome<EncyclopediaHit>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ConfiguredLookups {
    pub fact_check: bool,
    pub news: bool,
    pub encyclopedia: bool,
}

pub struct Aggregator {
    runtime: Arc<ClassifierRuntime>,
    fact_check: FactCheckProvider,
    news: NewsProvider,
    encyclopedia: EncyclopediaProvider,
}

impl Aggregator {
    pub fn new(
        runtime: Arc<ClassifierRuntime>,
        fact_check: FactCheckProvider,
        news: NewsProvider,
        encyclopedia: EncyclopediaProvider,
    ) -> Self {
        Self {
            runtime,
            fact_check,
            news,
            encyclopedia,
        }
    }

    pub fn configured(&self) -> ConfiguredLookups {
        ConfiguredLookups {
            fact_check: self.fact_check.is_configured(),
            news: self.news.is_configured(),
            encyclopedia: self.encyclopedia.is_configured(),
        }
    }

    pub async fn analyze(&self, text: &str) -> Analysis {
        let text = text.trim();
        if text.is_empty() {
            return Analysis::EmptyInput {
                message: EMPTY_INPUT_MESSAGE.to_string(),
            };
        }

        let analysis_id = Uuid::new_v4();
        let span = tracing::info_span!("analyze", %analysis_id, chars = text.chars().count());

        async move {
            let heuristic = heuristics::score(text);

            let (classifier, fact_checks, news, encyclopedia) = tokio::join!(
                self.runtime.classify(text),
                lookup(&*self.fact_check, text),
                lookup(&*self.news, text),
                lookup(&*self.encyclopedia, text),
            );

            info!(
                label = classifier.display_label.as_str(),
                heuristic = heuristic.score,
                fact_checks = fact_checks.records().len(),
                news = news.records().len(),
                encyclopedia = encyclopedia.records().len(),
                "analysis complete"
            );

            Analysis::Completed(AggregatedResult {
                analysis_id,
                subject: subject(text),
                classifier,
                heuristic,
                fact_checks,
                news,
                encyclopedia,
            })
        }
        .instrument(span)
        .await
    }
}

/// First 50 characters, with "..." appended when the text was longer.
pub fn subject(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(SUBJECT_MAX_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
