use std::fmt::Write;

use lookups::{EncyclopediaHit, FactCheckClaim, LookupOutcome, NewsArticle};

use crate::aggregate::{AggregatedResult, Analysis};

const NA: &str = "N/A";

/// Markdown rendering of an analysis, section by section.
pub fn render(analysis: &Analysis) -> String {
    match analysis {
        Analysis::EmptyInput { message } => format!("{message}\n"),
        Analysis::Completed(result) => render_result(result),
    }
}

fn render_result(r: &AggregatedResult) -> String {
    let mut out = String::new();

    // writeln! into a String cannot fail
    let _ = writeln!(out, "## AI Analysis (RoBERTa)\n");
    let _ = writeln!(
        out,
        "**AI Result:** {} (Confidence: {:.1}%)\n",
        r.classifier.display_label, r.classifier.confidence_pct
    );
    let _ = writeln!(out, "{}\n", r.classifier.explanation);

    let _ = writeln!(out, "## Heuristic Score\n");
    let _ = writeln!(out, "**Score:** {}/100 (higher means more likely fake)\n", r.heuristic.score);
    if r.heuristic.reasons.is_empty() {
        let _ = writeln!(out, "No warning signs detected.\n");
    } else {
        for reason in &r.heuristic.reasons {
            let _ = writeln!(out, "- {reason}");
        }
        out.push('\n');
    }

    let _ = writeln!(out, "## Google Fact Check Results\n");
    section(
        &mut out,
        &r.fact_checks,
        "No fact check results found for this text.",
        "Google Fact Check API key not configured. Please add it to access this feature.",
        fact_check_item,
    );

    let _ = writeln!(out, "## Related News Articles (NewsAPI)\n");
    section(
        &mut out,
        &r.news,
        "No related news articles found.",
        "NewsAPI key not configured. Please add it to access this feature.",
        news_item,
    );

    let _ = writeln!(out, "## Wikipedia Search - More info about: {}\n", r.subject);
    section(
        &mut out,
        &r.encyclopedia,
        "No Wikipedia results found for this text.",
        "Wikipedia search is not available.",
        encyclopedia_item,
    );

    out
}

fn section<T>(
    out: &mut String,
    outcome: &LookupOutcome<T>,
    empty: &str,
    not_configured: &str,
    item: fn(&mut String, &T),
) {
    match outcome {
        LookupOutcome::Found { records } => {
            for r in records {
                item(out, r);
            }
            out.push('\n');
        }
        LookupOutcome::NoResults => {
            let _ = writeln!(out, "{empty}\n");
        }
        LookupOutcome::NotConfigured => {
            let _ = writeln!(out, "{not_configured}\n");
        }
        LookupOutcome::Failed { reason } => {
            let _ = writeln!(out, "Lookup failed, results unavailable ({reason}).\n");
        }
    }
}

fn fact_check_item(out: &mut String, c: &FactCheckClaim) {
    let _ = writeln!(out, "- **Claim:** {}", c.claim_text.as_deref().unwrap_or(NA));
    for review in &c.reviews {
        let _ = writeln!(
            out,
            "    - Source: [{}]({})",
            review.publisher_name.as_deref().unwrap_or(NA),
            review.url.as_deref().unwrap_or("")
        );
        let _ = writeln!(out, "    - Rating: {}", review.rating.as_deref().unwrap_or(NA));
    }
}

fn news_item(out: &mut String, a: &NewsArticle) {
    let published = match (&a.published, &a.published_at) {
        (Some(at), _) => at.format("%Y-%m-%d %H:%M UTC").to_string(),
        (None, Some(raw)) => raw.clone(),
        (None, None) => NA.to_string(),
    };

    let _ = writeln!(
        out,
        "- [{}]({})",
        a.title.as_deref().unwrap_or(NA),
        a.url.as_deref().unwrap_or("")
    );
    let _ = writeln!(out, "    - Source: {}", a.source_name.as_deref().unwrap_or(NA));
    let _ = writeln!(out, "    - Published: {published}");
    let _ = writeln!(out, "    - Description: {}", a.description.as_deref().unwrap_or(NA));
}

fn encyclopedia_item(out: &mut String, h: &EncyclopediaHit) {
    let _ = writeln!(out, "- [{}]({})", h.title, h.url);
    let _ = writeln!(out, "    - {} ...", h.snippet);
}
