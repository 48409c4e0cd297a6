use serde::{Deserialize, Serialize};

use crate::provider::Prediction;

/// Model label tokens. The model emits LABEL_0 for fake, LABEL_1 for real.
pub const FAKE_TOKEN: &str = "LABEL_0";
pub const REAL_TOKEN: &str = "LABEL_1";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "token", rename_all = "snake_case")]
pub enum VerdictLabel {
    Fake,
    Real,
    /// Token outside the known label set, kept verbatim.
    Unknown(String),
    Error,
}

impl VerdictLabel {
    pub fn from_token(token: &str) -> Self {
        match token {
            FAKE_TOKEN => VerdictLabel::Fake,
            REAL_TOKEN => VerdictLabel::Real,
            other => VerdictLabel::Unknown(other.to_string()),
        }
    }

    pub fn display(&self) -> &str {
        match self {
            VerdictLabel::Fake => "Fake News",
            VerdictLabel::Real => "Real News",
            VerdictLabel::Unknown(token) => token,
            VerdictLabel::Error => "Error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassifierVerdict {
    pub label: VerdictLabel,
    pub display_label: String,
    pub confidence_pct: f64, // 0.0..=100.0
    pub explanation: String,
}

impl ClassifierVerdict {
    pub fn from_prediction(p: &Prediction) -> Self {
        let label = VerdictLabel::from_token(&p.label);
        let confidence_pct = (p.score * 100.0).clamp(0.0, 100.0);

        let explanation = match &label {
            VerdictLabel::Fake => format!(
                "The AI model estimates this text is likely fake news (confidence: {confidence_pct:.1}%)."
            ),
            VerdictLabel::Real => format!(
                "The AI model estimates this text is likely reliable (confidence: {confidence_pct:.1}%)."
            ),
            other => format!("Label: {} (confidence: {confidence_pct:.1}%)", other.display()),
        };

        Self {
            display_label: label.display().to_string(),
            label,
            confidence_pct,
            explanation,
        }
    }

    /// Sentinel returned in place of any classifier failure.
    pub fn error(detail: impl std::fmt::Display) -> Self {
        Self {
            label: VerdictLabel::Error,
            display_label: VerdictLabel::Error.display().to_string(),
            confidence_pct: 0.0,
            explanation: format!("Error during analysis: {detail}"),
        }
    }

    pub fn is_error(&self) -> bool {
        self.label == VerdictLabel::Error
    }
}
