use serde::{Deserialize, Serialize};

/// Outcome of the lexical rules over one piece of text.
/// Higher score means the text looks more like fake news.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeuristicVerdict {
    pub score: u8,            // 0..=100
    pub reasons: Vec<String>, // rule order
}

impl HeuristicVerdict {
    pub fn is_clean(&self) -> bool {
        self.reasons.is_empty()
    }
}
