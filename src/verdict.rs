use serde::{Deserialize, Serialize};

/// Final classification label for one analysis request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    Safe,
    Phishing,
}

/// Terminal artifact returned to the caller: label, blended confidence and
/// the ordered list of human-readable reasons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub label: Label,
    pub confidence: f64,
    pub reasons: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("cannot analyze empty input")]
    InvalidInput,
    #[error("model artifact inconsistent: {0}")]
    ModelShape(String),
}
