//! Hybrid decision engine
//!
//! Runs the statistical classifier and the rule battery over one input and
//! merges both signals into a single verdict with ordered reasons.

use crate::machine_learning::{LogisticClassifier, TfidfVectorizer};
use crate::model::ModelArtifact;
use crate::rules::{AnalysisInput, RuleEvaluator, RuleFinding, RulesConfig};
use crate::verdict::{EngineError, Label, Verdict};

/// Triggered rule weights saturate at this sum; beyond it the rule signal is
/// treated as fully confident. Sized so that a missing-HTTPS scheme plus one
/// denylist keyword plus an IP-literal host reach saturation on their own.
pub const RULE_RISK_SATURATION: f64 = 50.0;
/// Share of the final confidence contributed by the classifier; the rule
/// signal gets the remainder.
pub const CLASSIFIER_BLEND: f64 = 0.5;
/// Confidence at or above this is labeled Phishing. The tie resolves toward
/// Phishing.
pub const PHISHING_THRESHOLD: f64 = 0.5;
/// Classifier scores above this add a generic statistical-model reason in
/// front of the rule reasons.
pub const CLASSIFIER_REASON_THRESHOLD: f64 = 0.6;

pub struct AnalysisEngine {
    vectorizer: TfidfVectorizer,
    classifier: LogisticClassifier,
    rules: RuleEvaluator,
}

impl std::fmt::Debug for AnalysisEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisEngine").finish_non_exhaustive()
    }
}

impl AnalysisEngine {
    /// Construct the engine from a loaded model artifact and rule set. An
    /// internally inconsistent artifact is a packaging error and refuses to
    /// initialize.
    pub fn new(model: &ModelArtifact, rules: &RulesConfig) -> Result<Self, EngineError> {
        model.validate()?;
        let engine = Self {
            vectorizer: TfidfVectorizer::new(model),
            classifier: LogisticClassifier::new(model),
            rules: RuleEvaluator::new(rules),
        };
        log::info!(
            "Analysis engine initialized: model {} ({} vocabulary terms), {} rules",
            model.version,
            engine.vectorizer.vocabulary_len(),
            engine.rules.rule_count()
        );
        Ok(engine)
    }

    /// Classify one piece of text. Pure apart from reading the immutable
    /// loaded parameters; repeated calls on the same input produce identical
    /// verdicts.
    pub fn analyze(&self, text: &str) -> Result<Verdict, EngineError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(EngineError::InvalidInput);
        }

        let features = self.vectorizer.extract(trimmed)?;
        let score = self.classifier.score(&features)?;

        let input = AnalysisInput::parse(trimmed);
        let findings = self.rules.evaluate(&input);
        log::debug!(
            "classifier score {:.3}, {} of {} rules triggered",
            score,
            findings.iter().filter(|f| f.triggered).count(),
            findings.len()
        );

        Ok(combine(score, &findings))
    }
}

/// Merge the classifier probability with the rule findings. Deterministic:
/// fixed constants, reasons in rule-evaluation order.
pub fn combine(score: f64, findings: &[RuleFinding]) -> Verdict {
    let rule_risk: f64 = findings
        .iter()
        .filter(|f| f.triggered)
        .map(|f| f.weight)
        .sum();
    let rule_signal = (rule_risk / RULE_RISK_SATURATION).min(1.0);

    let confidence = CLASSIFIER_BLEND * score + (1.0 - CLASSIFIER_BLEND) * rule_signal;
    let label = if confidence >= PHISHING_THRESHOLD {
        Label::Phishing
    } else {
        Label::Safe
    };

    let mut reasons = Vec::new();
    if score > CLASSIFIER_REASON_THRESHOLD {
        reasons.push(format!(
            "Statistical model flagged this content (score {score:.2})"
        ));
    }
    for finding in findings.iter().filter(|f| f.triggered) {
        reasons.push(finding.reason.clone());
    }

    Verdict {
        label,
        confidence,
        reasons,
    }
}
