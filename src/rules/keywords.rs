use super::{AnalysisInput, KeywordConfig, RuleFinding, TextRule};

/// Denylist keyword scan over the whole lowercased input. Weight accumulates
/// per matched term up to a cap so a keyword-stuffed lure cannot dominate
/// every other signal.
pub struct KeywordRule {
    config: KeywordConfig,
}

impl KeywordRule {
    pub fn new(config: KeywordConfig) -> Self {
        Self { config }
    }
}

impl TextRule for KeywordRule {
    fn name(&self) -> &str {
        "suspicious_keywords"
    }

    fn evaluate(&self, input: &AnalysisInput) -> RuleFinding {
        let matched: Vec<&str> = self
            .config
            .denylist
            .iter()
            .filter(|keyword| input.lowered.contains(keyword.as_str()))
            .map(|keyword| keyword.as_str())
            .collect();

        if matched.is_empty() {
            return RuleFinding::clear(self.name());
        }

        let weight = (self.config.per_match_weight * matched.len() as f64)
            .min(self.config.max_weight);
        RuleFinding::new(
            self.name(),
            weight,
            format!("Suspicious keywords detected: {}", matched.join(", ")),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule() -> KeywordRule {
        KeywordRule::new(KeywordConfig::default())
    }

    #[test]
    fn test_denylist_terms_trigger() {
        let finding = rule().evaluate(&AnalysisInput::parse("Please verify your account today"));
        assert!(finding.triggered);
        assert!(finding.reason.contains("verify"));
        assert!(finding.reason.contains("account"));
        assert_eq!(finding.weight, 20.0);
    }

    #[test]
    fn test_weight_is_capped() {
        let finding = rule().evaluate(&AnalysisInput::parse(
            "urgent: verify your login password, account suspended, confirm refund",
        ));
        assert!(finding.triggered);
        assert_eq!(finding.weight, KeywordConfig::default().max_weight);
    }

    #[test]
    fn test_benign_text_is_clear() {
        let finding = rule().evaluate(&AnalysisInput::parse("the weather is lovely today"));
        assert!(!finding.triggered);
        assert_eq!(finding.weight, 0.0);
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let finding = rule().evaluate(&AnalysisInput::parse("URGENT LOGIN-UPDATE required"));
        assert!(finding.triggered);
    }
}
