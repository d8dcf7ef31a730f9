use super::{AnalysisInput, ProtocolConfig, RuleFinding, TextRule};

/// Flags URL-like input that is not served over HTTPS. Plain message text
/// with no URL is out of scope for this rule.
pub struct ProtocolRule {
    config: ProtocolConfig,
}

impl ProtocolRule {
    pub fn new(config: ProtocolConfig) -> Self {
        Self { config }
    }
}

impl TextRule for ProtocolRule {
    fn name(&self) -> &str {
        "protocol"
    }

    fn evaluate(&self, input: &AnalysisInput) -> RuleFinding {
        if input.url_candidate.is_none() {
            return RuleFinding::clear(self.name());
        }
        match input.scheme.as_deref() {
            Some("https") => RuleFinding::clear(self.name()),
            Some(scheme) => RuleFinding::new(
                self.name(),
                self.config.weight,
                format!("Connection scheme '{scheme}' is not HTTPS"),
            ),
            None => RuleFinding::new(
                self.name(),
                self.config.weight,
                "No HTTPS scheme on URL".to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule() -> ProtocolRule {
        ProtocolRule::new(ProtocolConfig::default())
    }

    #[test]
    fn test_http_url_triggers() {
        let finding = rule().evaluate(&AnalysisInput::parse("http://example.com/login"));
        assert!(finding.triggered);
        assert!(finding.weight > 0.0);
        assert!(finding.reason.contains("HTTPS"));
    }

    #[test]
    fn test_https_url_does_not_trigger() {
        let finding = rule().evaluate(&AnalysisInput::parse("https://example.com/login"));
        assert!(!finding.triggered);
        assert_eq!(finding.weight, 0.0);
    }

    #[test]
    fn test_bare_domain_counts_as_missing_https() {
        let finding = rule().evaluate(&AnalysisInput::parse("www.example.com/account"));
        assert!(finding.triggered);
    }

    #[test]
    fn test_plain_text_is_not_applicable() {
        let finding = rule().evaluate(&AnalysisInput::parse("lunch at noon tomorrow?"));
        assert!(!finding.triggered);
    }
}
