pub mod brand_impersonation;
pub mod domain_patterns;
pub mod keywords;
pub mod protocol;
pub mod structural;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use url::Url;

/// Outcome of one rule over one input. Every rule returns a finding
/// unconditionally; untriggered findings carry weight 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleFinding {
    pub rule: String,
    pub triggered: bool,
    pub weight: f64,
    pub reason: String,
}

impl RuleFinding {
    pub fn new(rule: &str, weight: f64, reason: String) -> Self {
        Self {
            rule: rule.to_string(),
            triggered: true,
            weight,
            reason,
        }
    }

    pub fn clear(rule: &str) -> Self {
        Self {
            rule: rule.to_string(),
            triggered: false,
            weight: 0.0,
            reason: "No match".to_string(),
        }
    }
}

/// Read-only view of the submitted text, parsed once and shared by every
/// rule. URL parsing failures leave the optional fields empty; rules treat
/// that as "not applicable" rather than an error.
#[derive(Debug, Clone)]
pub struct AnalysisInput {
    pub raw: String,
    pub lowered: String,
    /// First whitespace-delimited token that looks like a URL or bare domain.
    pub url_candidate: Option<String>,
    /// Scheme the text itself carried, if any ("http", "https", ...).
    pub scheme: Option<String>,
    pub url: Option<Url>,
    pub host: Option<String>,
}

fn domain_token_regex() -> &'static Regex {
    static DOMAIN_TOKEN: OnceLock<Regex> = OnceLock::new();
    DOMAIN_TOKEN
        .get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9.-]*\.[a-z]{2,}(?:[/:?#]\S*)?$").unwrap())
}

fn find_url_candidate(lowered: &str) -> Option<String> {
    for token in lowered.split_whitespace() {
        let token = token.trim_matches(|c: char| {
            matches!(c, '.' | ',' | ';' | '!' | '?' | ')' | '(' | '"' | '\'' | '<' | '>')
        });
        if token.is_empty() {
            continue;
        }
        if token.contains("://") || token.starts_with("www.") {
            return Some(token.to_string());
        }
        if !token.contains('@') && domain_token_regex().is_match(token) {
            return Some(token.to_string());
        }
    }
    None
}

impl AnalysisInput {
    pub fn parse(text: &str) -> Self {
        let raw = text.trim().to_string();
        let lowered = raw.to_lowercase();
        let url_candidate = find_url_candidate(&lowered);

        let (scheme, url) = match &url_candidate {
            Some(candidate) => {
                if let Some((scheme, _)) = candidate.split_once("://") {
                    (Some(scheme.to_string()), Url::parse(candidate).ok())
                } else {
                    // Bare domain: assume a scheme so the host still parses.
                    (None, Url::parse(&format!("http://{candidate}")).ok())
                }
            }
            None => (None, None),
        };
        let host = url
            .as_ref()
            .and_then(|u| u.host_str().map(|h| h.to_string()));

        Self {
            raw,
            lowered,
            url_candidate,
            scheme,
            url,
            host,
        }
    }
}

pub trait TextRule: Send + Sync {
    fn name(&self) -> &str;
    fn evaluate(&self, input: &AnalysisInput) -> RuleFinding;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolConfig {
    pub weight: f64,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self { weight: 15.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordConfig {
    pub denylist: Vec<String>,
    pub per_match_weight: f64,
    pub max_weight: f64,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            denylist: [
                "login",
                "verify",
                "secure",
                "account",
                "refund",
                "urgent",
                "login-update",
                "password",
                "suspended",
                "confirm",
                "winner",
                "lottery",
            ]
            .iter()
            .map(|k| k.to_string())
            .collect(),
            per_match_weight: 10.0,
            max_weight: 30.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainPatternConfig {
    pub suspicious_tlds: Vec<String>,
    pub max_host_labels: usize,
    pub ip_literal_weight: f64,
    pub punycode_weight: f64,
    pub subdomain_weight: f64,
    pub tld_weight: f64,
}

impl Default for DomainPatternConfig {
    fn default() -> Self {
        Self {
            suspicious_tlds: [
                "xyz", "top", "ru", "tk", "ml", "ga", "cf", "gq", "icu", "click", "zip",
            ]
            .iter()
            .map(|t| t.to_string())
            .collect(),
            max_host_labels: 4,
            ip_literal_weight: 25.0,
            punycode_weight: 15.0,
            subdomain_weight: 10.0,
            tld_weight: 15.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuralConfig {
    pub max_url_length: usize,
    pub long_url_weight: f64,
    pub max_path_segments: usize,
    pub deep_path_weight: f64,
    pub digit_density_threshold: f64,
    pub digit_density_weight: f64,
    pub credential_weight: f64,
    pub email_weight: f64,
    pub min_domain_length: usize,
    pub short_domain_weight: f64,
}

impl Default for StructuralConfig {
    fn default() -> Self {
        Self {
            max_url_length: 75,
            long_url_weight: 10.0,
            max_path_segments: 5,
            deep_path_weight: 10.0,
            digit_density_threshold: 0.25,
            digit_density_weight: 10.0,
            credential_weight: 20.0,
            email_weight: 10.0,
            min_domain_length: 3,
            short_domain_weight: 5.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandConfig {
    pub brands: Vec<String>,
    pub max_edit_distance: usize,
    pub weight: f64,
}

impl Default for BrandConfig {
    fn default() -> Self {
        Self {
            brands: [
                "paypal",
                "google",
                "amazon",
                "microsoft",
                "apple",
                "facebook",
                "netflix",
                "ebay",
            ]
            .iter()
            .map(|b| b.to_string())
            .collect(),
            max_edit_distance: 2,
            weight: 20.0,
        }
    }
}

/// Rule-set constants: keyword denylist, domain pattern lists, per-check
/// weights. Loaded once, immutable at runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub protocol: ProtocolConfig,
    pub keywords: KeywordConfig,
    pub domain_patterns: DomainPatternConfig,
    pub structural: StructuralConfig,
    pub brand_impersonation: BrandConfig,
}

impl RulesConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let config: RulesConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Fixed, ordered battery of rules. Order is part of the contract: verdict
/// reasons follow evaluation order.
pub struct RuleEvaluator {
    rules: Vec<Box<dyn TextRule>>,
}

impl RuleEvaluator {
    pub fn new(config: &RulesConfig) -> Self {
        Self {
            rules: vec![
                Box::new(protocol::ProtocolRule::new(config.protocol.clone())),
                Box::new(keywords::KeywordRule::new(config.keywords.clone())),
                Box::new(domain_patterns::DomainPatternRule::new(
                    config.domain_patterns.clone(),
                )),
                Box::new(structural::StructuralRule::new(config.structural.clone())),
                Box::new(brand_impersonation::BrandImpersonationRule::new(
                    config.brand_impersonation.clone(),
                )),
            ],
        }
    }

    pub fn evaluate(&self, input: &AnalysisInput) -> Vec<RuleFinding> {
        self.rules.iter().map(|rule| rule.evaluate(input)).collect()
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_candidate_from_message_body() {
        let input = AnalysisInput::parse("Click here: http://example.com/login now!");
        assert_eq!(
            input.url_candidate.as_deref(),
            Some("http://example.com/login")
        );
        assert_eq!(input.scheme.as_deref(), Some("http"));
        assert_eq!(input.host.as_deref(), Some("example.com"));
    }

    #[test]
    fn test_bare_domain_gets_host_but_no_scheme() {
        let input = AnalysisInput::parse("www.example.com/promo");
        assert!(input.scheme.is_none());
        assert_eq!(input.host.as_deref(), Some("www.example.com"));
    }

    #[test]
    fn test_plain_sentence_has_no_url() {
        let input = AnalysisInput::parse("See you at the meeting tomorrow.");
        assert!(input.url_candidate.is_none());
        assert!(input.host.is_none());
    }

    #[test]
    fn test_email_token_is_not_a_url_candidate() {
        let input = AnalysisInput::parse("Contact bob@example.com for details");
        assert!(input.url_candidate.is_none());
    }

    #[test]
    fn test_evaluator_order_is_stable() {
        let evaluator = RuleEvaluator::new(&RulesConfig::default());
        let input = AnalysisInput::parse("http://example.com");
        let names: Vec<String> = evaluator
            .evaluate(&input)
            .into_iter()
            .map(|f| f.rule)
            .collect();
        assert_eq!(
            names,
            vec![
                "protocol",
                "suspicious_keywords",
                "domain_patterns",
                "structural_anomalies",
                "brand_impersonation"
            ]
        );
    }

    #[test]
    fn test_rules_degrade_gracefully_on_malformed_url() {
        let evaluator = RuleEvaluator::new(&RulesConfig::default());
        for garbage in ["http://", "https://###", "ftp://%%%", ":// . ."] {
            let input = AnalysisInput::parse(garbage);
            let findings = evaluator.evaluate(&input);
            assert_eq!(findings.len(), evaluator.rule_count());
        }
    }

    #[test]
    fn test_config_yaml_round_trip() {
        let config = RulesConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let reloaded: RulesConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config.keywords.denylist, reloaded.keywords.denylist);
        assert_eq!(
            config.domain_patterns.suspicious_tlds,
            reloaded.domain_patterns.suspicious_tlds
        );
    }
}
