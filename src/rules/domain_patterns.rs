use super::{AnalysisInput, DomainPatternConfig, RuleFinding, TextRule};
use crate::url_utils::DomainUtils;
use std::net::IpAddr;

/// Host-portion heuristics: IP-literal hosts, punycode/mixed-script labels,
/// excessive subdomain nesting and suspicious top-level domains. Sub-checks
/// accumulate into a single finding.
pub struct DomainPatternRule {
    config: DomainPatternConfig,
}

impl DomainPatternRule {
    pub fn new(config: DomainPatternConfig) -> Self {
        Self { config }
    }
}

impl TextRule for DomainPatternRule {
    fn name(&self) -> &str {
        "domain_patterns"
    }

    fn evaluate(&self, input: &AnalysisInput) -> RuleFinding {
        let Some(host) = input.host.as_deref() else {
            return RuleFinding::clear(self.name());
        };

        let mut weight = 0.0;
        let mut reasons = Vec::new();

        if host.parse::<IpAddr>().is_ok() {
            weight += self.config.ip_literal_weight;
            reasons.push("IP address used as host".to_string());
        } else {
            let candidate_has_non_ascii = input
                .url_candidate
                .as_deref()
                .map(|c| c.chars().any(|ch| !ch.is_ascii()))
                .unwrap_or(false);
            if host.split('.').any(|label| label.starts_with("xn--")) || candidate_has_non_ascii {
                weight += self.config.punycode_weight;
                reasons.push("Punycode or mixed-script host".to_string());
            }

            let labels = host.split('.').filter(|label| !label.is_empty()).count();
            if labels > self.config.max_host_labels {
                weight += self.config.subdomain_weight;
                reasons.push(format!("Excessive subdomain nesting ({labels} labels)"));
            }

            if let Some(tld) = DomainUtils::tld(host) {
                if self.config.suspicious_tlds.contains(&tld) {
                    weight += self.config.tld_weight;
                    reasons.push(format!("Suspicious top-level domain .{tld}"));
                }
            }
        }

        if weight > 0.0 {
            RuleFinding::new(self.name(), weight, reasons.join(", "))
        } else {
            RuleFinding::clear(self.name())
        }
    }
}
