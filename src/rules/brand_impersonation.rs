use super::{AnalysisInput, BrandConfig, RuleFinding, TextRule};
use crate::url_utils::DomainUtils;
use std::net::IpAddr;

/// Look-alike domain detection: the registrable label is compared against a
/// fixed brand list by edit distance. An exact brand match is left alone;
/// only near misses ("paypa1", "arnazon") are flagged.
pub struct BrandImpersonationRule {
    config: BrandConfig,
}

impl BrandImpersonationRule {
    pub fn new(config: BrandConfig) -> Self {
        Self { config }
    }
}

impl TextRule for BrandImpersonationRule {
    fn name(&self) -> &str {
        "brand_impersonation"
    }

    fn evaluate(&self, input: &AnalysisInput) -> RuleFinding {
        let Some(host) = input.host.as_deref() else {
            return RuleFinding::clear(self.name());
        };
        if host.parse::<IpAddr>().is_ok() {
            return RuleFinding::clear(self.name());
        }
        let Some(domain) = DomainUtils::registrable_label(host) else {
            return RuleFinding::clear(self.name());
        };

        for brand in &self.config.brands {
            let distance = levenshtein(&domain, brand);
            if distance > 0 && distance <= self.config.max_edit_distance {
                return RuleFinding::new(
                    self.name(),
                    self.config.weight,
                    format!("Domain '{domain}' resembles brand '{brand}'"),
                );
            }
        }

        RuleFinding::clear(self.name())
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut current = vec![i + 1];
        for (j, cb) in b.iter().enumerate() {
            let insertions = previous[j + 1] + 1;
            let deletions = current[j] + 1;
            let substitutions = previous[j] + usize::from(ca != cb);
            current.push(insertions.min(deletions).min(substitutions));
        }
        previous = current;
    }
    previous[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule() -> BrandImpersonationRule {
        BrandImpersonationRule::new(BrandConfig::default())
    }

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein("paypal", "paypal"), 0);
        assert_eq!(levenshtein("paypa1", "paypal"), 1);
        assert_eq!(levenshtein("arnazon", "amazon"), 2);
        assert_eq!(levenshtein("", "apple"), 5);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
    }

    #[test]
    fn test_lookalike_domain_triggers() {
        let finding = rule().evaluate(&AnalysisInput::parse("https://paypa1.com/signin"));
        assert!(finding.triggered);
        assert!(finding.reason.contains("paypa1"));
        assert!(finding.reason.contains("paypal"));
    }

    #[test]
    fn test_exact_brand_domain_does_not_trigger() {
        let finding = rule().evaluate(&AnalysisInput::parse("https://paypal.com/signin"));
        assert!(!finding.triggered);
    }

    #[test]
    fn test_unrelated_domain_is_clear() {
        let finding = rule().evaluate(&AnalysisInput::parse("https://example.com"));
        assert!(!finding.triggered);
    }

    #[test]
    fn test_no_url_is_clear() {
        let finding = rule().evaluate(&AnalysisInput::parse("quarterly report attached"));
        assert!(!finding.triggered);
    }
}
