/// Minimal host/domain hierarchy utilities
pub struct DomainUtils;

impl DomainUtils {
    /// Canonicalize host (lowercase, remove www prefix)
    pub fn canonicalize_host(host: &str) -> String {
        let host_lower = host.to_lowercase();
        if let Some(stripped) = host_lower.strip_prefix("www.") {
            stripped.to_string()
        } else {
            host_lower
        }
    }

    /// Label directly left of the TLD ("paypal" in "login.paypal.com")
    pub fn registrable_label(host: &str) -> Option<String> {
        let canonical = Self::canonicalize_host(host);
        let labels: Vec<&str> = canonical.split('.').filter(|l| !l.is_empty()).collect();
        if labels.len() >= 2 {
            Some(labels[labels.len() - 2].to_string())
        } else {
            None
        }
    }

    /// Top-level domain of a host, without the leading dot
    pub fn tld(host: &str) -> Option<String> {
        let canonical = Self::canonicalize_host(host);
        let labels: Vec<&str> = canonical.split('.').filter(|l| !l.is_empty()).collect();
        if labels.len() >= 2 {
            labels.last().map(|l| l.to_string())
        } else {
            None
        }
    }
}
