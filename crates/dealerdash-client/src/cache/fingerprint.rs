use crate::params::Parameters;
use sha2::{Digest, Sha256};
use std::fmt;

/// Stable identity of a request.
///
/// SHA-256 over the method name and the parameters in sorted-key canonical
/// JSON, hex encoded. Insertion order of the parameters does not matter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    #[must_use]
    pub fn compute(method: &str, parameters: &Parameters) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(method.as_bytes());
        hasher.update(b"_");
        hasher.update(canonical_json(parameters).as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Built by hand so key order never depends on serde_json's map feature flags.
fn canonical_json(parameters: &Parameters) -> String {
    let body = parameters
        .sorted()
        .into_iter()
        .map(|(key, value)| {
            format!(
                "{}:{}",
                serde_json::Value::String(key.to_string()),
                value.to_json()
            )
        })
        .collect::<Vec<_>>()
        .join(",");
    format!("{{{}}}", body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_json() {
        let params = Parameters::new().with("b", 2).with("a", "x").with("c", None::<i64>);
        assert_eq!(canonical_json(&params), r#"{"a":"x","b":2,"c":null}"#);
        assert_eq!(canonical_json(&Parameters::new()), "{}");
    }

    #[test]
    fn test_order_independent() {
        let a = Parameters::new().with("StartDate", "2024-01-01").with("EndDate", "2024-01-31");
        let b = Parameters::new().with("EndDate", "2024-01-31").with("StartDate", "2024-01-01");
        assert_eq!(Fingerprint::compute("PullDeals", &a), Fingerprint::compute("PullDeals", &b));
    }

    #[test]
    fn test_distinguishes_method_and_values() {
        let params = Parameters::new().with("MaxRecords", 100);
        let base = Fingerprint::compute("PullCustomers", &params);

        assert_ne!(base, Fingerprint::compute("PullInventory", &params));
        assert_ne!(
            base,
            Fingerprint::compute("PullCustomers", &Parameters::new().with("MaxRecords", 101))
        );
        // "100" as text is a different request from 100 as a number.
        assert_ne!(
            base,
            Fingerprint::compute("PullCustomers", &Parameters::new().with("MaxRecords", "100"))
        );
    }

    #[test]
    fn test_nan_does_not_collide_with_text() {
        let float = Parameters::new().with("Ratio", f64::NAN);
        let text = Parameters::new().with("Ratio", "NaN");
        assert_ne!(
            Fingerprint::compute("PullDeals", &float),
            Fingerprint::compute("PullDeals", &text)
        );
    }

    #[test]
    fn test_hex_sha256() {
        let fp = Fingerprint::compute("GetDivisions", &Parameters::new());
        assert_eq!(fp.as_str().len(), 64);
        assert!(fp.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }
}
