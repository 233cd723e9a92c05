use serde::{Deserialize, Serialize};

/// Severity level shared by rules, violations, cases, and alert settings.
///
/// Ordered: `Low < Medium < High < Critical`. The wire format is the
/// lowercase name; `Display` matches it so log lines and payloads agree.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn severity_orders_low_to_critical() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn severity_wire_format_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&Severity::Critical).unwrap(),
            "\"critical\""
        );
        assert_eq!(Severity::High.to_string(), "high");
    }

    #[test]
    fn severity_parses_from_str() {
        let s: Severity = "medium".parse().unwrap();
        assert_eq!(s, Severity::Medium);
    }
}
