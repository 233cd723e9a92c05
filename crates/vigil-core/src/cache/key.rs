use std::fmt;

/// Identifier of a logical query: an entity-name prefix plus an
/// optional sub-key (`("rules", Some("pol-001"))`, `("violations", None)`).
///
/// Invalidation operates on the prefix, so staling `violations` hits
/// both the list key and every per-violation detail key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    entity: &'static str,
    sub: Option<String>,
}

impl QueryKey {
    /// Key for a collection-level query.
    pub fn of(entity: &'static str) -> Self {
        Self { entity, sub: None }
    }

    /// Key for a single entity's detail query.
    pub fn detail(entity: &'static str, sub: impl Into<String>) -> Self {
        Self {
            entity,
            sub: Some(sub.into()),
        }
    }

    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// Whether this key falls under the given invalidation prefix.
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        self.entity == prefix
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sub {
            Some(sub) => write!(f, "{}:{sub}", self.entity),
            None => write!(f, "{}", self.entity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_keys_match_their_entity_prefix() {
        let key = QueryKey::detail("violations", "vio-001");
        assert!(key.matches_prefix("violations"));
        assert!(!key.matches_prefix("rules"));
    }

    #[test]
    fn list_and_detail_keys_are_distinct() {
        assert_ne!(
            QueryKey::of("cases"),
            QueryKey::detail("cases", "case-001")
        );
    }

    #[test]
    fn display_is_prefix_colon_sub() {
        assert_eq!(QueryKey::of("scans").to_string(), "scans");
        assert_eq!(
            QueryKey::detail("scans", "scan-001").to_string(),
            "scans:scan-001"
        );
    }
}
