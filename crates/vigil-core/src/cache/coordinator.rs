// ── Cache registry ──
//
// Freshness bookkeeping per query key. Payloads are stored type-erased
// as JSON; the generation counter implements the stale-response guard
// for abandoned or superseded fetches.

use dashmap::DashMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use super::invalidation::{Mutation, Target};
use super::key::QueryKey;

#[derive(Debug, Default)]
struct CacheEntry {
    fresh: bool,
    /// Fingerprint of the filter params the payload was fetched with.
    fingerprint: u64,
    /// Bumped on every `begin` and every invalidation. A fetch may only
    /// commit if the generation has not moved since it began.
    generation: u64,
    value: Option<serde_json::Value>,
}

/// Tracks freshness for every logical query and applies the
/// [`Mutation`] invalidation table.
///
/// Stale entries are never purged eagerly -- they are just excluded
/// from fresh reuse, so an unmounted view pays no refetch cost until
/// it is queried again.
pub struct CacheCoordinator {
    entries: DashMap<QueryKey, CacheEntry>,
}

impl CacheCoordinator {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Return the cached payload if the key is fresh and was fetched
    /// with the same filter parameters.
    pub fn lookup<T: DeserializeOwned>(&self, key: &QueryKey, fingerprint: u64) -> Option<T> {
        let entry = self.entries.get(key)?;
        if !entry.fresh || entry.fingerprint != fingerprint {
            return None;
        }
        let value = entry.value.as_ref()?;
        match serde_json::from_value(value.clone()) {
            Ok(decoded) => {
                trace!(%key, "cache hit");
                Some(decoded)
            }
            // A shape mismatch means the stored payload predates a type
            // change; treat it as a miss and let the refetch overwrite.
            Err(e) => {
                debug!(%key, error = %e, "cached payload failed to decode, refetching");
                None
            }
        }
    }

    /// Register the start of a fetch and return its generation token.
    ///
    /// Starting a fetch supersedes any earlier in-flight fetch for the
    /// key: the older one's `commit` will be refused.
    pub fn begin(&self, key: &QueryKey, fingerprint: u64) -> u64 {
        let mut entry = self.entries.entry(key.clone()).or_default();
        if entry.fingerprint != fingerprint {
            // Params changed -- the stored payload answers a different
            // question and must not be reused under the new fingerprint.
            entry.fresh = false;
            entry.value = None;
            entry.fingerprint = fingerprint;
        }
        entry.generation += 1;
        trace!(%key, generation = entry.generation, "fetch started");
        entry.generation
    }

    /// Store a fetch result, unless the key moved on while the fetch
    /// was in flight (superseded or invalidated). Returns whether the
    /// result was applied.
    pub fn commit<T: Serialize>(&self, key: &QueryKey, generation: u64, value: &T) -> bool {
        let Some(mut entry) = self.entries.get_mut(key) else {
            return false;
        };
        if entry.generation != generation {
            debug!(%key, "discarding stale fetch result");
            return false;
        }
        match serde_json::to_value(value) {
            Ok(encoded) => {
                entry.value = Some(encoded);
                entry.fresh = true;
                true
            }
            Err(e) => {
                debug!(%key, error = %e, "failed to encode payload for cache");
                false
            }
        }
    }

    /// Apply the invalidation table entry for a committed mutation.
    pub fn invalidate(&self, mutation: &Mutation) {
        for target in mutation.invalidates() {
            match target {
                Target::Prefix(prefix) => {
                    for mut entry in self.entries.iter_mut() {
                        if entry.key().matches_prefix(prefix) {
                            entry.fresh = false;
                            entry.generation += 1;
                        }
                    }
                    debug!(?mutation, prefix, "invalidated prefix");
                }
                Target::Exact(key) => {
                    if let Some(mut entry) = self.entries.get_mut(&key) {
                        entry.fresh = false;
                        entry.generation += 1;
                    }
                    debug!(?mutation, %key, "invalidated key");
                }
            }
        }
    }

    /// Drop every entry. Used on session transitions (login, logout,
    /// demo entry) so one backend's payloads never answer for the other.
    pub fn reset(&self) {
        debug!("cache reset");
        self.entries.clear();
    }

    /// Whether a read for this key + params would be served from cache.
    pub fn is_fresh(&self, key: &QueryKey, fingerprint: u64) -> bool {
        self.entries
            .get(key)
            .is_some_and(|e| e.fresh && e.fingerprint == fingerprint && e.value.is_some())
    }
}

impl Default for CacheCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::super::{NO_PARAMS, fingerprint};
    use super::*;

    #[test]
    fn commit_then_lookup_roundtrips() {
        let cache = CacheCoordinator::new();
        let key = QueryKey::of("policies");

        let generation = cache.begin(&key, NO_PARAMS);
        assert!(cache.commit(&key, generation, &vec!["pol-001", "pol-002"]));

        let cached: Vec<String> = cache.lookup(&key, NO_PARAMS).unwrap();
        assert_eq!(cached, vec!["pol-001", "pol-002"]);
    }

    #[test]
    fn invalidation_excludes_key_from_fresh_reuse() {
        let cache = CacheCoordinator::new();
        let key = QueryKey::of("rules");

        let generation = cache.begin(&key, NO_PARAMS);
        cache.commit(&key, generation, &vec!["rule-001"]);
        assert!(cache.is_fresh(&key, NO_PARAMS));

        cache.invalidate(&Mutation::ToggleRule);
        assert!(!cache.is_fresh(&key, NO_PARAMS));
        assert_eq!(cache.lookup::<Vec<String>>(&key, NO_PARAMS), None);
    }

    #[test]
    fn invalidation_leaves_unrelated_keys_fresh() {
        let cache = CacheCoordinator::new();
        let rules = QueryKey::of("rules");
        let violations = QueryKey::of("violations");

        let g1 = cache.begin(&rules, NO_PARAMS);
        cache.commit(&rules, g1, &1);
        let g2 = cache.begin(&violations, NO_PARAMS);
        cache.commit(&violations, g2, &2);

        cache.invalidate(&Mutation::ToggleRule);
        assert!(!cache.is_fresh(&rules, NO_PARAMS));
        assert!(cache.is_fresh(&violations, NO_PARAMS));
    }

    #[test]
    fn prefix_invalidation_hits_detail_keys() {
        let cache = CacheCoordinator::new();
        let detail = QueryKey::detail("violations", "vio-001");

        let generation = cache.begin(&detail, NO_PARAMS);
        cache.commit(&detail, generation, &"open");

        cache.invalidate(&Mutation::RemediateViolation);
        assert!(!cache.is_fresh(&detail, NO_PARAMS));
    }

    #[test]
    fn inflight_fetch_is_discarded_after_invalidation() {
        let cache = CacheCoordinator::new();
        let key = QueryKey::of("violations");

        let generation = cache.begin(&key, NO_PARAMS);
        cache.invalidate(&Mutation::RunScan);

        assert!(!cache.commit(&key, generation, &vec!["vio-001"]));
        assert!(!cache.is_fresh(&key, NO_PARAMS));
    }

    #[test]
    fn newer_fetch_supersedes_older_one() {
        let cache = CacheCoordinator::new();
        let key = QueryKey::of("scans");

        let older = cache.begin(&key, NO_PARAMS);
        let newer = cache.begin(&key, NO_PARAMS);

        assert!(!cache.commit(&key, older, &"old"));
        assert!(cache.commit(&key, newer, &"new"));
        assert_eq!(cache.lookup::<String>(&key, NO_PARAMS).unwrap(), "new");
    }

    #[test]
    fn changed_params_invalidate_stored_payload() {
        let cache = CacheCoordinator::new();
        let key = QueryKey::of("violations");
        let open_only = fingerprint(&serde_json::json!({ "status": "open" }));

        let generation = cache.begin(&key, open_only);
        cache.commit(&key, generation, &vec!["vio-001"]);
        assert!(cache.is_fresh(&key, open_only));

        // A fetch with different params takes over the key; the old
        // payload must not answer the new question.
        let all = fingerprint(&serde_json::json!({}));
        cache.begin(&key, all);
        assert!(!cache.is_fresh(&key, open_only));
        assert_eq!(cache.lookup::<Vec<String>>(&key, all), None);
    }
}
