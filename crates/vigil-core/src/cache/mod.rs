// ── Query cache coordination ──
//
// Maps logical queries to keys, tracks freshness per key, and applies
// the static mutation → invalidation table. The coordinator stores
// fetched payloads type-erased as JSON so one registry serves every
// entity type.

mod coordinator;
mod invalidation;
mod key;

pub use coordinator::CacheCoordinator;
pub use invalidation::Mutation;
pub use key::QueryKey;

use std::hash::{DefaultHasher, Hash, Hasher};

use serde::Serialize;

/// Fingerprint of the filter parameters a query was fetched with.
///
/// Two reads of the same key with different filters must not reuse
/// each other's payloads; the fingerprint is the cheap comparison.
pub fn fingerprint<T: Serialize>(params: &T) -> u64 {
    let encoded = serde_json::to_string(params).unwrap_or_default();
    let mut hasher = DefaultHasher::new();
    encoded.hash(&mut hasher);
    hasher.finish()
}

/// Fingerprint for parameterless queries.
pub const NO_PARAMS: u64 = 0;
