//! Dual-mode reactive data layer between `vigil-api` and UI consumers.
//!
//! This crate owns the session, cache, and fixture infrastructure for
//! the Vigil dashboard workspace:
//!
//! - **[`DataService`]** — The facade UI code holds. One method per
//!   query/mutation intent: resolve the session mode, pick a backend,
//!   execute, settle the cache. Reads get one transparent retry on
//!   transient transport failures; mutations are never retried.
//!
//! - **[`Session`]** — Process-wide mode flag (`Live` / `Demo`),
//!   re-read on every call so login/logout flips backends without a
//!   restart. Indeterminate state suspends callers instead of guessing.
//!
//! - **[`FixtureStore`]** — Seeded in-memory backend for demo mode.
//!   Mirrors every gateway operation with simulated latency, in-place
//!   mutation, and read-time derived aggregations.
//!
//! - **[`CacheCoordinator`]** — Query-key registry with the static
//!   mutation → invalidation table and a generation-counter guard that
//!   discards stale in-flight fetch results.
//!
//! - **Composite assembly** ([`join`]) — Account and case detail views
//!   joined client-side with one typed function per composite, so the
//!   shape never depends on which backend produced the parts.
//!
//! Entity types live in [`vigil_api::model`] and are re-exported here
//! as [`model`] for consumer ergonomics.

mod backend;
pub mod cache;
pub mod config;
pub mod error;
pub mod fixture;
pub mod join;
pub mod service;
pub mod session;

// ── Primary re-exports ──────────────────────────────────────────────
pub use cache::{CacheCoordinator, Mutation, QueryKey};
pub use config::ServiceConfig;
pub use error::CoreError;
pub use fixture::{FixtureStore, LatencyProfile};
pub use join::CaseDetail;
pub use service::DataService;
pub use session::{Mode, Session};

// Re-export the entity model for consumers that only depend on core.
pub use vigil_api::model;
