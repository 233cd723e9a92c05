//! Async Rust client for the Vigil compliance-monitoring API.
//!
//! One [`ApiClient`] covers the whole HTTP surface: auth, dashboard,
//! policies, rules, scans, violations, accounts, settings, analytics,
//! cases, and data import. The client normalizes every failure into
//! [`Error`], attaches the session bearer token, and handles multipart
//! upload / blob download transport. It performs no retries and holds
//! no cache -- both belong to `vigil-core`.

pub mod client;
mod endpoints;
pub mod error;
pub mod model;
pub mod transport;

pub use client::ApiClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
