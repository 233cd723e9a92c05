// ── Runtime service configuration ──
//
// Describes *how* to reach the live API and how the fixture store
// behaves. Carries no credentials and never touches disk -- the host
// app constructs a `ServiceConfig` and hands it in.

use url::Url;
use vigil_api::TransportConfig;

use crate::fixture::LatencyProfile;

/// Configuration for constructing a [`DataService`](crate::DataService).
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Live API root (e.g. `https://api.vigil.example/`).
    pub base_url: Url,
    /// Transport tuning for the live gateway (timeout, TLS).
    pub transport: TransportConfig,
    /// Simulated latency for demo-mode operations. Zero it in tests.
    pub fixture_latency: LatencyProfile,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/"
                .parse()
                .expect("default base URL is valid"),
            transport: TransportConfig::default(),
            fixture_latency: LatencyProfile::default(),
        }
    }
}
