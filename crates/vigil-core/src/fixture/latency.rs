use std::time::Duration;

/// Simulated latency per operation weight.
///
/// Demo mode keeps loading states realistic by resolving after a delay
/// scaled to how heavy the real operation would be -- uploads and scans
/// take visibly longer than plain reads. Tests zero the profile so the
/// suite is not wall-clock bound.
#[derive(Debug, Clone)]
pub struct LatencyProfile {
    pub read: Duration,
    pub mutate: Duration,
    pub upload: Duration,
    pub extract: Duration,
    pub scan: Duration,
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self {
            read: Duration::from_millis(200),
            mutate: Duration::from_millis(400),
            upload: Duration::from_millis(800),
            extract: Duration::from_millis(1200),
            scan: Duration::from_millis(1500),
        }
    }
}

impl LatencyProfile {
    /// No delay anywhere. For tests.
    pub fn zero() -> Self {
        Self {
            read: Duration::ZERO,
            mutate: Duration::ZERO,
            upload: Duration::ZERO,
            extract: Duration::ZERO,
            scan: Duration::ZERO,
        }
    }
}
