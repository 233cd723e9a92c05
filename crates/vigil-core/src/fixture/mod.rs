// ── In-process fixture backend ──
//
// Demo mode is served entirely from this module: a seeded, mutable
// dataset behind an explicit store object, with simulated latency so
// loading states behave like they would against the live API.

mod latency;
mod seed;
mod store;

pub use latency::LatencyProfile;
pub use store::FixtureStore;
