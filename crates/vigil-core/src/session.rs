// ── Session state and mode resolution ──
//
// The session flag decides, per call, which backend serves a request.
// It is deliberately re-read on every call: login/logout flips the mode
// without a process restart, and a memoized resolver would keep serving
// the old backend.

use std::sync::Arc;

use arc_swap::ArcSwap;
use tokio::sync::watch;
use tracing::info;

/// Which backend serves requests for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Authenticated against the live API.
    Live,
    /// Backed by the in-process fixture store.
    Demo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    /// Not yet determined (app still restoring auth state). Callers
    /// suspend on [`Session::resolved`] rather than guess.
    Unknown,
    Demo,
    Live,
}

/// Process-wide session flag with change notification.
///
/// Readers either take a non-blocking peek ([`mode`](Self::mode)) or
/// suspend until the state is determined ([`resolved`](Self::resolved)).
pub struct Session {
    state: ArcSwap<SessionState>,
    notify: watch::Sender<u64>,
}

impl Session {
    pub(crate) fn new() -> Self {
        let (notify, _) = watch::channel(0);
        Self {
            state: ArcSwap::from_pointee(SessionState::Unknown),
            notify,
        }
    }

    /// The current mode, or `None` while the session is indeterminate.
    pub fn mode(&self) -> Option<Mode> {
        match **self.state.load() {
            SessionState::Unknown => None,
            SessionState::Demo => Some(Mode::Demo),
            SessionState::Live => Some(Mode::Live),
        }
    }

    /// Suspend until the session is determinate, then return the mode.
    ///
    /// Subscribes before the first peek so a transition between the
    /// peek and the await cannot be missed.
    pub async fn resolved(&self) -> Mode {
        let mut rx = self.notify.subscribe();
        loop {
            if let Some(mode) = self.mode() {
                return mode;
            }
            // Sender lives in `self`, so this only fails if the Session
            // is being dropped -- at which point nobody awaits us.
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }

    pub(crate) fn enter_demo(&self) {
        info!("session entering demo mode");
        self.set(SessionState::Demo);
    }

    pub(crate) fn enter_live(&self) {
        info!("session entering live mode");
        self.set(SessionState::Live);
    }

    /// Back to indeterminate (logout).
    pub(crate) fn reset(&self) {
        info!("session reset");
        self.set(SessionState::Unknown);
    }

    fn set(&self, state: SessionState) {
        self.state.store(Arc::new(state));
        self.notify.send_modify(|v| *v += 1);
    }
}
