//! Session cache
//!
//! Holds the process-wide current session and de-duplicates concurrent
//! loads: while a fetch is in flight, every caller awaits that same fetch
//! instead of issuing its own. A probe failure degrades to "logged out"
//! rather than surfacing an error, so navigation never breaks just because
//! the session check hiccuped.

use std::sync::{Arc, Mutex};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use randomizer_domain::Session;
use tokio::sync::watch;
use tracing::debug;

use crate::ports::auth_backend::{AuthBackend, AuthError};

type SessionFuture = Shared<BoxFuture<'static, Option<Session>>>;

/// Process-wide session state with load de-duplication
///
/// The in-flight slot holds at most one pending fetch. The fetch future
/// clears the slot exactly once when it settles, so the next idle call
/// starts a fresh fetch (every idle call re-validates upstream; a small
/// redundant network cost traded for freshness).
pub struct SessionCache {
    backend: Arc<dyn AuthBackend>,
    in_flight: Arc<Mutex<Option<SessionFuture>>>,
    current: watch::Sender<Option<Session>>,
}

impl SessionCache {
    pub fn new(backend: Arc<dyn AuthBackend>) -> Self {
        let (current, _) = watch::channel(None);
        Self {
            backend,
            in_flight: Arc::new(Mutex::new(None)),
            current,
        }
    }

    /// Resolve the current session, fetching upstream only if no fetch is
    /// already in flight
    pub async fn load_session(&self) -> Option<Session> {
        let fetch = {
            let mut slot = self.in_flight.lock().expect("in-flight slot lock poisoned");
            match slot.as_ref() {
                Some(pending) => pending.clone(),
                None => {
                    let fetch = self.start_fetch();
                    *slot = Some(fetch.clone());
                    fetch
                }
            }
        };
        fetch.await
    }

    fn start_fetch(&self) -> SessionFuture {
        let backend = Arc::clone(&self.backend);
        let slot = Arc::clone(&self.in_flight);
        let current = self.current.clone();
        async move {
            let session = match backend.get_session().await {
                Ok(session) => session,
                Err(e) => {
                    // Probe failures must not break the UI: treat as logged out
                    debug!(error = %e, "session probe failed, treating as logged out");
                    None
                }
            };
            current.send_replace(session.clone());
            // Release the slot for future calls (but no longer in parallel)
            slot.lock().expect("in-flight slot lock poisoned").take();
            session
        }
        .boxed()
        .shared()
    }

    /// Whether a session is currently resolvable
    pub async fn is_logged_in(&self) -> bool {
        self.load_session().await.is_some()
    }

    /// Ask the backend to email a one-time login link
    pub async fn send_magic_link(&self, email: &str, redirect_to: &str) -> Result<(), AuthError> {
        self.backend.send_magic_link(email, redirect_to).await
    }

    /// Sign out upstream and, on success, clear the local session
    ///
    /// Upstream failure is returned to the caller and leaves local state
    /// untouched: silently pretending a still-live upstream session is gone
    /// would be worse than showing the error.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.backend.sign_out().await?;
        self.current.send_replace(None);
        Ok(())
    }

    /// Last settled session value, without touching the backend
    pub fn current(&self) -> Option<Session> {
        self.current.borrow().clone()
    }

    /// Subscribe to session changes (notified on every settled fetch and
    /// on sign-out)
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.current.subscribe()
    }
}
