//! The one piece of shared mutable state per client: the session credential.
//!
//! Reads take a shared lock just long enough to clone the token; configure and
//! outcome updates take the exclusive lock. No lock is held across a request.
use std::sync::Arc;

use scout_core::{ErrorKind, ScoutError, SessionStatus};
use scout_logging::{redact, scout_debug, scout_info};
use tokio::sync::RwLock;

const COOKIE_NAME_PREFIX: &str = "li_at=";

#[derive(Debug, Clone, Default)]
struct Session {
    token: Option<String>,
    last_probe_ok: bool,
}

/// Strips whitespace and a leading `li_at=` so only the bare credential is kept.
pub fn normalize_token(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix(COOKIE_NAME_PREFIX)
        .unwrap_or(trimmed)
        .to_string()
}

#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<RwLock<Session>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new credential and returns the normalized value.
    pub async fn configure(&self, raw: &str) -> Result<String, ScoutError> {
        let token = normalize_token(raw);
        if token.is_empty() {
            return Err(ScoutError::invalid_parameter(
                "token",
                "session token must not be empty",
            ));
        }
        let mut session = self.inner.write().await;
        session.token = Some(token.clone());
        session.last_probe_ok = false;
        scout_info!("Session configured token={}", redact(&token));
        Ok(token)
    }

    pub async fn token(&self) -> Option<String> {
        self.inner.read().await.token.clone()
    }

    pub(crate) async fn require_token(&self) -> Result<String, ScoutError> {
        self.token()
            .await
            .ok_or_else(|| ScoutError::not_authenticated("no session token configured"))
    }

    pub async fn clear(&self) {
        let mut session = self.inner.write().await;
        session.token = None;
        session.last_probe_ok = false;
    }

    /// Folds the latest classified response into the validity flag.
    ///
    /// Only success and auth/challenge failures say anything about the session;
    /// other failures leave the flag as it was.
    pub(crate) async fn record<T>(&self, result: &Result<T, ScoutError>) {
        let valid = match result {
            Ok(_) => true,
            Err(err) => match err.kind {
                ErrorKind::NotAuthenticated | ErrorKind::SecurityChallenge => false,
                _ => return,
            },
        };
        let mut session = self.inner.write().await;
        if session.last_probe_ok != valid {
            scout_debug!("Session validity changed to {}", valid);
        }
        session.last_probe_ok = valid;
    }

    pub async fn status(&self) -> SessionStatus {
        let session = self.inner.read().await;
        SessionStatus {
            configured: session.token.is_some(),
            last_probe_ok: session.last_probe_ok,
        }
    }
}
