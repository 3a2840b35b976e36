//! Session resolution policy.
//!
//! Controls what happens when a caller presents a session ID that does not
//! resolve. `Permissive` accepts any existing session of the requested
//! service in its place; `Strict` rejects the request.

use anyhow::{anyhow, Result};
use std::str::FromStr;
use tracing::{debug, warn};

use super::store::SessionStore;
use super::types::{Session, SessionId};
use crate::access::Service;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPolicy {
    /// Only the presented session ID is consulted.
    Strict,
    /// Fall back to the first session of the requested service.
    #[default]
    Permissive,
}

impl SessionPolicy {
    /// Whether the fallback scan is allowed.
    pub fn allows_fallback(&self) -> bool {
        matches!(self, SessionPolicy::Permissive)
    }

    /// Resolve the session a caller presented for `service`.
    ///
    /// The returned session may belong to another service; the caller decides
    /// how to reject that.
    pub fn resolve(
        &self,
        store: &SessionStore,
        presented: Option<&str>,
        service: Service,
    ) -> Result<Option<Session>> {
        if let Some(id) = presented.and_then(SessionId::from_hex) {
            if let Some(session) = store.get(&id)? {
                return Ok(Some(session));
            }
        }

        if !self.allows_fallback() {
            debug!(presented = presented.is_some(), "Session not found, fallback disabled");
            return Ok(None);
        }

        let fallback = store.find_any_by_service(service)?;
        if let Some(ref session) = fallback {
            warn!(
                session_id = %session.id,
                service = %service,
                created_at = %session.created_at,
                "Using fallback session"
            );
        }
        Ok(fallback)
    }
}

impl FromStr for SessionPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(SessionPolicy::Strict),
            "permissive" => Ok(SessionPolicy::Permissive),
            _ => Err(anyhow!("Unsupported session policy: {}", s)),
        }
    }
}

impl std::fmt::Display for SessionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionPolicy::Strict => write!(f, "strict"),
            SessionPolicy::Permissive => write!(f, "permissive"),
        }
    }
}
