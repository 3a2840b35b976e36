//! Session types.

use chrono::{DateTime, Utc};

use crate::access::Service;

/// Unique session identifier (16-byte random value, hex-encoded on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId([u8; 16]);

impl SessionId {
    /// Generate a new random session ID from the thread-local CSPRNG.
    pub fn new() -> Self {
        Self(rand::random())
    }

    /// Convert to hex string for the client.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from the lowercase hex form handed to clients.
    pub fn from_hex(s: &str) -> Option<Self> {
        if !s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return None;
        }
        let bytes = hex::decode(s).ok()?;
        let arr: [u8; 16] = bytes.try_into().ok()?;
        Some(Self(arr))
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// A granted session. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Session ID.
    pub id: SessionId,

    /// Service the session grants.
    pub service: Service,

    /// Session creation time.
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session for the given service with a fresh ID.
    pub fn new(service: Service) -> Self {
        Self {
            id: SessionId::new(),
            service,
            created_at: Utc::now(),
        }
    }
}
