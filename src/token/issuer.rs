//! Admin token issuer.

use anyhow::{anyhow, Context, Result};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Admin token lifetime.
pub const ADMIN_TOKEN_TTL_SECS: u64 = 2 * 60 * 60;

/// Role claim carried by every admin token.
pub const ADMIN_ROLE: &str = "admin";

/// Claims for issued admin tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminClaims {
    /// Free-text name supplied at login.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Always "admin".
    pub role: String,
    /// Issued at.
    pub iat: u64,
    /// Expiration time.
    pub exp: u64,
}

/// Issued token result.
#[derive(Debug)]
pub struct IssuedToken {
    /// The JWT.
    pub token: String,
    /// Expires in seconds.
    pub expires_in: u64,
}

/// HS256 signer for admin tokens.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    ttl_secs: u64,
}

impl TokenIssuer {
    /// Create an issuer from the shared signing secret.
    pub fn new(secret: &str) -> Result<Self> {
        if secret.is_empty() {
            return Err(anyhow!("Signing secret must not be empty"));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            ttl_secs: ADMIN_TOKEN_TTL_SECS,
        })
    }

    /// Issue an admin token for `username`.
    pub fn issue_admin_token(&self, username: Option<&str>) -> Result<IssuedToken> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let exp = now + self.ttl_secs;

        let claims = AdminClaims {
            username: username.map(String::from),
            role: ADMIN_ROLE.to_string(),
            iat: now,
            exp,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .context("Failed to encode admin token")?;

        debug!(username = ?claims.username, exp = %exp, "Issued admin token");

        Ok(IssuedToken {
            token,
            expires_in: self.ttl_secs,
        })
    }
}
