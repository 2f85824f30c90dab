//! Identity claims for authenticated callers.
//!
//! The identity provider is an external collaborator: it issues signed
//! tokens whose subject is the internal user id. Everything downstream
//! trusts that id as the owner for all scoping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims identifying the calling user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the internal user id.
    pub sub: String,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Email address, when the provider includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Display name, when the provider includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Claims {
    /// Creates new claims for a user expiring at the given time.
    #[must_use]
    pub fn new(user_id: Uuid, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: user_id.to_string(),
            exp: expires_at.timestamp(),
            iat: Utc::now().timestamp(),
            email: None,
            name: None,
        }
    }

    /// Returns the user id from the subject claim.
    ///
    /// Falls back to the nil UUID if the subject is malformed; token
    /// validation rejects such tokens before handlers see them.
    #[must_use]
    pub fn user_id(&self) -> Uuid {
        Uuid::parse_str(&self.sub).unwrap_or(Uuid::nil())
    }
}
