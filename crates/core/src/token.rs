//! Access token inspection
//!
//! The client holds no signing key, so tokens are never verified here; the
//! only question this module answers is whether the backend will still accept
//! a stored token, based on its `exp` claim.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Registered claims the client cares about
#[derive(Debug, Deserialize)]
struct Claims {
    /// Expiration time (seconds since epoch)
    exp: i64,
}

/// Outcome of inspecting a stored access token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStatus {
    /// Payload decoded and carries an `exp` claim
    Valid { expires_at: i64 },
    /// Missing, malformed, or without an `exp` claim
    Invalid,
}

impl TokenStatus {
    /// Whether the token should be considered expired at `now`.
    ///
    /// `Invalid` always counts as expired, so an undecodable token triggers a
    /// refresh instead of being sent to the backend. No clock-skew grace
    /// period is applied.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self {
            Self::Valid { expires_at } => *expires_at < now.timestamp(),
            Self::Invalid => true,
        }
    }
}

/// Decode the expiry claim of a JWT without verifying its signature
#[must_use]
pub fn decode_expiry(token: &str) -> TokenStatus {
    let mut segments = token.split('.');
    let payload = match (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => return TokenStatus::Invalid,
    };

    let Ok(bytes) = URL_SAFE_NO_PAD.decode(payload) else {
        return TokenStatus::Invalid;
    };

    match serde_json::from_slice::<Claims>(&bytes) {
        Ok(claims) => TokenStatus::Valid {
            expires_at: claims.exp,
        },
        Err(_) => TokenStatus::Invalid,
    }
}
