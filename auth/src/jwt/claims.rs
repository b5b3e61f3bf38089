use std::fmt;

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Source tag written when the issuing channel is email/password login.
pub const DEFAULT_SOURCE: &str = "EMAIL";

/// Kind of session token, serialized into the `type` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity data copied into every token of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    pub email: String,
    pub user_id: i64,
    pub source: String,
}

impl TokenSubject {
    /// Subject for an email/password login.
    pub fn new(email: impl Into<String>, user_id: i64) -> Self {
        Self {
            email: email.into(),
            user_id,
            source: DEFAULT_SOURCE.to_string(),
        }
    }

    /// Override the source tag; refresh keeps the one the session was opened with.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }
}

/// Claims carried by a signed session token.
///
/// The `salt` claim names the session the token belongs to; the same salt is
/// appended to the server secret to form the signing key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject email
    pub sub: String,

    /// Subject identifier
    pub user_id: i64,

    /// Issuing channel
    pub source: String,

    #[serde(rename = "type")]
    pub kind: TokenKind,

    /// Session salt the token was minted under
    pub salt: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Create claims for a subject expiring `lifetime` from now.
    pub fn new(subject: &TokenSubject, kind: TokenKind, salt: &str, lifetime: Duration) -> Self {
        Self {
            sub: subject.email.clone(),
            user_id: subject.user_id,
            source: subject.source.clone(),
            kind,
            salt: salt.to_string(),
            exp: (Utc::now() + lifetime).timestamp(),
        }
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = exp;
        self
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}

/// Claims read from a token whose signature has not been checked.
///
/// Every field is optional so that a token with a missing claim can still be
/// inspected and rejected with a precise reason. Never authorize on these.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PeekedClaims {
    pub sub: Option<String>,
    pub user_id: Option<i64>,
    pub source: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub salt: Option<String>,
    pub exp: Option<i64>,
}

impl PeekedClaims {
    pub fn is_kind(&self, kind: TokenKind) -> bool {
        self.kind.as_deref() == Some(kind.as_str())
    }

    /// Source tag, falling back to `EMAIL` for tokens that lack one.
    pub fn source_or_default(&self) -> &str {
        self.source.as_deref().unwrap_or(DEFAULT_SOURCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims() {
        let subject = TokenSubject::new("a@x.com", 7);
        let claims = SessionClaims::new(&subject, TokenKind::Access, "abc", Duration::minutes(15));

        assert_eq!(claims.sub, "a@x.com");
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.source, "EMAIL");
        assert_eq!(claims.kind, TokenKind::Access);
        assert_eq!(claims.salt, "abc");

        let remaining = claims.exp - Utc::now().timestamp();
        assert!((899..=900).contains(&remaining));
    }

    #[test]
    fn test_wire_names() {
        let subject = TokenSubject::new("a@x.com", 7).with_source("SSO");
        let claims = SessionClaims::new(&subject, TokenKind::Refresh, "abc", Duration::days(7))
            .with_expiration(1_700_000_000);

        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "sub": "a@x.com",
                "user_id": 7,
                "source": "SSO",
                "type": "refresh",
                "salt": "abc",
                "exp": 1_700_000_000
            })
        );
    }

    #[test]
    fn test_is_expired() {
        let claims = SessionClaims::new(
            &TokenSubject::new("a@x.com", 1),
            TokenKind::Access,
            "abc",
            Duration::zero(),
        )
        .with_expiration(1000);

        assert!(!claims.is_expired(999));
        assert!(!claims.is_expired(1000));
        assert!(claims.is_expired(1001));
    }

    #[test]
    fn test_peeked_claims_tolerate_missing_fields() {
        let peeked: PeekedClaims = serde_json::from_value(serde_json::json!({
            "type": "access"
        }))
        .unwrap();

        assert!(peeked.is_kind(TokenKind::Access));
        assert!(!peeked.is_kind(TokenKind::Refresh));
        assert_eq!(peeked.user_id, None);
        assert_eq!(peeked.source_or_default(), "EMAIL");
    }

    #[test]
    fn test_peeked_claims_unknown_kind() {
        let peeked: PeekedClaims = serde_json::from_value(serde_json::json!({
            "type": "id_token",
            "user_id": 3
        }))
        .unwrap();

        assert!(!peeked.is_kind(TokenKind::Access));
        assert!(!peeked.is_kind(TokenKind::Refresh));
    }
}
