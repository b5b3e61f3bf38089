use std::fmt;
use std::str::FromStr;

use auth::TokenSubject;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::identity::errors::EmailError;

/// Token type reported alongside issued access tokens.
pub const TOKEN_TYPE: &str = "Bearer";

/// Status values that allow a login. A missing status is also accepted.
pub const USABLE_STATUSES: [&str; 2] = ["ACTIVE", "VERIFIED"];

/// Identity aggregate entity.
///
/// A user account able to log in. The session salt is the revocation handle:
/// tokens are only valid while their embedded salt equals this one.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: IdentityId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub session_salt: Option<SessionSalt>,
    pub status: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Identity {
    /// Whether the status column permits a login.
    pub fn is_verified(&self) -> bool {
        match &self.status {
            None => true,
            Some(status) => USABLE_STATUSES.contains(&status.as_str()),
        }
    }

    /// Replace the session salt, invalidating every token minted under the old one.
    pub fn rotate_session(&mut self, salt: SessionSalt) {
        self.session_salt = Some(salt);
    }

    /// Claims subject for tokens issued to this identity.
    pub fn token_subject(&self) -> TokenSubject {
        TokenSubject::new(self.email.as_str(), self.id.0)
    }
}

/// Identity unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct IdentityId(pub i64);

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. Comparisons used
/// for lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string, surrounding whitespace is ignored
    ///
    /// # Returns
    /// Validated EmailAddress value object
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        let email = email.trim().to_string();
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercase form used when storing new identities.
    pub fn normalized(&self) -> Self {
        EmailAddress(self.0.to_lowercase())
    }

    pub fn eq_ignore_case(&self, other: &str) -> bool {
        self.0.to_lowercase() == other.to_lowercase()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Per-session salt. Opaque; never logged.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionSalt(String);

impl SessionSalt {
    pub fn new(salt: String) -> Self {
        Self(salt)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionSalt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionSalt(..)")
    }
}

/// Identity fields supplied at provisioning, before the store assigns an id.
#[derive(Debug, Clone)]
pub struct NewIdentity {
    pub email: EmailAddress,
    pub password_hash: String,
    pub status: Option<String>,
    pub active: bool,
}

/// Handle for the identity behind a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    pub id: IdentityId,
    pub email: EmailAddress,
}

impl From<&Identity> for AuthenticatedIdentity {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id,
            email: identity.email.clone(),
        }
    }
}

/// Command to log in with email and password
#[derive(Debug)]
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: String,
}

impl LoginCommand {
    pub fn new(email: EmailAddress, password: String) -> Self {
        Self { email, password }
    }
}

/// Command to create a new identity
#[derive(Debug)]
pub struct ProvisionIdentityCommand {
    pub email: EmailAddress,
    pub password: String,
    pub status: Option<String>,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub user: AuthenticatedIdentity,
}

/// Result of a successful refresh.
#[derive(Debug, Clone)]
pub struct RefreshedAccess {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
}

/// Claims echoed back by a successful verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedPayload {
    pub sub: String,
    pub user_id: i64,
    pub source: String,
}

/// Outcome of token verification; failures are folded into `valid == false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenVerification {
    pub valid: bool,
    pub user: Option<AuthenticatedIdentity>,
    pub payload: Option<VerifiedPayload>,
}

impl TokenVerification {
    pub fn invalid() -> Self {
        Self {
            valid: false,
            user: None,
            payload: None,
        }
    }

    pub fn valid(user: AuthenticatedIdentity, payload: VerifiedPayload) -> Self {
        Self {
            valid: true,
            user: Some(user),
            payload: Some(payload),
        }
    }
}
