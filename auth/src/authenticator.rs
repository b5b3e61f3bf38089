use chrono::Duration;

use crate::jwt::JwtError;
use crate::jwt::PeekedClaims;
use crate::jwt::SessionClaims;
use crate::jwt::TokenCodec;
use crate::jwt::TokenKind;
use crate::jwt::TokenSubject;
use crate::password::generate_session_salt;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Lifetimes of the two token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    pub access: Duration,
    pub refresh: Duration,
}

impl TokenLifetimes {
    pub fn new(access: Duration, refresh: Duration) -> Self {
        Self { access, refresh }
    }

    fn of(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access,
            TokenKind::Refresh => self.refresh,
        }
    }
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self {
            access: Duration::minutes(15),
            refresh: Duration::days(7),
        }
    }
}

/// Authentication coordinator combining password hashing and session tokens.
///
/// Stateless: the caller owns the identity record and its current session
/// salt, and passes the salt in for every issue/validate call.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
    lifetimes: TokenLifetimes,
}

/// Tokens minted for a fresh session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Token was not issued for the current session")]
    SaltMismatch,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Static server secret for token signing
    /// * `password_hasher` - Configured password hasher
    /// * `lifetimes` - Access and refresh token lifetimes
    ///
    /// # Returns
    /// Configured Authenticator instance
    pub fn new(jwt_secret: &str, password_hasher: PasswordHasher, lifetimes: TokenLifetimes) -> Self {
        Self {
            password_hasher,
            token_codec: TokenCodec::new(jwt_secret),
            lifetimes,
        }
    }

    /// Seconds an access token stays valid, as reported to clients.
    pub fn access_token_ttl_secs(&self) -> i64 {
        self.lifetimes.access.num_seconds()
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored hash; malformed hashes never match.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Draw a salt for a new session.
    pub fn new_session_salt(&self) -> String {
        generate_session_salt()
    }

    /// Mint the access/refresh pair of a session.
    ///
    /// Both tokens embed the same salt, so a refresh right after login verifies.
    ///
    /// # Arguments
    /// * `subject` - Identity data to embed
    /// * `salt` - Session salt, already persisted by the caller
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_session(
        &self,
        subject: &TokenSubject,
        salt: &str,
    ) -> Result<SessionTokens, JwtError> {
        Ok(SessionTokens {
            access_token: self.issue(subject, TokenKind::Access, salt)?,
            refresh_token: self.issue(subject, TokenKind::Refresh, salt)?,
        })
    }

    /// Mint a single access token for an existing session.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_access_token(&self, subject: &TokenSubject, salt: &str) -> Result<String, JwtError> {
        self.issue(subject, TokenKind::Access, salt)
    }

    fn issue(&self, subject: &TokenSubject, kind: TokenKind, salt: &str) -> Result<String, JwtError> {
        let claims = SessionClaims::new(subject, kind, salt, self.lifetimes.of(kind));
        self.token_codec.encode(&claims)
    }

    /// Read claims without verification, to find out whose salt to check against.
    ///
    /// # Errors
    /// * `JwtError` - Token is malformed
    pub fn peek(&self, token: &str) -> Result<PeekedClaims, JwtError> {
        self.token_codec.decode_unverified(token)
    }

    /// Validate a token against the subject's current session salt.
    ///
    /// # Arguments
    /// * `token` - JWT string
    /// * `current_salt` - Salt currently stored for the subject
    ///
    /// # Returns
    /// Verified claims
    ///
    /// # Errors
    /// * `JwtError` - Signature, expiry, or format check failed
    /// * `SaltMismatch` - Signature held but the embedded salt differs
    pub fn validate_token(
        &self,
        token: &str,
        current_salt: &str,
    ) -> Result<SessionClaims, AuthenticationError> {
        let claims = self.token_codec.decode(token, current_salt)?;

        if claims.salt != current_salt {
            return Err(AuthenticationError::SaltMismatch);
        }

        Ok(claims)
    }
}
