use async_trait::async_trait;

use crate::identity::errors::AuthError;
use crate::identity::models::AuthenticatedIdentity;
use crate::identity::models::EmailAddress;
use crate::identity::models::Identity;
use crate::identity::models::IdentityId;
use crate::identity::models::IssuedSession;
use crate::identity::models::LoginCommand;
use crate::identity::models::NewIdentity;
use crate::identity::models::ProvisionIdentityCommand;
use crate::identity::models::RefreshedAccess;
use crate::identity::models::SessionSalt;
use crate::identity::models::TokenVerification;

/// Port for session authentication operations.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Authenticate with email and password and open a new session.
    ///
    /// Every earlier session of the identity is revoked by the salt rotation.
    ///
    /// # Arguments
    /// * `command` - Validated email and raw password
    ///
    /// # Returns
    /// Access and refresh tokens plus the identity they were issued to
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `AccountDisabled` - Identity is switched off
    /// * `AccountNotVerified` - Status does not permit a login
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<IssuedSession, AuthError>;

    /// Exchange a refresh token for a new access token.
    ///
    /// # Arguments
    /// * `refresh_token` - Refresh token issued by `login`
    ///
    /// # Returns
    /// New access token in the same session
    ///
    /// # Errors
    /// * `InvalidToken` - Token cannot be decoded
    /// * `InvalidTokenType` - Token is not a refresh token
    /// * `Unauthorized` - Token carries no subject id
    /// * `UserNotFound` - Subject does not exist
    /// * `AccountDisabled` - Identity is switched off
    /// * `InvalidOrExpiredToken` - Signature, session or expiry check failed
    /// * `DatabaseError` - Database operation failed
    async fn refresh(&self, refresh_token: &str) -> Result<RefreshedAccess, AuthError>;

    /// Inspect an access token. Failures are reported as `valid == false`.
    async fn verify(&self, token: &str) -> TokenVerification;

    /// Resolve the identity behind a raw `Authorization` header.
    ///
    /// # Errors
    /// * `Unauthorized` - Header, token, or subject is unusable
    /// * `Forbidden` - Identity is switched off
    /// * `DatabaseError` - Database operation failed
    async fn current_user(
        &self,
        authorization: Option<&str>,
    ) -> Result<AuthenticatedIdentity, AuthError>;

    /// Create a new identity with a hashed password and no session.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is registered under any casing
    /// * `Password` - Hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn provision_identity(
        &self,
        command: ProvisionIdentityCommand,
    ) -> Result<AuthenticatedIdentity, AuthError>;

    /// Switch an identity on or off.
    ///
    /// # Errors
    /// * `UserNotFound` - No identity with this email
    /// * `DatabaseError` - Database operation failed
    async fn set_active(&self, email: &EmailAddress, active: bool) -> Result<(), AuthError>;

    /// Rotate the session salt without issuing tokens, revoking every session.
    ///
    /// # Errors
    /// * `UserNotFound` - No identity with this email
    /// * `DatabaseError` - Database operation failed
    async fn revoke_sessions(&self, email: &EmailAddress) -> Result<(), AuthError>;
}

/// Persistence operations for identity aggregate.
#[async_trait]
pub trait IdentityRepository: Send + Sync + 'static {
    /// Persist new identity to storage.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is registered under any casing
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, identity: NewIdentity) -> Result<Identity, AuthError>;

    /// Retrieve identity by identifier.
    ///
    /// # Returns
    /// Optional identity entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: IdentityId) -> Result<Option<Identity>, AuthError>;

    /// Retrieve identity by email, ignoring case.
    ///
    /// # Arguments
    /// * `email` - Email address string
    ///
    /// # Returns
    /// Optional identity entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email_ci(&self, email: &str) -> Result<Option<Identity>, AuthError>;

    /// Replace the session salt of an identity and nothing else.
    ///
    /// The write is durable when this returns.
    ///
    /// # Errors
    /// * `UserNotFound` - Identity does not exist
    /// * `DatabaseError` - Database operation failed
    async fn rotate_salt(&self, id: IdentityId, salt: &SessionSalt) -> Result<(), AuthError>;

    /// Switch an identity on or off, leaving its session untouched.
    ///
    /// # Errors
    /// * `UserNotFound` - Identity does not exist
    /// * `DatabaseError` - Database operation failed
    async fn set_active(&self, id: IdentityId, active: bool) -> Result<(), AuthError>;
}
