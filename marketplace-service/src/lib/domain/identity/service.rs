use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::PeekedClaims;
use auth::TokenKind;

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
use crate::identity::models::VerifiedPayload;
use crate::identity::models::TOKEN_TYPE;
use crate::identity::ports::IdentityRepository;
use crate::identity::ports::SessionServicePort;

const BEARER_PREFIX: &str = "Bearer ";

/// Domain service implementation for session operations.
///
/// A token is accepted only while the salt it embeds is the identity's
/// current salt. Logins rotate the salt with a plain write, so two logins
/// racing for the same identity resolve last-write-wins: whichever rotation
/// the store commits last decides which token pair stays valid. Salt and
/// active flag are written separately and never clobber each other.
pub struct SessionService<IR>
where
    IR: IdentityRepository,
{
    repository: Arc<IR>,
    authenticator: Arc<Authenticator>,
}

impl<IR> SessionService<IR>
where
    IR: IdentityRepository,
{
    /// Create a new session service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Identity persistence implementation
    /// * `authenticator` - Password and token primitives
    ///
    /// # Returns
    /// Configured session service instance
    pub fn new(repository: Arc<IR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    fn peek(&self, token: &str) -> Option<PeekedClaims> {
        self.authenticator.peek(token).ok()
    }

    async fn find_subject(&self, claims: &PeekedClaims) -> Result<Option<Identity>, AuthError> {
        match subject_id(claims) {
            Some(id) => self.repository.find_by_id(id).await,
            None => Ok(None),
        }
    }

    /// Signature, expiry and session check against the identity's current salt.
    /// An identity that never logged in has no salt and accepts nothing.
    fn token_matches_session(&self, token: &str, identity: &Identity) -> bool {
        match &identity.session_salt {
            Some(salt) => self
                .authenticator
                .validate_token(token, salt.as_str())
                .is_ok(),
            None => false,
        }
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Identity, AuthError> {
        self.repository
            .find_by_email_ci(email.as_str())
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}

/// Subject id carried by a token; zero counts as absent.
fn subject_id(claims: &PeekedClaims) -> Option<IdentityId> {
    claims.user_id.filter(|id| *id != 0).map(IdentityId)
}

#[async_trait]
impl<IR> SessionServicePort for SessionService<IR>
where
    IR: IdentityRepository,
{
    async fn login(&self, command: LoginCommand) -> Result<IssuedSession, AuthError> {
        let identity = self
            .repository
            .find_by_email_ci(command.email.as_str())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !identity.active {
            tracing::warn!(identity_id = %identity.id, "Login rejected: account disabled");
            return Err(AuthError::AccountDisabled);
        }

        if !identity.is_verified() {
            tracing::warn!(identity_id = %identity.id, "Login rejected: account not verified");
            return Err(AuthError::AccountNotVerified);
        }

        if !self
            .authenticator
            .verify_password(&command.password, &identity.password_hash)
        {
            tracing::warn!(identity_id = %identity.id, "Login rejected: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let salt = SessionSalt::new(self.authenticator.new_session_salt());
        self.repository.rotate_salt(identity.id, &salt).await?;

        let tokens = self
            .authenticator
            .issue_session(&identity.token_subject(), salt.as_str())?;

        tracing::info!(identity_id = %identity.id, "Session opened");

        Ok(IssuedSession {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: TOKEN_TYPE,
            expires_in: self.authenticator.access_token_ttl_secs(),
            user: AuthenticatedIdentity::from(&identity),
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<RefreshedAccess, AuthError> {
        let claims = self.peek(refresh_token).ok_or(AuthError::InvalidToken)?;

        if !claims.is_kind(TokenKind::Refresh) {
            return Err(AuthError::InvalidTokenType);
        }

        let id = subject_id(&claims).ok_or_else(|| AuthError::unauthorized("Invalid token payload"))?;
        let identity = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !identity.active {
            return Err(AuthError::AccountDisabled);
        }

        let salt = match &identity.session_salt {
            Some(salt) if self.token_matches_session(refresh_token, &identity) => salt,
            _ => {
                tracing::warn!(identity_id = %identity.id, "Refresh rejected: stale or expired token");
                return Err(AuthError::InvalidOrExpiredToken);
            }
        };

        let subject = identity
            .token_subject()
            .with_source(claims.source_or_default());
        let access_token = self
            .authenticator
            .issue_access_token(&subject, salt.as_str())?;

        Ok(RefreshedAccess {
            access_token,
            token_type: TOKEN_TYPE,
            expires_in: self.authenticator.access_token_ttl_secs(),
        })
    }

    async fn verify(&self, token: &str) -> TokenVerification {
        let Some(claims) = self.peek(token) else {
            return TokenVerification::invalid();
        };

        if !claims.is_kind(TokenKind::Access) {
            return TokenVerification::invalid();
        }

        let identity = match self.find_subject(&claims).await {
            Ok(Some(identity)) => identity,
            Ok(None) => return TokenVerification::invalid(),
            Err(e) => {
                tracing::error!("Token verification lookup failed: {}", e);
                return TokenVerification::invalid();
            }
        };

        if !identity.active || !self.token_matches_session(token, &identity) {
            return TokenVerification::invalid();
        }

        let payload = VerifiedPayload {
            sub: claims.sub.clone().unwrap_or_default(),
            user_id: identity.id.0,
            source: claims.source_or_default().to_string(),
        };

        TokenVerification::valid(AuthenticatedIdentity::from(&identity), payload)
    }

    async fn current_user(
        &self,
        authorization: Option<&str>,
    ) -> Result<AuthenticatedIdentity, AuthError> {
        let token = authorization
            .and_then(|header| header.strip_prefix(BEARER_PREFIX))
            .ok_or_else(|| AuthError::unauthorized("Missing or invalid authorization header"))?
            .trim();

        if token.is_empty() {
            return Err(AuthError::unauthorized("Missing token"));
        }

        let claims = self
            .peek(token)
            .ok_or_else(|| AuthError::unauthorized("Invalid token"))?;

        if !claims.is_kind(TokenKind::Access) {
            return Err(AuthError::unauthorized("Invalid token type"));
        }

        if subject_id(&claims).is_none() {
            return Err(AuthError::unauthorized("Invalid token payload"));
        }

        let identity = self
            .find_subject(&claims)
            .await?
            .ok_or_else(|| AuthError::unauthorized("User not found"))?;

        if !identity.active {
            return Err(AuthError::forbidden("Account is disabled"));
        }

        if !self.token_matches_session(token, &identity) {
            tracing::warn!(identity_id = %identity.id, "Bearer token rejected");
            return Err(AuthError::unauthorized("Invalid token"));
        }

        Ok(AuthenticatedIdentity::from(&identity))
    }

    async fn provision_identity(
        &self,
        command: ProvisionIdentityCommand,
    ) -> Result<AuthenticatedIdentity, AuthError> {
        let email = command.email.normalized();

        if self
            .repository
            .find_by_email_ci(email.as_str())
            .await?
            .is_some()
        {
            return Err(AuthError::EmailAlreadyExists(email.to_string()));
        }

        let password_hash = self.authenticator.hash_password(&command.password)?;

        let identity = self
            .repository
            .create(NewIdentity {
                email,
                password_hash,
                status: command.status,
                active: true,
            })
            .await?;

        tracing::info!(identity_id = %identity.id, "Identity provisioned");

        Ok(AuthenticatedIdentity::from(&identity))
    }

    async fn set_active(&self, email: &EmailAddress, active: bool) -> Result<(), AuthError> {
        let identity = self.find_by_email(email).await?;
        self.repository.set_active(identity.id, active).await?;

        tracing::info!(identity_id = %identity.id, active, "Identity switched");
        Ok(())
    }

    async fn revoke_sessions(&self, email: &EmailAddress) -> Result<(), AuthError> {
        let identity = self.find_by_email(email).await?;
        let salt = SessionSalt::new(self.authenticator.new_session_salt());
        self.repository.rotate_salt(identity.id, &salt).await?;

        tracing::info!(identity_id = %identity.id, "Sessions revoked");
        Ok(())
    }
}
