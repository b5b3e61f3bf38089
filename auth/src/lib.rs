//! Authentication utilities library
//!
//! Provides the session authentication primitives used by the marketplace service:
//! - Password hashing (bcrypt, 72-byte input limit)
//! - Session salt generation
//! - Salt-bound JWT token encoding and validation
//! - Token issuance coordination
//!
//! Storage is left to the service: it owns identity records and their current
//! session salt and hands the salt in on every call.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::with_cost(4);
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{Authenticator, PasswordHasher, TokenLifetimes, TokenSubject};
//!
//! let auth = Authenticator::new(
//!     "secret_key_at_least_32_bytes_long!",
//!     PasswordHasher::with_cost(4),
//!     TokenLifetimes::default(),
//! );
//!
//! // Login: rotate the salt, persist it, then mint both tokens under it
//! let salt = auth.new_session_salt();
//! let subject = TokenSubject::new("alice@example.com", 1);
//! let tokens = auth.issue_session(&subject, &salt).unwrap();
//!
//! // Later: peek for the subject, load its salt, then validate
//! let peeked = auth.peek(&tokens.access_token).unwrap();
//! assert_eq!(peeked.user_id, Some(1));
//! let claims = auth.validate_token(&tokens.access_token, &salt).unwrap();
//! assert_eq!(claims.sub, "alice@example.com");
//!
//! // A new login rotates the salt and the old tokens stop validating
//! let rotated = auth.new_session_salt();
//! assert!(auth.validate_token(&tokens.access_token, &rotated).is_err());
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::SessionTokens;
pub use authenticator::TokenLifetimes;
pub use jwt::JwtError;
pub use jwt::PeekedClaims;
pub use jwt::SessionClaims;
pub use jwt::TokenCodec;
pub use jwt::TokenKind;
pub use jwt::TokenSubject;
pub use password::generate_session_salt;
pub use password::PasswordError;
pub use password::PasswordHasher;
