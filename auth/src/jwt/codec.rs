use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::PeekedClaims;
use super::claims::SessionClaims;
use super::errors::JwtError;

/// Session token codec.
///
/// Signs with HS256 under the key `secret + salt`, where `salt` is the session
/// salt carried by the token. Forgetting a salt therefore invalidates every
/// token minted under it.
pub struct TokenCodec {
    secret: String,
    algorithm: Algorithm,
}

impl TokenCodec {
    /// Create a new codec with the static server secret.
    ///
    /// # Arguments
    /// * `secret` - Server secret; the session salt is appended to it per token
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            algorithm: Algorithm::HS256,
        }
    }

    /// Plain string concatenation, not an HMAC chain.
    fn signing_key(&self, salt: &str) -> Vec<u8> {
        let mut key = Vec::with_capacity(self.secret.len() + salt.len());
        key.extend_from_slice(self.secret.as_bytes());
        key.extend_from_slice(salt.as_bytes());
        key
    }

    /// Encode claims into a signed token.
    ///
    /// # Arguments
    /// * `claims` - Claims to encode; their `salt` selects the signing key
    ///
    /// # Returns
    /// Compact JWT string
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &SessionClaims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);
        let key = EncodingKey::from_secret(&self.signing_key(&claims.salt));

        encode(&header, claims, &key).map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a token against a session salt.
    ///
    /// # Arguments
    /// * `token` - JWT string to decode
    /// * `salt` - Salt to derive the verification key from
    ///
    /// # Returns
    /// Verified claims
    ///
    /// # Errors
    /// * `TokenExpired` - `exp` is in the past (no leeway)
    /// * `InvalidSignature` - Signed under another secret or salt
    /// * `DecodingFailed` - Token is malformed or misses required claims
    pub fn decode(&self, token: &str, salt: &str) -> Result<SessionClaims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let key = DecodingKey::from_secret(&self.signing_key(salt));
        let token_data =
            decode::<SessionClaims>(token, &key, &validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::DecodingFailed(e.to_string()),
            })?;

        Ok(token_data.claims)
    }

    /// Decode a token without checking signature or expiry.
    ///
    /// # Arguments
    /// * `token` - JWT string to inspect
    ///
    /// # Returns
    /// Claims as present in the token
    ///
    /// # Errors
    /// * `DecodingFailed` - Token format is invalid
    ///
    /// # Security Warning
    /// Only used to locate the subject before a salt-bound `decode`.
    /// Never trust claims from this method for authorization decisions.
    pub fn decode_unverified(&self, token: &str) -> Result<PeekedClaims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let token_data = decode::<PeekedClaims>(token, &DecodingKey::from_secret(&[]), &validation)
            .map_err(|e| JwtError::DecodingFailed(e.to_string()))?;

        Ok(token_data.claims)
    }
}
