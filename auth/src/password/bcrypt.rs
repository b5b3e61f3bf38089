use super::errors::PasswordError;

/// Bcrypt only reads this many bytes of a password; the rest is dropped
/// before hashing and before verification alike.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Work factor used outside of tests.
pub const DEFAULT_COST: u32 = 12;

/// Password hashing implementation.
///
/// Provides one-way salted password hashing (internally uses bcrypt).
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Create a new password hasher with the production work factor.
    ///
    /// # Returns
    /// PasswordHasher instance with cost 12
    pub fn new() -> Self {
        Self { cost: DEFAULT_COST }
    }

    /// Create a password hasher with an explicit work factor.
    ///
    /// # Arguments
    /// * `cost` - Bcrypt cost, between 4 and 31
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password.
    ///
    /// A fresh per-password salt is generated by bcrypt and embedded in the output.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Modular crypt string (`$2b$<cost>$<salt><hash>`)
    ///
    /// # Errors
    /// * `HashingFailed` - Cost out of range or hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        bcrypt::hash(truncated(password), self.cost)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Uses the cost and salt embedded in `hash`; comparison is constant time.
    /// A malformed hash is reported as a mismatch, never as an error.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored modular crypt string
    ///
    /// # Returns
    /// True if password matches, false otherwise
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        match bcrypt::verify(truncated(password), hash) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::debug!(error = %e, "Stored password hash could not be checked");
                false
            }
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

fn truncated(password: &str) -> &[u8] {
    let bytes = password.as_bytes();
    &bytes[..bytes.len().min(MAX_PASSWORD_BYTES)]
}
