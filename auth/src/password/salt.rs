use rand::rngs::OsRng;
use rand::RngCore;

/// Entropy carried by a session salt.
pub const SESSION_SALT_BYTES: usize = 16;

/// Generate a fresh session salt.
///
/// Not to be confused with the per-password salt embedded by bcrypt: this
/// value is mixed into token signing keys and replaced on every login.
///
/// # Returns
/// 32 lowercase hex characters drawn from the operating system CSPRNG
pub fn generate_session_salt() -> String {
    let mut bytes = [0u8; SESSION_SALT_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
