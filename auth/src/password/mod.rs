pub mod bcrypt;
pub mod errors;
pub mod salt;

pub use self::bcrypt::PasswordHasher;
pub use errors::PasswordError;
pub use salt::generate_session_salt;
