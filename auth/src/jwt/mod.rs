pub mod claims;
pub mod codec;
pub mod errors;

pub use claims::PeekedClaims;
pub use claims::SessionClaims;
pub use claims::TokenKind;
pub use claims::TokenSubject;
pub use claims::DEFAULT_SOURCE;
pub use codec::TokenCodec;
pub use errors::JwtError;
