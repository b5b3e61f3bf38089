pub mod login;
pub mod refresh;
pub mod verify;

pub use login::login;
pub use refresh::refresh;
pub use verify::verify;

use serde::Serialize;

use crate::identity::models::AuthenticatedIdentity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityData {
    pub id: i64,
    pub email: String,
}

impl From<AuthenticatedIdentity> for IdentityData {
    fn from(identity: AuthenticatedIdentity) -> Self {
        Self {
            id: identity.id.0,
            email: identity.email.to_string(),
        }
    }
}
