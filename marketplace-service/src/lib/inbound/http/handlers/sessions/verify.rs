use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::IdentityData;
use crate::identity::models::TokenVerification;
use crate::identity::models::VerifiedPayload;
use crate::inbound::http::handlers::object_or_empty;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn verify(
    State(state): State<AppState>,
    Json(body): Json<VerifyRequest>,
) -> Result<ApiSuccess<VerifyResponseData>, ApiError> {
    if body.token.is_empty() {
        return Err(ApiError::BadRequest("Token is required".to_string()));
    }

    let verification = state.session_service.verify(&body.token).await;
    Ok(ApiSuccess::new(StatusCode::OK, verification.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerifyRequest {
    token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayloadData {
    pub sub: String,
    pub user_id: i64,
    pub source: String,
}

impl From<VerifiedPayload> for PayloadData {
    fn from(payload: VerifiedPayload) -> Self {
        Self {
            sub: payload.sub,
            user_id: payload.user_id,
            source: payload.source,
        }
    }
}

/// Verification result; `user` and `payload` are `{}` when invalid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyResponseData {
    pub valid: bool,
    #[serde(serialize_with = "object_or_empty")]
    pub user: Option<IdentityData>,
    #[serde(serialize_with = "object_or_empty")]
    pub payload: Option<PayloadData>,
}

impl From<TokenVerification> for VerifyResponseData {
    fn from(verification: TokenVerification) -> Self {
        Self {
            valid: verification.valid,
            user: verification.user.map(IdentityData::from),
            payload: verification.payload.map(PayloadData::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::identity::models::AuthenticatedIdentity;
    use crate::identity::models::EmailAddress;
    use crate::identity::models::IdentityId;

    #[test]
    fn test_invalid_verification_serializes_empty_objects() {
        let data = VerifyResponseData::from(TokenVerification::invalid());

        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({ "valid": false, "user": {}, "payload": {} })
        );
    }

    #[test]
    fn test_valid_verification_serializes_claims() {
        let identity = AuthenticatedIdentity {
            id: IdentityId(3),
            email: EmailAddress::new("a@x.com".to_string()).unwrap(),
        };
        let payload = VerifiedPayload {
            sub: "a@x.com".to_string(),
            user_id: 3,
            source: "EMAIL".to_string(),
        };
        let data = VerifyResponseData::from(TokenVerification::valid(identity, payload));

        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({
                "valid": true,
                "user": { "id": 3, "email": "a@x.com" },
                "payload": { "sub": "a@x.com", "user_id": 3, "source": "EMAIL" }
            })
        );
    }
}
