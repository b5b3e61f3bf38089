use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::identity::models::RefreshedAccess;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> Result<ApiSuccess<RefreshResponseData>, ApiError> {
    if body.refresh_token.is_empty() {
        return Err(ApiError::BadRequest("Refresh token is required".to_string()));
    }

    state
        .session_service
        .refresh(&body.refresh_token)
        .await
        .map_err(ApiError::from)
        .map(|access| ApiSuccess::new(StatusCode::OK, access.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RefreshRequest {
    refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshResponseData {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl From<RefreshedAccess> for RefreshResponseData {
    fn from(access: RefreshedAccess) -> Self {
        Self {
            access_token: access.access_token,
            token_type: access.token_type.to_string(),
            expires_in: access.expires_in,
        }
    }
}
