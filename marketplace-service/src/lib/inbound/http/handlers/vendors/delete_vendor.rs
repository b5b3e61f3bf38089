use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::vendor::models::VendorId;

pub async fn delete_vendor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiSuccess<()>, ApiError> {
    state
        .vendor_service
        .delete_vendor(VendorId(id))
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}
