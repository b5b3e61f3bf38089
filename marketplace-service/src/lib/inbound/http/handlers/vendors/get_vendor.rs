use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::VendorData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::vendor::models::VendorId;

pub async fn get_vendor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiSuccess<VendorData>, ApiError> {
    state
        .vendor_service
        .get_vendor(VendorId(id))
        .await
        .map_err(ApiError::from)
        .map(|vendor| ApiSuccess::new(StatusCode::OK, vendor.into()))
}
