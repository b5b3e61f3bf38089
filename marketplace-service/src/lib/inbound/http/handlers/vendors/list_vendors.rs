use axum::extract::State;
use axum::http::StatusCode;

use super::VendorData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_vendors(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<VendorData>>, ApiError> {
    state
        .vendor_service
        .list_vendors()
        .await
        .map_err(ApiError::from)
        .map(|vendors| {
            ApiSuccess::new(
                StatusCode::OK,
                vendors.into_iter().map(VendorData::from).collect(),
            )
        })
}
