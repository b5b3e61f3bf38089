use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ProductData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::product::models::ProductId;

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiSuccess<ProductData>, ApiError> {
    state
        .product_service
        .get_product(ProductId(id))
        .await
        .map_err(ApiError::from)
        .map(|product| ApiSuccess::new(StatusCode::OK, product.into()))
}
