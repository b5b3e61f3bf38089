use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::positive_vendor_id;
use super::ProductData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> Result<ApiSuccess<Vec<ProductData>>, ApiError> {
    let vendor_id = positive_vendor_id(query.vendor_id)?;

    state
        .product_service
        .list_products(vendor_id)
        .await
        .map_err(ApiError::from)
        .map(|products| {
            ApiSuccess::new(
                StatusCode::OK,
                products.into_iter().map(ProductData::from).collect(),
            )
        })
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListProductsQuery {
    vendor_id: Option<i64>,
}
