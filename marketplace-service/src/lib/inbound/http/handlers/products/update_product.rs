use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::positive_vendor_id;
use super::ProductData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::product::errors::ProductError;
use crate::product::models::Price;
use crate::product::models::ProductId;
use crate::product::models::ProductName;
use crate::product::models::Sku;
use crate::product::models::UpdateProductCommand;

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateProductRequest>,
) -> Result<ApiSuccess<ProductData>, ApiError> {
    state
        .product_service
        .update_product(ProductId(id), body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|product| ApiSuccess::new(StatusCode::OK, product.into()))
}

/// HTTP request body for updating a product; absent fields stay unchanged
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateProductRequest {
    name: Option<String>,
    sku: Option<String>,
    description: Option<String>,
    price: Option<Decimal>,
    vendor_id: Option<i64>,
}

impl UpdateProductRequest {
    fn try_into_command(self) -> Result<UpdateProductCommand, ApiError> {
        Ok(UpdateProductCommand {
            name: self
                .name
                .map(ProductName::new)
                .transpose()
                .map_err(ProductError::from)?,
            sku: self
                .sku
                .map(Sku::new)
                .transpose()
                .map_err(ProductError::from)?,
            description: self.description,
            price: self
                .price
                .map(Price::new)
                .transpose()
                .map_err(ProductError::from)?,
            vendor_id: positive_vendor_id(self.vendor_id)?,
        })
    }
}
