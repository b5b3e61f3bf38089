use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::ProductData;
use crate::identity::models::AuthenticatedIdentity;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::product::errors::ProductError;
use crate::product::models::CreateProductCommand;
use crate::product::models::Price;
use crate::product::models::ProductName;
use crate::product::models::Sku;

/// Requires the bearer middleware, which supplies the caller's identity.
pub async fn create_product(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedIdentity>,
    Json(body): Json<CreateProductRequest>,
) -> Result<ApiSuccess<ProductData>, ApiError> {
    state
        .product_service
        .create_product(&identity, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|product| ApiSuccess::new(StatusCode::CREATED, product.into()))
}

/// HTTP request body for creating a product; the vendor comes from the caller
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateProductRequest {
    name: String,
    sku: Option<String>,
    description: Option<String>,
    price: Decimal,
}

impl CreateProductRequest {
    fn try_into_command(self) -> Result<CreateProductCommand, ProductError> {
        Ok(CreateProductCommand {
            name: ProductName::new(self.name)?,
            sku: self.sku.map(Sku::new).transpose()?,
            description: self.description,
            price: Price::new(self.price)?,
        })
    }
}
