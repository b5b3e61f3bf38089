pub mod create_product;
pub mod delete_product;
pub mod get_product;
pub mod list_products;
pub mod update_product;

pub use create_product::create_product;
pub use delete_product::delete_product;
pub use get_product::get_product;
pub use list_products::list_products;
pub use update_product::update_product;

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;

use super::ApiError;
use crate::product::models::Product;
use crate::vendor::models::VendorId;

/// Vendor ids supplied by clients must be positive.
fn positive_vendor_id(vendor_id: Option<i64>) -> Result<Option<VendorId>, ApiError> {
    match vendor_id {
        Some(id) if id <= 0 => Err(ApiError::UnprocessableEntity(
            "vendor_id must be greater than 0".to_string(),
        )),
        other => Ok(other.map(VendorId)),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductData {
    pub id: i64,
    pub name: String,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub price: Decimal,
    pub vendor_id: i64,
    pub vendor_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Product> for ProductData {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.0,
            name: product.name.to_string(),
            sku: product.sku.map(|sku| sku.to_string()),
            description: product.description,
            price: product.price.amount(),
            vendor_id: product.vendor_id.0,
            vendor_name: product.vendor_name,
            created_at: product.created_at,
        }
    }
}
