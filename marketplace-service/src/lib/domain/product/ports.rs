use async_trait::async_trait;

use crate::identity::models::AuthenticatedIdentity;
use crate::product::errors::ProductError;
use crate::product::models::CreateProductCommand;
use crate::product::models::NewProduct;
use crate::product::models::Product;
use crate::product::models::ProductId;
use crate::product::models::UpdateProductCommand;
use crate::vendor::models::VendorId;

/// Port for product domain service operations.
#[async_trait]
pub trait ProductServicePort: Send + Sync + 'static {
    /// Products newest first, optionally restricted to one vendor.
    async fn list_products(&self, vendor_id: Option<VendorId>)
        -> Result<Vec<Product>, ProductError>;

    /// Retrieve product by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Product does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_product(&self, id: ProductId) -> Result<Product, ProductError>;

    /// Create a product owned by the vendor the identity resolves to.
    ///
    /// # Arguments
    /// * `identity` - Caller resolved from the bearer token
    /// * `command` - Validated product fields
    ///
    /// # Errors
    /// * `NotAVendor` - No vendor shares the identity's email
    /// * `SkuAlreadyExists` - SKU is taken
    /// * `DatabaseError` - Database operation failed
    async fn create_product(
        &self,
        identity: &AuthenticatedIdentity,
        command: CreateProductCommand,
    ) -> Result<Product, ProductError>;

    /// Update existing product with optional fields.
    ///
    /// # Errors
    /// * `NotFound` - Product does not exist
    /// * `VendorNotFound` - New vendor id does not exist
    /// * `SkuAlreadyExists` - New SKU is taken
    /// * `DatabaseError` - Database operation failed
    async fn update_product(
        &self,
        id: ProductId,
        command: UpdateProductCommand,
    ) -> Result<Product, ProductError>;

    /// # Errors
    /// * `NotFound` - Product does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_product(&self, id: ProductId) -> Result<(), ProductError>;
}

/// Persistence operations for product aggregate.
#[async_trait]
pub trait ProductRepository: Send + Sync + 'static {
    /// Persist new product to storage.
    ///
    /// # Errors
    /// * `SkuAlreadyExists` - SKU is taken
    /// * `VendorNotFound` - Vendor vanished before the insert
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, product: NewProduct) -> Result<Product, ProductError>;

    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, ProductError>;

    /// Retrieve products newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list(&self, vendor_id: Option<VendorId>) -> Result<Vec<Product>, ProductError>;

    /// Write back every field of a product.
    ///
    /// # Errors
    /// * `NotFound` - Product does not exist
    /// * `SkuAlreadyExists` - SKU is taken
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, product: Product) -> Result<Product, ProductError>;

    /// # Errors
    /// * `NotFound` - Product does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: ProductId) -> Result<(), ProductError>;
}
