use std::sync::Arc;

use async_trait::async_trait;

use crate::identity::models::AuthenticatedIdentity;
use crate::product::errors::ProductError;
use crate::product::models::CreateProductCommand;
use crate::product::models::NewProduct;
use crate::product::models::Product;
use crate::product::models::ProductId;
use crate::product::models::UpdateProductCommand;
use crate::product::ports::ProductRepository;
use crate::product::ports::ProductServicePort;
use crate::vendor::models::VendorId;
use crate::vendor::ports::VendorRepository;
use crate::vendor::resolver::IdentityResolver;

/// Domain service implementation for product operations.
pub struct ProductService<PR, VR>
where
    PR: ProductRepository,
    VR: VendorRepository,
{
    repository: Arc<PR>,
    vendors: Arc<VR>,
    resolver: IdentityResolver<VR>,
}

impl<PR, VR> ProductService<PR, VR>
where
    PR: ProductRepository,
    VR: VendorRepository,
{
    /// Create a new product service.
    ///
    /// # Arguments
    /// * `repository` - Product persistence implementation
    /// * `vendors` - Vendor lookup, used for ownership checks
    pub fn new(repository: Arc<PR>, vendors: Arc<VR>) -> Self {
        Self {
            repository,
            resolver: IdentityResolver::new(Arc::clone(&vendors)),
            vendors,
        }
    }
}

#[async_trait]
impl<PR, VR> ProductServicePort for ProductService<PR, VR>
where
    PR: ProductRepository,
    VR: VendorRepository,
{
    async fn list_products(
        &self,
        vendor_id: Option<VendorId>,
    ) -> Result<Vec<Product>, ProductError> {
        self.repository.list(vendor_id).await
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, ProductError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id.0))
    }

    async fn create_product(
        &self,
        identity: &AuthenticatedIdentity,
        command: CreateProductCommand,
    ) -> Result<Product, ProductError> {
        let vendor = match self.resolver.resolve_vendor_for(identity).await? {
            Some(vendor) => vendor,
            None => {
                tracing::warn!(identity_id = %identity.id, "Product rejected: caller is not a vendor");
                return Err(ProductError::NotAVendor);
            }
        };

        let product = self
            .repository
            .create(NewProduct::for_vendor(command, vendor.id))
            .await?;

        tracing::info!(product_id = %product.id, vendor_id = %vendor.id, "Product created");
        Ok(product)
    }

    async fn update_product(
        &self,
        id: ProductId,
        command: UpdateProductCommand,
    ) -> Result<Product, ProductError> {
        let mut product = self.get_product(id).await?;

        if let Some(vendor_id) = command.vendor_id {
            if self.vendors.find_by_id(vendor_id).await?.is_none() {
                return Err(ProductError::VendorNotFound(vendor_id.0));
            }
        }

        product.apply(command);
        self.repository.update(product).await
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), ProductError> {
        self.repository.delete(id).await?;
        tracing::info!(product_id = %id, "Product deleted");
        Ok(())
    }
}
