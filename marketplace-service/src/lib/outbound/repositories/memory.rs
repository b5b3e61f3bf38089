//! In-memory adapters for the repository ports.
//!
//! Used by tests and by local runs without a database. They keep the
//! constraints the Postgres schema enforces: case-insensitive unique identity
//! emails, unique SKUs, and products disappearing with their vendor.

use std::collections::BTreeMap;
use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::identity::errors::AuthError;
use crate::identity::models::Identity;
use crate::identity::models::IdentityId;
use crate::identity::models::NewIdentity;
use crate::identity::models::SessionSalt;
use crate::identity::ports::IdentityRepository;
use crate::product::errors::ProductError;
use crate::product::models::NewProduct;
use crate::product::models::Product;
use crate::product::models::ProductId;
use crate::product::ports::ProductRepository;
use crate::vendor::errors::VendorError;
use crate::vendor::models::CreateVendorCommand;
use crate::vendor::models::Vendor;
use crate::vendor::models::VendorId;
use crate::vendor::ports::VendorRepository;

/// Sequence mimicking a `BIGSERIAL` column.
#[derive(Debug)]
struct Sequence(AtomicI64);

impl Sequence {
    fn new() -> Self {
        Self(AtomicI64::new(1))
    }

    fn next(&self) -> i64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}

#[derive(Debug)]
pub struct InMemoryIdentityRepository {
    identities: RwLock<BTreeMap<IdentityId, Identity>>,
    ids: Sequence,
}

impl InMemoryIdentityRepository {
    pub fn new() -> Self {
        Self {
            identities: RwLock::new(BTreeMap::new()),
            ids: Sequence::new(),
        }
    }
}

impl Default for InMemoryIdentityRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityRepository for InMemoryIdentityRepository {
    async fn create(&self, identity: NewIdentity) -> Result<Identity, AuthError> {
        let mut identities = self.identities.write().await;

        if identities
            .values()
            .any(|existing| existing.email.eq_ignore_case(identity.email.as_str()))
        {
            return Err(AuthError::EmailAlreadyExists(identity.email.to_string()));
        }

        let created = Identity {
            id: IdentityId(self.ids.next()),
            email: identity.email,
            password_hash: identity.password_hash,
            session_salt: None,
            status: identity.status,
            active: identity.active,
            created_at: Utc::now(),
        };
        identities.insert(created.id, created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: IdentityId) -> Result<Option<Identity>, AuthError> {
        Ok(self.identities.read().await.get(&id).cloned())
    }

    async fn find_by_email_ci(&self, email: &str) -> Result<Option<Identity>, AuthError> {
        Ok(self
            .identities
            .read()
            .await
            .values()
            .find(|identity| identity.email.eq_ignore_case(email))
            .cloned())
    }

    async fn rotate_salt(&self, id: IdentityId, salt: &SessionSalt) -> Result<(), AuthError> {
        let mut identities = self.identities.write().await;
        let stored = identities.get_mut(&id).ok_or(AuthError::UserNotFound)?;
        stored.rotate_session(salt.clone());
        Ok(())
    }

    async fn set_active(&self, id: IdentityId, active: bool) -> Result<(), AuthError> {
        let mut identities = self.identities.write().await;
        let stored = identities.get_mut(&id).ok_or(AuthError::UserNotFound)?;
        stored.active = active;
        Ok(())
    }
}

#[derive(Debug)]
pub struct InMemoryVendorRepository {
    vendors: RwLock<BTreeMap<VendorId, Vendor>>,
    ids: Sequence,
}

impl InMemoryVendorRepository {
    pub fn new() -> Self {
        Self {
            vendors: RwLock::new(BTreeMap::new()),
            ids: Sequence::new(),
        }
    }
}

impl Default for InMemoryVendorRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VendorRepository for InMemoryVendorRepository {
    async fn create(&self, command: CreateVendorCommand) -> Result<Vendor, VendorError> {
        let contact = command.contact;
        let vendor = Vendor {
            id: VendorId(self.ids.next()),
            name: command.name,
            first_name: contact.first_name,
            last_name: contact.last_name,
            email: contact.email,
            phone_number: contact.phone_number,
            created_at: Utc::now(),
        };
        self.vendors.write().await.insert(vendor.id, vendor.clone());

        Ok(vendor)
    }

    async fn find_by_id(&self, id: VendorId) -> Result<Option<Vendor>, VendorError> {
        Ok(self.vendors.read().await.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Vendor>, VendorError> {
        Ok(self.vendors.read().await.values().rev().cloned().collect())
    }

    async fn find_by_email_ci(&self, email: &str) -> Result<Option<Vendor>, VendorError> {
        Ok(self
            .vendors
            .read()
            .await
            .values()
            .find(|vendor| {
                vendor
                    .email
                    .as_ref()
                    .map_or(false, |vendor_email| vendor_email.eq_ignore_case(email))
            })
            .cloned())
    }

    async fn update(&self, vendor: Vendor) -> Result<Vendor, VendorError> {
        let mut vendors = self.vendors.write().await;
        let stored = vendors
            .get_mut(&vendor.id)
            .ok_or(VendorError::NotFound(vendor.id.0))?;
        *stored = vendor.clone();

        Ok(vendor)
    }

    async fn delete(&self, id: VendorId) -> Result<(), VendorError> {
        self.vendors
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(VendorError::NotFound(id.0))
    }
}

/// Products are stored without their vendor name; it is joined on read.
/// A product whose vendor is gone is treated as deleted.
#[derive(Debug)]
pub struct InMemoryProductRepository {
    products: RwLock<BTreeMap<ProductId, Product>>,
    vendors: Arc<InMemoryVendorRepository>,
    ids: Sequence,
}

impl InMemoryProductRepository {
    pub fn new(vendors: Arc<InMemoryVendorRepository>) -> Self {
        Self {
            products: RwLock::new(BTreeMap::new()),
            vendors,
            ids: Sequence::new(),
        }
    }

    async fn with_vendor(&self, mut product: Product) -> Result<Option<Product>, ProductError> {
        Ok(self
            .vendors
            .find_by_id(product.vendor_id)
            .await?
            .map(|vendor| {
                product.vendor_name = Some(vendor.name.to_string());
                product
            }))
    }

    async fn ensure_vendor(&self, vendor_id: VendorId) -> Result<(), ProductError> {
        match self.vendors.find_by_id(vendor_id).await? {
            Some(_) => Ok(()),
            None => Err(ProductError::VendorNotFound(vendor_id.0)),
        }
    }

    fn ensure_unique_sku(
        products: &BTreeMap<ProductId, Product>,
        product: &Product,
    ) -> Result<(), ProductError> {
        if let Some(sku) = &product.sku {
            let taken = products
                .values()
                .any(|other| other.id != product.id && other.sku.as_ref() == Some(sku));
            if taken {
                return Err(ProductError::SkuAlreadyExists(sku.to_string()));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: NewProduct) -> Result<Product, ProductError> {
        self.ensure_vendor(product.vendor_id).await?;

        let created = {
            let mut products = self.products.write().await;
            let created = Product {
                id: ProductId(self.ids.next()),
                name: product.name,
                sku: product.sku,
                description: product.description,
                price: product.price,
                vendor_id: product.vendor_id,
                vendor_name: None,
                created_at: Utc::now(),
            };
            Self::ensure_unique_sku(&products, &created)?;
            products.insert(created.id, created.clone());
            created
        };

        let id = created.id;
        self.with_vendor(created)
            .await?
            .ok_or(ProductError::NotFound(id.0))
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, ProductError> {
        let product = self.products.read().await.get(&id).cloned();
        match product {
            Some(product) => self.with_vendor(product).await,
            None => Ok(None),
        }
    }

    async fn list(&self, vendor_id: Option<VendorId>) -> Result<Vec<Product>, ProductError> {
        let candidates: Vec<Product> = self
            .products
            .read()
            .await
            .values()
            .rev()
            .filter(|product| vendor_id.map_or(true, |id| product.vendor_id == id))
            .cloned()
            .collect();

        let mut products = Vec::with_capacity(candidates.len());
        for product in candidates {
            if let Some(product) = self.with_vendor(product).await? {
                products.push(product);
            }
        }
        Ok(products)
    }

    async fn update(&self, product: Product) -> Result<Product, ProductError> {
        self.ensure_vendor(product.vendor_id).await?;

        {
            let mut products = self.products.write().await;
            if !products.contains_key(&product.id) {
                return Err(ProductError::NotFound(product.id.0));
            }
            Self::ensure_unique_sku(&products, &product)?;
            products.insert(product.id, product.clone());
        }

        let id = product.id;
        self.with_vendor(product)
            .await?
            .ok_or(ProductError::NotFound(id.0))
    }

    async fn delete(&self, id: ProductId) -> Result<(), ProductError> {
        if self.find_by_id(id).await?.is_none() {
            return Err(ProductError::NotFound(id.0));
        }
        self.products.write().await.remove(&id);
        Ok(())
    }
}
