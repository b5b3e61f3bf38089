use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::product::errors::ProductError;
use crate::product::models::NewProduct;
use crate::product::models::Price;
use crate::product::models::Product;
use crate::product::models::ProductId;
use crate::product::models::ProductName;
use crate::product::models::Sku;
use crate::product::ports::ProductRepository;
use crate::vendor::models::VendorId;

/// Joins the owning vendor's name onto a product row set named `p`.
const SELECT_PRODUCT: &str = r#"
    SELECT p.id, p.name, p.sku, p.description, p.price, p.vendor_id,
           v.name AS vendor_name, p.created_at
    FROM p
    LEFT JOIN vendors v ON v.id = p.vendor_id
"#;

const PRODUCT_COLUMNS: &str = "id, name, sku, description, price, vendor_id, created_at";

#[derive(FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    sku: Option<String>,
    description: Option<String>,
    price: Decimal,
    vendor_id: i64,
    vendor_name: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = ProductError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let id = row.id;
        Ok(Product {
            id: ProductId(id),
            name: ProductName::new(row.name).map_err(|e| malformed_row(id, e))?,
            sku: row
                .sku
                .map(Sku::new)
                .transpose()
                .map_err(|e| malformed_row(id, e))?,
            description: row.description,
            price: Price::new(row.price).map_err(|e| malformed_row(id, e))?,
            vendor_id: VendorId(row.vendor_id),
            vendor_name: row.vendor_name,
            created_at: row.created_at,
        })
    }
}

fn malformed_row(id: i64, e: impl std::fmt::Display) -> ProductError {
    tracing::error!(product_id = id, "Malformed product row: {}", e);
    ProductError::DatabaseError(format!("Product {} has a malformed column: {}", id, e))
}

fn database_error(e: sqlx::Error) -> ProductError {
    tracing::error!("Product store failure: {}", e);
    ProductError::DatabaseError(e.to_string())
}

/// Map constraint violations of a write to domain errors.
fn write_error(e: sqlx::Error, sku: Option<&Sku>, vendor_id: VendorId) -> ProductError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            let sku = sku.map(Sku::to_string).unwrap_or_default();
            return ProductError::SkuAlreadyExists(sku);
        }
        if db_err.is_foreign_key_violation() {
            return ProductError::VendorNotFound(vendor_id.0);
        }
    }
    database_error(e)
}

pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn create(&self, product: NewProduct) -> Result<Product, ProductError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            WITH p AS (
                INSERT INTO products (name, sku, description, price, vendor_id)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING {PRODUCT_COLUMNS}
            )
            {SELECT_PRODUCT}
            "#
        ))
        .bind(product.name.as_str())
        .bind(product.sku.as_ref().map(Sku::as_str))
        .bind(product.description.as_deref())
        .bind(product.price.amount())
        .bind(product.vendor_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, product.sku.as_ref(), product.vendor_id))?;

        row.try_into()
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, ProductError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            WITH p AS (SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1)
            {SELECT_PRODUCT}
            "#
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Product::try_from).transpose()
    }

    async fn list(&self, vendor_id: Option<VendorId>) -> Result<Vec<Product>, ProductError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            WITH p AS (
                SELECT {PRODUCT_COLUMNS} FROM products
                WHERE $1::BIGINT IS NULL OR vendor_id = $1
            )
            {SELECT_PRODUCT}
            ORDER BY p.created_at DESC, p.id DESC
            "#
        ))
        .bind(vendor_id.map(|id| id.0))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(Product::try_from).collect()
    }

    async fn update(&self, product: Product) -> Result<Product, ProductError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            WITH p AS (
                UPDATE products
                SET name = $2, sku = $3, description = $4, price = $5, vendor_id = $6
                WHERE id = $1
                RETURNING {PRODUCT_COLUMNS}
            )
            {SELECT_PRODUCT}
            "#
        ))
        .bind(product.id.0)
        .bind(product.name.as_str())
        .bind(product.sku.as_ref().map(Sku::as_str))
        .bind(product.description.as_deref())
        .bind(product.price.amount())
        .bind(product.vendor_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error(e, product.sku.as_ref(), product.vendor_id))?;

        row.ok_or(ProductError::NotFound(product.id.0))?.try_into()
    }

    async fn delete(&self, id: ProductId) -> Result<(), ProductError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(ProductError::NotFound(id.0));
        }

        Ok(())
    }
}
