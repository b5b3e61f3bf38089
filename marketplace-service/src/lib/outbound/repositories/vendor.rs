use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::identity::models::EmailAddress;
use crate::vendor::errors::VendorError;
use crate::vendor::models::CreateVendorCommand;
use crate::vendor::models::Vendor;
use crate::vendor::models::VendorId;
use crate::vendor::models::VendorName;
use crate::vendor::ports::VendorRepository;

const VENDOR_COLUMNS: &str = "id, name, first_name, last_name, email, phone_number, created_at";

#[derive(FromRow)]
struct VendorRow {
    id: i64,
    name: String,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    phone_number: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<VendorRow> for Vendor {
    type Error = VendorError;

    fn try_from(row: VendorRow) -> Result<Self, Self::Error> {
        let id = row.id;
        Ok(Vendor {
            id: VendorId(id),
            name: VendorName::new(row.name).map_err(|e| malformed_row(id, e))?,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row
                .email
                .map(EmailAddress::new)
                .transpose()
                .map_err(|e| malformed_row(id, e))?,
            phone_number: row.phone_number,
            created_at: row.created_at,
        })
    }
}

fn malformed_row(id: i64, e: impl std::fmt::Display) -> VendorError {
    tracing::error!(vendor_id = id, "Malformed vendor row: {}", e);
    VendorError::DatabaseError(format!("Vendor {} has a malformed column: {}", id, e))
}

fn database_error(e: sqlx::Error) -> VendorError {
    tracing::error!("Vendor store failure: {}", e);
    VendorError::DatabaseError(e.to_string())
}

fn into_vendors(rows: Vec<VendorRow>) -> Result<Vec<Vendor>, VendorError> {
    rows.into_iter().map(Vendor::try_from).collect()
}

pub struct PostgresVendorRepository {
    pool: PgPool,
}

impl PostgresVendorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VendorRepository for PostgresVendorRepository {
    async fn create(&self, command: CreateVendorCommand) -> Result<Vendor, VendorError> {
        let contact = command.contact;
        let row = sqlx::query_as::<_, VendorRow>(&format!(
            r#"
            INSERT INTO vendors (name, first_name, last_name, email, phone_number)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {VENDOR_COLUMNS}
            "#
        ))
        .bind(command.name.as_str())
        .bind(contact.first_name)
        .bind(contact.last_name)
        .bind(contact.email.as_ref().map(EmailAddress::as_str))
        .bind(contact.phone_number)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        row.try_into()
    }

    async fn find_by_id(&self, id: VendorId) -> Result<Option<Vendor>, VendorError> {
        let row = sqlx::query_as::<_, VendorRow>(&format!(
            "SELECT {VENDOR_COLUMNS} FROM vendors WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Vendor::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Vendor>, VendorError> {
        let rows = sqlx::query_as::<_, VendorRow>(&format!(
            "SELECT {VENDOR_COLUMNS} FROM vendors ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        into_vendors(rows)
    }

    async fn find_by_email_ci(&self, email: &str) -> Result<Option<Vendor>, VendorError> {
        let row = sqlx::query_as::<_, VendorRow>(&format!(
            r#"
            SELECT {VENDOR_COLUMNS}
            FROM vendors
            WHERE LOWER(email) = LOWER($1)
            ORDER BY id
            LIMIT 1
            "#
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Vendor::try_from).transpose()
    }

    async fn update(&self, vendor: Vendor) -> Result<Vendor, VendorError> {
        let row = sqlx::query_as::<_, VendorRow>(&format!(
            r#"
            UPDATE vendors
            SET name = $2, first_name = $3, last_name = $4, email = $5, phone_number = $6
            WHERE id = $1
            RETURNING {VENDOR_COLUMNS}
            "#
        ))
        .bind(vendor.id.0)
        .bind(vendor.name.as_str())
        .bind(vendor.first_name.as_deref())
        .bind(vendor.last_name.as_deref())
        .bind(vendor.email.as_ref().map(EmailAddress::as_str))
        .bind(vendor.phone_number.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.ok_or(VendorError::NotFound(vendor.id.0))?.try_into()
    }

    async fn delete(&self, id: VendorId) -> Result<(), VendorError> {
        let result = sqlx::query("DELETE FROM vendors WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(VendorError::NotFound(id.0));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(email: Option<&str>) -> VendorRow {
        VendorRow {
            id: 3,
            name: "Acme".to_string(),
            first_name: None,
            last_name: None,
            email: email.map(str::to_string),
            phone_number: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_conversion() {
        let vendor = Vendor::try_from(row(Some("sales@acme.com"))).unwrap();

        assert_eq!(vendor.id, VendorId(3));
        assert_eq!(vendor.email.unwrap().as_str(), "sales@acme.com");
    }

    #[test]
    fn test_malformed_stored_email_is_a_store_fault() {
        let result = Vendor::try_from(row(Some("not-an-email")));

        assert!(matches!(result, Err(VendorError::DatabaseError(_))));
    }
}
