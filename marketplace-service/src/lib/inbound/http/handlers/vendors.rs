pub mod create_vendor;
pub mod delete_vendor;
pub mod get_vendor;
pub mod list_vendors;
pub mod update_vendor;

pub use create_vendor::create_vendor;
pub use delete_vendor::delete_vendor;
pub use get_vendor::get_vendor;
pub use list_vendors::list_vendors;
pub use update_vendor::update_vendor;

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::vendor::models::Vendor;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VendorData {
    pub id: i64,
    pub name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Vendor> for VendorData {
    fn from(vendor: Vendor) -> Self {
        Self {
            id: vendor.id.0,
            name: vendor.name.to_string(),
            first_name: vendor.first_name,
            last_name: vendor.last_name,
            email: vendor.email.map(|email| email.to_string()),
            phone_number: vendor.phone_number,
            created_at: vendor.created_at,
        }
    }
}
