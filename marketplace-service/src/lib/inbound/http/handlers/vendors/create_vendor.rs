use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::VendorData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::vendor::errors::VendorError;
use crate::vendor::models::CreateVendorCommand;
use crate::vendor::models::VendorContact;
use crate::vendor::models::VendorName;

pub async fn create_vendor(
    State(state): State<AppState>,
    Json(body): Json<CreateVendorRequest>,
) -> Result<ApiSuccess<VendorData>, ApiError> {
    state
        .vendor_service
        .create_vendor(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|vendor| ApiSuccess::new(StatusCode::CREATED, vendor.into()))
}

/// HTTP request body for creating a vendor (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateVendorRequest {
    name: String,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    phone_number: Option<String>,
}

impl CreateVendorRequest {
    fn try_into_command(self) -> Result<CreateVendorCommand, VendorError> {
        Ok(CreateVendorCommand {
            name: VendorName::new(self.name)?,
            contact: VendorContact::new(
                self.first_name,
                self.last_name,
                self.email,
                self.phone_number,
            )?,
        })
    }
}
