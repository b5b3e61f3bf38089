use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::VendorData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::vendor::errors::VendorError;
use crate::vendor::models::UpdateVendorCommand;
use crate::vendor::models::VendorContact;
use crate::vendor::models::VendorId;
use crate::vendor::models::VendorName;

pub async fn update_vendor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateVendorRequest>,
) -> Result<ApiSuccess<VendorData>, ApiError> {
    state
        .vendor_service
        .update_vendor(VendorId(id), body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|vendor| ApiSuccess::new(StatusCode::OK, vendor.into()))
}

/// HTTP request body for updating a vendor; absent fields stay unchanged
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateVendorRequest {
    name: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    phone_number: Option<String>,
}

impl UpdateVendorRequest {
    fn try_into_command(self) -> Result<UpdateVendorCommand, VendorError> {
        Ok(UpdateVendorCommand {
            name: self.name.map(VendorName::new).transpose()?,
            contact: VendorContact::new(
                self.first_name,
                self.last_name,
                self.email,
                self.phone_number,
            )?,
        })
    }
}
