use thiserror::Error;

use crate::vendor::errors::VendorError;

/// Error for ProductName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProductNameError {
    #[error("Product name must not be empty")]
    Empty,

    #[error("Product name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for Sku validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SkuError {
    #[error("SKU too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for Price validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PriceError {
    #[error("Price must not be negative")]
    Negative,

    #[error("Price allows at most {max} decimal places")]
    TooPrecise { max: u32 },

    #[error("Price exceeds the maximum of {max}")]
    TooLarge { max: &'static str },
}

/// Top-level error for product operations
#[derive(Debug, Clone, Error)]
pub enum ProductError {
    #[error("Invalid product name: {0}")]
    InvalidName(#[from] ProductNameError),

    #[error("Invalid SKU: {0}")]
    InvalidSku(#[from] SkuError),

    #[error("Invalid price: {0}")]
    InvalidPrice(#[from] PriceError),

    #[error("Product not found")]
    NotFound(i64),

    #[error("Vendor not found")]
    VendorNotFound(i64),

    #[error("Only vendor accounts can add products. No vendor found with your email.")]
    NotAVendor,

    #[error("SKU already exists: {0}")]
    SkuAlreadyExists(String),

    #[error(transparent)]
    Vendor(#[from] VendorError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
