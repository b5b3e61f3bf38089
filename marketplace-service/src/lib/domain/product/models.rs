use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;

use crate::product::errors::PriceError;
use crate::product::errors::ProductNameError;
use crate::product::errors::SkuError;
use crate::vendor::models::VendorId;

/// Product aggregate entity.
///
/// Always read together with the name of the vendor that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    pub sku: Option<Sku>,
    pub description: Option<String>,
    pub price: Price,
    pub vendor_id: VendorId,
    pub vendor_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Product unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(pub i64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Product name value type, 1-255 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductName(String);

impl ProductName {
    const MAX_LENGTH: usize = 255;

    /// # Errors
    /// * `Empty` - Name is empty
    /// * `TooLong` - Name longer than 255 characters
    pub fn new(name: String) -> Result<Self, ProductNameError> {
        let actual = name.chars().count();
        if actual == 0 {
            Err(ProductNameError::Empty)
        } else if actual > Self::MAX_LENGTH {
            Err(ProductNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Stock keeping unit, at most 100 characters. Unique across products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sku(String);

impl Sku {
    const MAX_LENGTH: usize = 100;

    pub fn new(sku: String) -> Result<Self, SkuError> {
        let actual = sku.chars().count();
        if actual > Self::MAX_LENGTH {
            Err(SkuError::TooLong {
                max: Self::MAX_LENGTH,
                actual,
            })
        } else {
            Ok(Self(sku))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unit price: non-negative, two decimal places, fits `NUMERIC(10, 2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Price(Decimal);

impl Price {
    pub const SCALE: u32 = 2;
    const MAX: &'static str = "99999999.99";

    /// # Errors
    /// * `Negative` - Price below zero
    /// * `TooPrecise` - More than two significant decimal places
    /// * `TooLarge` - Price does not fit ten digits
    pub fn new(price: Decimal) -> Result<Self, PriceError> {
        if price.is_sign_negative() && !price.is_zero() {
            return Err(PriceError::Negative);
        }

        let price = price.normalize();
        if price.scale() > Self::SCALE {
            return Err(PriceError::TooPrecise { max: Self::SCALE });
        }
        if price > Decimal::new(99_999_999_99, Self::SCALE) {
            return Err(PriceError::TooLarge { max: Self::MAX });
        }

        let mut price = price;
        price.rescale(Self::SCALE);
        Ok(Self(price))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to create a product for the caller's vendor.
#[derive(Debug, Clone)]
pub struct CreateProductCommand {
    pub name: ProductName,
    pub sku: Option<Sku>,
    pub description: Option<String>,
    pub price: Price,
}

/// Product fields written to storage on creation.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: ProductName,
    pub sku: Option<Sku>,
    pub description: Option<String>,
    pub price: Price,
    pub vendor_id: VendorId,
}

impl NewProduct {
    pub fn for_vendor(command: CreateProductCommand, vendor_id: VendorId) -> Self {
        Self {
            name: command.name,
            sku: command.sku,
            description: command.description,
            price: command.price,
            vendor_id,
        }
    }
}

/// Command to update an existing product.
///
/// All fields are optional to support partial updates.
#[derive(Debug, Clone, Default)]
pub struct UpdateProductCommand {
    pub name: Option<ProductName>,
    pub sku: Option<Sku>,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub vendor_id: Option<VendorId>,
}

impl Product {
    /// Apply a partial update in place. The caller checks the new vendor exists.
    pub fn apply(&mut self, command: UpdateProductCommand) {
        if let Some(name) = command.name {
            self.name = name;
        }
        if command.sku.is_some() {
            self.sku = command.sku;
        }
        if command.description.is_some() {
            self.description = command.description;
        }
        if let Some(price) = command.price {
            self.price = price;
        }
        if let Some(vendor_id) = command.vendor_id {
            self.vendor_id = vendor_id;
        }
    }
}
