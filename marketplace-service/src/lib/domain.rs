pub mod health;
pub mod identity;
pub mod product;
pub mod vendor;
