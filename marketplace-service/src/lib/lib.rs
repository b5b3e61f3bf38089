pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::identity;
pub use domain::product;
pub use domain::vendor;
pub use outbound::repositories;
