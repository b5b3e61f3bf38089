pub mod identity;
pub mod memory;
pub mod product;
pub mod vendor;

pub use identity::PostgresIdentityRepository;
pub use memory::InMemoryIdentityRepository;
pub use memory::InMemoryProductRepository;
pub use memory::InMemoryVendorRepository;
pub use product::PostgresProductRepository;
pub use vendor::PostgresVendorRepository;
