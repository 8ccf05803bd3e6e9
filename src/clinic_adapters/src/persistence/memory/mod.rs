//! In-memory store implementations, used by the test suite and for
//! running the service without a database.

pub mod address_store;
pub mod audit_store;
pub mod clinic_store;
pub mod token_store;
pub mod user_store;

pub use address_store::InMemoryAddressStore;
pub use audit_store::InMemoryAuditStore;
pub use clinic_store::InMemoryClinicStore;
pub use token_store::InMemoryTokenStore;
pub use user_store::InMemoryUserStore;
