pub mod address_store;
pub mod audit_store;
pub mod clinic_store;
pub mod token_store;
pub mod user_store;

pub use address_store::PostgresAddressStore;
pub use audit_store::PostgresAuditStore;
pub use clinic_store::PostgresClinicStore;
pub use token_store::PostgresTokenStore;
pub use user_store::PostgresUserStore;
