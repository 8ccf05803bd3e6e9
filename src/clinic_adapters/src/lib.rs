pub mod auth;
pub mod config;
pub mod email;
pub mod persistence;

pub use auth::{argon2_hasher::Argon2Hasher, jwt_issuer::JwtTokenIssuer};
pub use config::settings::{EmailSettings, Settings};
pub use email::{http_email_client::HttpEmailClient, mock_email_client::MockEmailClient};
pub use persistence::{
    memory::{
        InMemoryAddressStore, InMemoryAuditStore, InMemoryClinicStore, InMemoryTokenStore,
        InMemoryUserStore,
    },
    postgres::{
        PostgresAddressStore, PostgresAuditStore, PostgresClinicStore, PostgresTokenStore,
        PostgresUserStore,
    },
};
