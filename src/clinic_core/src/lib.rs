pub mod domain;
pub mod ports;
pub mod strategies;

// Re-export commonly used types for convenience
pub use domain::{
    DomainError,
    address::{Address, NewAddress},
    claims::AuthClaims,
    clinic::{Clinic, ClinicAddress, NewClinic},
    email::Email,
    password::Password,
    person_name::PersonName,
    role::Role,
    user::{NewUser, User, UserProfile},
};

pub use ports::{
    repositories::{
        AddressStore, AddressStoreError, AuditStoreError, ClinicStore, ClinicStoreError,
        LoginAuditStore, TokenStoreError, UserStore, UserStoreError, VerificationTokenStore,
    },
    services::EmailClient,
};

pub use strategies::{
    credential_hasher::{CredentialHasher, HasherError},
    token_issuer::{AuthTokenError, AuthTokenIssuer},
};
