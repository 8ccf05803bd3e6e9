use std::sync::Arc;

use chrono::Duration;

use clinic_core::{
    AddressStore, AuthTokenIssuer, ClinicStore, CredentialHasher, EmailClient, LoginAuditStore,
    UserStore, VerificationTokenStore,
};

/// Shared handler state. Every collaborator sits behind a trait object so
/// the service wires Postgres adapters and the tests wire in-memory ones
/// through the same struct.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub tokens: Arc<dyn VerificationTokenStore>,
    pub audit: Arc<dyn LoginAuditStore>,
    pub clinics: Arc<dyn ClinicStore>,
    pub addresses: Arc<dyn AddressStore>,
    pub email_client: Arc<dyn EmailClient>,
    pub hasher: Arc<dyn CredentialHasher>,
    pub token_issuer: Arc<dyn AuthTokenIssuer>,
    /// External base URL embedded in emailed verification links.
    pub public_base_url: String,
    pub verification_token_ttl: Duration,
}
