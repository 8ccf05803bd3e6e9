use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::role::Role;

/// Identity recovered from a verified bearer token.
///
/// Decoded and validated once by the auth guard, then carried through the
/// request as a typed value instead of an untyped claim map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthClaims {
    /// Subject account id.
    pub sub: Uuid,
    pub email: String,
    pub role: Role,
    /// Issued-at, seconds since the epoch.
    pub iat: usize,
    /// Expiry, seconds since the epoch.
    pub exp: usize,
}

impl AuthClaims {
    /// True when the subject may mutate the account identified by `target`.
    pub fn may_manage(&self, target: Uuid) -> bool {
        self.role == Role::Admin || self.sub == target
    }
}
