pub mod argon2_hasher;
pub mod jwt_issuer;
