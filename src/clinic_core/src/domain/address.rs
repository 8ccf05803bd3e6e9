use uuid::Uuid;

/// A postal address with optional geolocation.
#[derive(Debug, Clone)]
pub struct Address {
    pub id: Uuid,
    pub country: String,
    pub city: String,
    pub street: String,
    pub building: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone)]
pub struct NewAddress {
    pub country: String,
    pub city: String,
    pub street: String,
    pub building: String,
    pub latitude: f64,
    pub longitude: f64,
}
