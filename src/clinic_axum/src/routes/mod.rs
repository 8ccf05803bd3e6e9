pub mod addresses;
pub mod clinics;
pub mod login;
pub mod register;
pub mod users;
pub mod verify;
