pub mod addresses;
pub mod change_email;
pub mod change_password;
pub mod clinics;
pub mod delete_account;
pub mod login;
pub mod profile;
pub mod register;
pub mod verify_account;

#[cfg(test)]
pub(crate) mod test_support;
