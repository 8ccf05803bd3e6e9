pub mod use_cases;

pub use use_cases::{
    addresses::{AddressesError, AddressesUseCase},
    change_email::{ChangeEmailError, ChangeEmailUseCase, VerifyNewEmailError, VerifyNewEmailUseCase},
    change_password::{ChangePasswordError, ChangePasswordUseCase},
    clinics::{ClinicsError, ClinicsUseCase},
    delete_account::{DeleteAccountError, DeleteAccountUseCase},
    login::{LoginError, LoginUseCase},
    profile::{ProfileError, ProfileUseCase, UpdateProfileRequest},
    register::{RegisterError, RegisterRequest, RegisterUseCase},
    verify_account::{VerifyAccountError, VerifyAccountUseCase},
};
