pub mod use_cases;

pub use use_cases::{
    activate::{ActivateAccountUseCase, ActivateError},
    edit_profile::{EditProfileError, EditProfileUseCase},
    register::{RegisterError, RegisterOutcome, RegisterUseCase},
    sign_in::{SignInError, SignInUseCase},
    sign_out::{SignOutError, SignOutUseCase},
};
