mod login_use_case;
mod register_use_case;
mod update_profile_use_case;

pub use login_use_case::LoginUseCase;
pub use register_use_case::{RegisterUseCase, VerifyOtpUseCase};
pub use update_profile_use_case::UpdateProfileUseCase;
