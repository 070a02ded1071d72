pub mod activate;
pub mod edit_profile;
pub mod register;
pub mod sign_in;
pub mod sign_out;
