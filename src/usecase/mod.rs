pub mod content_usecase;
pub mod profile_usecase;
pub mod register_user_usecase;
