//! Routing strategies for each action kind

pub mod login;
pub mod registration;

pub use login::LoginStrategy;
pub use registration::RegistrationStrategy;
