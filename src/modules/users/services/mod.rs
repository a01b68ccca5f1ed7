mod auth_service;
mod user_service;

pub use auth_service::{hash_password, verify_password, AuthService};
pub use user_service::UserService;
