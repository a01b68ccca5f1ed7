mod auth_controller;
mod user_controller;

pub use auth_controller::configure as configure_auth;
pub use user_controller::configure as configure_users;
