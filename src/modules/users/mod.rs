// Back-office staff accounts and session issuance

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::StaffUser;
pub use repositories::{SessionRepository, UserRepository};
pub use services::{AuthService, UserService};
