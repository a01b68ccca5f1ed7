mod user;

pub use user::{CreateUserRequest, LoginRequest, LoginResponse, StaffUser, UpdateUserRequest};
