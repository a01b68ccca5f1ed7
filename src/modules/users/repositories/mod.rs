mod session_repository;
mod user_repository;

pub use session_repository::{IssuedSession, SessionRepository};
pub use user_repository::UserRepository;
