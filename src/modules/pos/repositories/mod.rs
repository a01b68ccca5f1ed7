mod sale_repository;
mod till_repository;

pub use sale_repository::{SaleRepository, SessionTotals};
pub use till_repository::TillRepository;
