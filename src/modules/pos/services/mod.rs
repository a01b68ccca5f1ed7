mod cart_store;
mod sale_service;
mod till_service;

pub use cart_store::CartStore;
pub use sale_service::SaleService;
pub use till_service::TillService;
