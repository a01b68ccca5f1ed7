// Catalog module: products and categories for the pharmacy back office

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Category, Product};
pub use repositories::ProductRepository;
pub use services::ProductService;
