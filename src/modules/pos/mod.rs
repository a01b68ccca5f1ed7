// Point-of-sale module: register carts, till sessions, sale recording

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Cart, CartItem, PaymentMethod, Sale, SaleLine, TillSession, TillStatus};
pub use repositories::{SaleRepository, TillRepository};
pub use services::{CartStore, SaleService, TillService};
