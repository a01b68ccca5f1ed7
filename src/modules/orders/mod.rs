// Storefront orders: checkout, staff fulfilment, customer cancellation

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Order, OrderItem, OrderStatus};
pub use repositories::OrderRepository;
pub use services::OrderService;
