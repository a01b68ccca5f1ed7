// Customer accounts: storefront profiles plus back-office management

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::Customer;
pub use repositories::CustomerRepository;
pub use services::CustomerService;
