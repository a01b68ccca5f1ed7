// Reports module: till closing reports and ranged sales summaries

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{ClosingReport, SalesSummary};
pub use repositories::{MySqlSalesStore, SalesStore};
pub use services::ReportService;
