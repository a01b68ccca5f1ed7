// SAF-T (AO) fiscal export module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::AuditFile;
pub use repositories::ExportRepository;
pub use services::SaftService;
