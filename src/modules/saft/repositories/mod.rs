mod export_repository;

pub use export_repository::ExportRepository;
