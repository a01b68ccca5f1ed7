mod export_controller;

pub use export_controller::configure;
