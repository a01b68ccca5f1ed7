mod pos_controller;

pub use pos_controller::configure;
