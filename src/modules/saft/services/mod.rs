mod saft_service;

pub use saft_service::{render_xml, SaftService};
