//! The demo gallery: which demos exist, their metadata, and the fixed
//! sample data they run over.

pub mod registry;
pub mod sample_data;

pub use registry::{DemoCatalog, DemoEntry, DemoKind};
