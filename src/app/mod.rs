pub mod service;

pub use service::{ExportBundle, Staybook};
