pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{Backend, FileStorage, MemoryStorage};
pub use app::Staybook;
pub use core::{booking_store::BookingStore, message_store::MessageStore};
pub use utils::error::{Result, StayError};
