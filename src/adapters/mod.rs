// Adapters layer: concrete storage backends behind the `Storage` port.

pub mod backend;
pub mod file;
pub mod memory;

pub use backend::Backend;
pub use file::FileStorage;
pub use memory::MemoryStorage;
