// Adapters layer: concrete store implementations behind the domain ports.

pub mod json_file;
pub mod memory;
pub mod state;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use state::ShopSnapshot;
