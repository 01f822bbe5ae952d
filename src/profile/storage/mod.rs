pub mod core;
pub mod file;
pub mod memory;

pub use self::core::{PlayerStore, StoreError};
pub use file::FileStore;
pub use memory::MemoryStore;
