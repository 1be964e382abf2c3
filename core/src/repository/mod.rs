pub mod file;
pub mod memory;
pub mod record;
pub mod traits;

#[cfg(test)]
mod record_test;

pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;
pub use record::{RecordStore, DEFAULT_STORE_KEY};
pub use traits::KeyValueStore;
