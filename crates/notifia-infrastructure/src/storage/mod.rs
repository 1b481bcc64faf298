//! Key-value storage adapters and atomic file operations.

mod atomic_file;
mod file_store;
mod memory_store;

pub use atomic_file::AtomicFile;
pub use file_store::FileKeyValueStore;
pub use memory_store::MemoryKeyValueStore;
