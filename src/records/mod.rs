pub mod cache;
pub mod device;
pub mod record;

// Re-exports for convenience
pub use cache::{CacheStats, PagedRecordCache};
pub use device::{BlockDevice, FileBlockDevice, MemoryBlockDevice};
pub use record::Record;
