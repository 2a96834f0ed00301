//! # venuemap
//!
//! Venue browsing for small map displays backed by block storage.
//!
//! The library pages fixed-size venue records off a block device through a
//! single-slot cache, ranks them by distance from a map cursor, renders a
//! rating-filtered scrolling list, and navigates a large map image one
//! screen-sized tile at a time.

pub mod core;
pub mod input;
pub mod prelude;
pub mod records;
pub mod rendering;
pub mod runtime;
pub mod spatial;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use core::{
    bounds::PixelRect,
    browser::{Browser, TickOutcome, ViewMode},
    config::BrowserConfig,
    geo::{Axis, GeoCalibration, GeoPoint, PixelPoint},
    viewport::{Navigator, NavigationFrame},
};

pub use records::{
    cache::PagedRecordCache,
    device::{BlockDevice, FileBlockDevice, MemoryBlockDevice},
    record::Record,
};

pub use input::{InputSample, Joystick, SelectButton};

pub use rendering::surface::{DisplaySurface, RecordingSurface};

pub use runtime::{ControlLoop, InputSource, ScriptedInput};

pub use spatial::ranking::{DistanceRanker, RankedEntry};

pub use ui::list::{FilteredListRenderer, ListItem};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, BrowserError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Record decode error: {0}")]
    Decode(#[from] bincode::Error),

    /// The block read for a page failed. The cache still marks the page as
    /// resident while its buffer holds the previous page's records.
    #[error("Storage read failed for block {block}")]
    StorageReadFailed { block: u64 },

    #[error("Record index {index} out of range (record count {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Error type alias for convenience
pub type Error = BrowserError;
