//! Prelude module for common venuemap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use venuemap::prelude::*;`

pub use crate::core::{
    bounds::PixelRect,
    browser::{Browser, TickOutcome, ViewMode},
    config::{BrowserConfig, BrowserProfile, DisplayConfig, InputConfig, ListConfig, StoreLayout},
    geo::{Axis, GeoCalibration, GeoPoint, PixelPoint},
    viewport::{AxisGeometry, AxisState, BoundaryRule, CursorState, NavigationFrame, Navigator},
};

pub use crate::records::{
    BlockDevice, CacheStats, FileBlockDevice, MemoryBlockDevice, PagedRecordCache, Record,
};

pub use crate::spatial::ranking::{DistanceRanker, RankedEntry};

pub use crate::ui::list::{FilteredListRenderer, ListItem};

pub use crate::input::{
    events::{rating_from_dial, rating_leds, InputSample},
    handler::{Joystick, SelectButton},
};

pub use crate::rendering::surface::{DisplaySurface, DrawCommand, RecordingSurface, TileBlit};

pub use crate::runtime::{ControlLoop, InputSource, LoopSummary, ScriptedInput};

pub use crate::{Error as BrowserError, Result};
