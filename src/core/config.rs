//! Configuration for the venue browser
//!
//! Every value defaults to the device constants in [`crate::core::constants`].
//! Profiles bundle the defaults for the two places the engine runs: on the
//! device itself and headless (tests, the desktop viewer). A JSON document can
//! override any subset of fields.

use crate::core::constants::{
    BLOCK_SIZE, CHARS_PER_LINE, CURSOR_INCREMENT, CURSOR_SIZE, DIAL_MAX, DISPLAY_HEIGHT,
    DISPLAY_WIDTH, EDGE_MARGIN, JOYSTICK_DEAD_ZONE, LIST_PAGE_CAPACITY, PAGE_SIZE,
    RECORD_BASE_BLOCK, RECORD_COUNT, RECORD_SIZE, TICK_INTERVAL_MS,
};
use crate::core::geo::GeoCalibration;
use crate::{BrowserError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum BrowserProfile {
    Device,
    Headless,
    Custom(BrowserConfig),
}

impl BrowserProfile {
    pub fn resolve(&self) -> BrowserConfig {
        match self {
            Self::Device => BrowserConfig::default(),
            Self::Headless => BrowserConfig {
                tick_interval_ms: 0,
                ..BrowserConfig::default()
            },
            Self::Custom(config) => config.clone(),
        }
    }
}

impl Default for BrowserProfile {
    fn default() -> Self {
        Self::Device
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    pub store: StoreLayout,
    pub map: GeoCalibration,
    pub display: DisplayConfig,
    pub input: InputConfig,
    pub list: ListConfig,
    /// Sleep between control loop ticks
    pub tick_interval_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            store: StoreLayout::default(),
            map: GeoCalibration::default(),
            display: DisplayConfig::default(),
            input: InputConfig::default(),
            list: ListConfig::default(),
            tick_interval_ms: TICK_INTERVAL_MS,
        }
    }
}

impl BrowserConfig {
    /// Parses a JSON override document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: BrowserConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Rejects layouts the cache, navigator or list cannot operate on
    pub fn validate(&self) -> Result<()> {
        self.store.validate()?;

        if !self.map.is_valid() {
            return Err(BrowserError::InvalidConfig(
                "map calibration has a zero-width axis".to_string(),
            ));
        }
        if self.display.width <= 0
            || self.display.height <= 0
            || self.display.width > self.map.width
            || self.display.height > self.map.height
        {
            return Err(BrowserError::InvalidConfig(format!(
                "display {}x{} must fit inside map image {}x{}",
                self.display.width, self.display.height, self.map.width, self.map.height
            )));
        }
        if self.display.edge_margin < 0 || self.display.edge_margin * 2 >= self.display.width {
            return Err(BrowserError::InvalidConfig(format!(
                "edge margin {} does not fit the display",
                self.display.edge_margin
            )));
        }
        if self.input.increment <= 0 || self.input.dial_max <= 0 {
            return Err(BrowserError::InvalidConfig(
                "joystick increment and dial maximum must be positive".to_string(),
            ));
        }
        if self.list.page_capacity == 0 || self.list.page_capacity > self.store.record_count {
            return Err(BrowserError::InvalidConfig(format!(
                "list page capacity {} must be within 1..={}",
                self.list.page_capacity, self.store.record_count
            )));
        }
        Ok(())
    }
}

/// Where and how the venue records sit on the block device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreLayout {
    /// Absolute block holding page 0
    pub base_block: u64,
    pub record_count: usize,
    /// Records per page; one page fills exactly one block
    pub page_size: usize,
    pub block_size: usize,
}

impl Default for StoreLayout {
    fn default() -> Self {
        Self {
            base_block: RECORD_BASE_BLOCK,
            record_count: RECORD_COUNT,
            page_size: PAGE_SIZE,
            block_size: BLOCK_SIZE,
        }
    }
}

impl StoreLayout {
    /// Layout with the device page geometry and a custom record count
    pub fn with_records(base_block: u64, record_count: usize) -> Self {
        Self {
            base_block,
            record_count,
            ..Self::default()
        }
    }

    /// Number of pages, counting a partially filled last page
    pub fn page_count(&self) -> usize {
        self.record_count.div_ceil(self.page_size)
    }

    pub fn validate(&self) -> Result<()> {
        if self.record_count == 0 {
            return Err(BrowserError::InvalidConfig(
                "record store is empty".to_string(),
            ));
        }
        if self.page_size == 0 || self.page_size * RECORD_SIZE != self.block_size {
            return Err(BrowserError::InvalidConfig(format!(
                "page of {} records x {} bytes does not fill a {} byte block",
                self.page_size, RECORD_SIZE, self.block_size
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub width: i32,
    pub height: i32,
    pub cursor_size: i32,
    /// Closest the cursor may get to the image edge
    pub edge_margin: i32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: DISPLAY_WIDTH,
            height: DISPLAY_HEIGHT,
            cursor_size: CURSOR_SIZE,
            edge_margin: EDGE_MARGIN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub dead_zone: i32,
    pub increment: i32,
    pub dial_max: i32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            dead_zone: JOYSTICK_DEAD_ZONE,
            increment: CURSOR_INCREMENT,
            dial_max: DIAL_MAX,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    pub page_capacity: usize,
    pub chars_per_line: usize,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_capacity: LIST_PAGE_CAPACITY,
            chars_per_line: CHARS_PER_LINE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = BrowserConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.store.page_size, 8);
        assert_eq!(config.store.page_count(), 134);
    }

    #[test]
    fn test_headless_profile_does_not_sleep() {
        let config = BrowserProfile::Headless.resolve();
        assert_eq!(config.tick_interval(), Duration::ZERO);
        assert_eq!(config.store, StoreLayout::default());
    }

    #[test]
    fn test_partial_json_override() {
        let config = BrowserConfig::from_json(
            r#"{ "store": { "base_block": 0, "record_count": 40 }, "list": { "page_capacity": 8 } }"#,
        )
        .unwrap();
        assert_eq!(config.store.base_block, 0);
        assert_eq!(config.store.record_count, 40);
        assert_eq!(config.store.page_size, PAGE_SIZE);
        assert_eq!(config.list.page_capacity, 8);
        assert_eq!(config.list.chars_per_line, CHARS_PER_LINE);
    }

    #[test]
    fn test_rejects_page_that_does_not_fill_block() {
        let layout = StoreLayout {
            page_size: 7,
            ..StoreLayout::default()
        };
        assert!(matches!(
            layout.validate(),
            Err(BrowserError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_oversized_list_page() {
        let mut config = BrowserConfig::default();
        config.store.record_count = 10;
        config.list.page_capacity = 20;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        assert!(matches!(
            BrowserConfig::from_json("{ not json"),
            Err(BrowserError::Serialization(_))
        ));
    }
}
