//! Device constants for the venue browser.
//! Keeping them in a single place makes it easier to retarget the firmware to
//! another map image, display or record set.

/// Number of venue records stored on the card.
pub const RECORD_COUNT: usize = 1066;

/// Absolute block where the first record page begins.
pub const RECORD_BASE_BLOCK: u64 = 4_000_000;

/// Size of one storage block in bytes.
pub const BLOCK_SIZE: usize = 512;

/// Bytes per on-storage record: lat, lon, rating, name.
pub const RECORD_SIZE: usize = 64;

/// Records per cached page (one storage block).
pub const PAGE_SIZE: usize = BLOCK_SIZE / RECORD_SIZE;

/// Capacity of the name field, terminator included when it fits.
pub const NAME_CAPACITY: usize = 55;

/// Full map image size in pixels.
pub const MAP_WIDTH: i32 = 2048;
pub const MAP_HEIGHT: i32 = 2048;

/// Geographic calibration corners of the map image (degrees x 100_000).
pub const MAP_NORTH: i32 = 5_359_942;
pub const MAP_SOUTH: i32 = 5_345_428;
pub const MAP_WEST: i32 = -11_365_028;
pub const MAP_EAST: i32 = -11_340_367;

/// Physical display size in pixels.
pub const DISPLAY_WIDTH: i32 = 128;
pub const DISPLAY_HEIGHT: i32 = 160;

/// Distance kept between the cursor and the image edge.
pub const EDGE_MARGIN: i32 = 2;

/// Cursor square size in pixels.
pub const CURSOR_SIZE: i32 = 3;

/// Joystick deviation required before movement registers.
pub const JOYSTICK_DEAD_ZONE: i32 = 30;

/// Pixels moved per tick while the joystick is held.
pub const CURSOR_INCREMENT: i32 = 2;

/// Dial reading mapped to the top rating (a bit under the 1023 ADC max).
pub const DIAL_MAX: i32 = 1000;

/// Highest selectable minimum rating, in whole stars.
pub const MAX_STARS: u8 = 5;

/// Venues listed per screen.
pub const LIST_PAGE_CAPACITY: usize = 20;

/// Characters of a venue name shown per list line.
pub const CHARS_PER_LINE: usize = 20;

/// Control loop sleep between ticks.
pub const TICK_INTERVAL_MS: u64 = 50;

/// Top-left corner of the first tile shown after power-up.
pub const START_TILE_ORIGIN: i32 = 1024;

/// On-screen cursor position after power-up, both axes.
pub const START_CURSOR: i32 = 64;
