use crate::core::constants::MAX_STARS;
use crate::core::geo::map_range;
use serde::{Deserialize, Serialize};

/// One poll of every input on the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputSample {
    /// Horizontal joystick reading (ADC units)
    pub horizontal: i32,
    /// Vertical joystick reading; larger means down
    pub vertical: i32,
    /// Joystick button held down
    pub select_pressed: bool,
    /// Rating dial reading (ADC units)
    pub rating_dial: i32,
}

impl InputSample {
    pub fn new(horizontal: i32, vertical: i32, select_pressed: bool, rating_dial: i32) -> Self {
        Self {
            horizontal,
            vertical,
            select_pressed,
            rating_dial,
        }
    }
}

/// Maps a dial reading onto a minimum star rating in `0..=5`
pub fn rating_from_dial(reading: i32, dial_max: i32) -> u8 {
    map_range(reading as i64, 0, dial_max as i64, 0, MAX_STARS as i64).clamp(0, MAX_STARS as i64)
        as u8
}

/// Which of the five rating LEDs are lit for `min_rating`
pub fn rating_leds(min_rating: u8) -> [bool; MAX_STARS as usize] {
    std::array::from_fn(|i| min_rating as usize > i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dial_mapping() {
        assert_eq!(rating_from_dial(0, 1000), 0);
        assert_eq!(rating_from_dial(199, 1000), 0);
        assert_eq!(rating_from_dial(200, 1000), 1);
        assert_eq!(rating_from_dial(999, 1000), 4);
        assert_eq!(rating_from_dial(1000, 1000), 5);
        assert_eq!(rating_from_dial(1023, 1000), 5);
        assert_eq!(rating_from_dial(-5, 1000), 0);
    }

    #[test]
    fn test_rating_leds() {
        assert_eq!(rating_leds(0), [false; 5]);
        assert_eq!(rating_leds(3), [true, true, true, false, false]);
        assert_eq!(rating_leds(5), [true; 5]);
    }
}
