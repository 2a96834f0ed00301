use crate::{
    core::{config::InputConfig, geo::PixelPoint},
    input::events::InputSample,
};

/// Two-axis analog joystick read against a baseline sampled at rest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Joystick {
    baseline_horizontal: i32,
    baseline_vertical: i32,
    dead_zone: i32,
    increment: i32,
}

impl Joystick {
    /// Takes the resting position from `rest`
    pub fn calibrate(rest: &InputSample, config: &InputConfig) -> Self {
        Self {
            baseline_horizontal: rest.horizontal,
            baseline_vertical: rest.vertical,
            dead_zone: config.dead_zone,
            increment: config.increment,
        }
    }

    /// -1, 0 or 1 depending on which side of the dead zone `reading` is
    fn direction(&self, reading: i32, baseline: i32) -> i32 {
        if reading - baseline > self.dead_zone {
            1
        } else if baseline - reading > self.dead_zone {
            -1
        } else {
            0
        }
    }

    pub fn horizontal(&self, sample: &InputSample) -> i32 {
        self.direction(sample.horizontal, self.baseline_horizontal)
    }

    /// Positive means down on the map and further down the list
    pub fn vertical(&self, sample: &InputSample) -> i32 {
        self.direction(sample.vertical, self.baseline_vertical)
    }

    /// Cursor movement in pixels for this sample
    pub fn delta(&self, sample: &InputSample) -> PixelPoint {
        PixelPoint::new(
            self.horizontal(sample) * self.increment,
            self.vertical(sample) * self.increment,
        )
    }
}

/// Turns a held button level into single press edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectButton {
    armed: bool,
}

impl Default for SelectButton {
    fn default() -> Self {
        Self { armed: true }
    }
}

impl SelectButton {
    /// True exactly once per press; re-arms when the button is released
    pub fn press_edge(&mut self, pressed: bool) -> bool {
        if pressed && self.armed {
            self.armed = false;
            true
        } else {
            if !pressed {
                self.armed = true;
            }
            false
        }
    }
}
