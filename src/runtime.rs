//! Poll-driven control loop
//!
//! One thread samples every input, advances the browser by one tick, and
//! sleeps a fixed interval before the next poll. Storage reads and draw calls
//! block the loop until they finish; nothing runs in the background.

use crate::{
    core::browser::Browser,
    input::events::InputSample,
    records::device::BlockDevice,
    rendering::surface::DisplaySurface,
};
use std::collections::VecDeque;
use std::thread;
use std::time::Duration;

/// Trait for whatever produces input samples
pub trait InputSource {
    /// Next poll of the inputs, or `None` when input has ended
    fn sample(&mut self) -> Option<InputSample>;
}

/// Replays a fixed list of samples
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    samples: VecDeque<InputSample>,
}

impl ScriptedInput {
    pub fn new(samples: impl IntoIterator<Item = InputSample>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
        }
    }

    /// Appends `count` copies of `sample`
    pub fn hold(mut self, sample: InputSample, count: usize) -> Self {
        self.samples.extend(std::iter::repeat(sample).take(count));
        self
    }

    pub fn remaining(&self) -> usize {
        self.samples.len()
    }
}

impl InputSource for ScriptedInput {
    fn sample(&mut self) -> Option<InputSample> {
        self.samples.pop_front()
    }
}

/// Totals for a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopSummary {
    pub ticks: usize,
    pub errors: usize,
    pub rankings: usize,
}

/// Drives a [`Browser`] from an [`InputSource`] until input runs out
pub struct ControlLoop {
    tick_interval: Duration,
}

impl ControlLoop {
    pub fn new(tick_interval: Duration) -> Self {
        Self { tick_interval }
    }

    /// Runs until `input` is exhausted.
    ///
    /// Tick errors are logged and counted; the loop keeps going so the
    /// device never stops responding.
    pub fn run<D: BlockDevice>(
        &self,
        browser: &mut Browser<D>,
        input: &mut dyn InputSource,
        surface: &mut dyn DisplaySurface,
    ) -> LoopSummary {
        let mut summary = LoopSummary::default();
        browser.start(surface);

        while let Some(sample) = input.sample() {
            summary.ticks += 1;
            match browser.tick(&sample, surface) {
                Ok(outcome) => {
                    if outcome.ranked {
                        summary.rankings += 1;
                    }
                }
                Err(e) => {
                    summary.errors += 1;
                    log::error!("tick {} failed: {}", summary.ticks, e);
                }
            }
            if !self.tick_interval.is_zero() {
                thread::sleep(self.tick_interval);
            }
        }

        log::info!(
            "control loop finished after {} ticks ({} errors, {} rankings)",
            summary.ticks,
            summary.errors,
            summary.rankings
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{config::{BrowserConfig, StoreLayout}, geo::GeoPoint};
    use crate::records::{device::MemoryBlockDevice, record::Record};
    use crate::rendering::surface::RecordingSurface;

    const REST: InputSample = InputSample {
        horizontal: 512,
        vertical: 512,
        select_pressed: false,
        rating_dial: 0,
    };

    const PRESS: InputSample = InputSample {
        select_pressed: true,
        ..REST
    };

    fn browser() -> Browser<MemoryBlockDevice> {
        let records: Vec<Record> = (0..24)
            .map(|i| Record::new(GeoPoint::new(5_350_000, -11_350_000 + i), 8, "Venue"))
            .collect();
        let device = MemoryBlockDevice::from_records(0, &records).unwrap();
        let config = BrowserConfig {
            store: StoreLayout::with_records(0, 24),
            ..BrowserConfig::default()
        };
        Browser::new(device, config).unwrap()
    }

    #[test]
    fn test_runs_until_input_ends() {
        let mut browser = browser();
        let mut input = ScriptedInput::new([REST, PRESS, REST]).hold(REST, 4);
        assert_eq!(input.remaining(), 7);

        let mut surface = RecordingSurface::new();
        let summary = ControlLoop::new(Duration::ZERO).run(&mut browser, &mut input, &mut surface);

        assert_eq!(
            summary,
            LoopSummary {
                ticks: 7,
                errors: 0,
                rankings: 1
            }
        );
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn test_errors_do_not_stop_the_loop() {
        let mut browser = browser();
        browser.cache_mut().device_mut().fail_block(1);
        let mut input = ScriptedInput::new([REST, PRESS, REST, REST]);

        let mut surface = RecordingSurface::new();
        let summary = ControlLoop::new(Duration::ZERO).run(&mut browser, &mut input, &mut surface);

        assert_eq!(summary.ticks, 4);
        assert_eq!(summary.errors, 3);
        assert_eq!(summary.rankings, 0);
    }
}
