use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use venuemap::prelude::*;

/// Prints list text to stdout and logs map drawing
struct TerminalSurface;

impl DisplaySurface for TerminalSurface {
    fn draw_tile(&mut self, blit: &TileBlit) {
        log::debug!("blit {:?} -> {:?}", blit.source, blit.dest);
    }

    fn fill_cursor(&mut self, rect: &PixelRect) {
        log::trace!("cursor at ({}, {})", rect.x, rect.y);
    }

    fn clear(&mut self) {
        println!("--------------------");
    }

    fn print_line(&mut self, text: &str) {
        println!("{text}");
    }
}

const REST: InputSample = InputSample {
    horizontal: 512,
    vertical: 512,
    select_pressed: false,
    rating_dial: 0,
};

/// Pan east and south for a while, open the list, scroll twice, come back
fn demo_session(min_rating_dial: i32) -> ScriptedInput {
    let dial = |sample: InputSample| InputSample {
        rating_dial: min_rating_dial,
        ..sample
    };
    let east = dial(InputSample {
        horizontal: 1023,
        ..REST
    });
    let south = dial(InputSample {
        vertical: 1023,
        ..REST
    });
    let press = dial(InputSample {
        select_pressed: true,
        ..REST
    });
    let rest = dial(REST);

    ScriptedInput::new([REST])
        .hold(east, 90)
        .hold(south, 45)
        .hold(press, 1)
        .hold(rest, 1)
        .hold(south, 2)
        .hold(rest, 1)
        .hold(press, 1)
        .hold(rest, 1)
}

/// Synthetic venues on a grid over the whole map image
fn demo_records(config: &BrowserConfig) -> Vec<Record> {
    (0..config.store.record_count)
        .map(|i| {
            let x = (i % 33) as i32 * 62;
            let y = (i / 33) as i32 * 62;
            let location = config.map.cursor_to_geo(PixelPoint::new(x, y));
            Record::new(location, (i % 11) as i8, &format!("Venue {i} at ({x}, {y})"))
        })
        .collect()
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless venue browser driven by a scripted joystick")]
struct Args {
    /// Record pages file; its first byte is read as the configured base
    /// block. A synthetic venue grid is used when omitted.
    records: Option<PathBuf>,

    /// JSON file overriding any subset of the device configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rating dial reading held for the whole session (0 to the dial maximum)
    #[arg(long, default_value_t = 600)]
    min_rating_dial: i32,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let profile = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            let config = BrowserConfig::from_json(&json)
                .with_context(|| format!("parsing config {}", path.display()))?;
            BrowserProfile::Custom(config)
        }
        None => BrowserProfile::Device,
    };
    let config = profile.resolve();

    let device: Box<dyn BlockDevice> = match &args.records {
        Some(path) => Box::new(
            FileBlockDevice::open_at(path, config.store.base_block)
                .with_context(|| format!("opening records {}", path.display()))?,
        ),
        None => {
            log::info!("no record file given, using synthetic venues");
            Box::new(MemoryBlockDevice::from_records(
                config.store.base_block,
                &demo_records(&config),
            )?)
        }
    };

    let tick_interval = config.tick_interval();
    let mut browser = Browser::new(device, config)?;
    let mut input = demo_session(args.min_rating_dial);
    let mut surface = TerminalSurface;

    let summary = ControlLoop::new(tick_interval).run(&mut browser, &mut input, &mut surface);
    let stats = browser.cache().stats();
    println!(
        "{} ticks, {} rankings, {} errors; cache {} hits / {} misses / {} failed reads",
        summary.ticks,
        summary.rankings,
        summary.errors,
        stats.hits,
        stats.misses,
        stats.failed_reads
    );
    Ok(())
}
