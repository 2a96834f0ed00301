use crate::{
    core::{config::BrowserConfig, viewport::{NavigationFrame, Navigator}},
    input::{
        events::{rating_from_dial, rating_leds, InputSample},
        handler::{Joystick, SelectButton},
    },
    records::{cache::PagedRecordCache, device::BlockDevice},
    rendering::surface::DisplaySurface,
    spatial::ranking::{DistanceRanker, RankedEntry},
    ui::list::{FilteredListRenderer, ListItem},
    BrowserError, Result,
};
use std::fmt;

/// What the display is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewMode {
    /// Cursor navigation over the map image
    Map,
    /// Ranked, filtered, scrollable venue list
    List,
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Map => write!(f, "Map Mode"),
            Self::List => write!(f, "List Mode"),
        }
    }
}

/// Everything one tick did, for the control loop and for tests
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    pub mode: ViewMode,
    pub mode_changed: bool,
    /// A full distance ranking ran this tick
    pub ranked: bool,
    pub min_rating: u8,
    pub rating_leds: [bool; 5],
    pub scroll_index: usize,
    /// Map mode: what the navigator asked to redraw
    pub navigation: Option<NavigationFrame>,
    /// List mode: the page rendered this tick, if one was
    pub page: Option<Vec<ListItem>>,
}

/// The venue browser: owns the record cache, the ranking and the cursor,
/// and advances them one input sample at a time.
pub struct Browser<D: BlockDevice> {
    config: BrowserConfig,
    cache: PagedRecordCache<D>,
    ranker: DistanceRanker,
    navigator: Navigator,
    list: FilteredListRenderer,
    joystick: Option<Joystick>,
    select: SelectButton,
    mode: ViewMode,
    needs_resort: bool,
    /// The list on screen does not match `scroll_index`
    page_stale: bool,
    scroll_index: usize,
    min_rating: u8,
}

impl<D: BlockDevice> Browser<D> {
    pub fn new(device: D, config: BrowserConfig) -> Result<Self> {
        config.validate()?;
        let cache = PagedRecordCache::new(device, config.store)?;
        Ok(Self {
            ranker: DistanceRanker::new(config.store.record_count),
            navigator: Navigator::new(&config),
            list: FilteredListRenderer::new(&config.list),
            joystick: None,
            select: SelectButton::default(),
            mode: ViewMode::Map,
            needs_resort: true,
            page_stale: false,
            scroll_index: 0,
            min_rating: 0,
            cache,
            config,
        })
    }

    /// Samples the joystick rest position. Without this the first tick's
    /// sample is taken as the rest position.
    pub fn calibrate(&mut self, rest: &InputSample) {
        self.joystick = Some(Joystick::calibrate(rest, &self.config.input));
    }

    /// Draws the initial map view
    pub fn start(&mut self, surface: &mut dyn DisplaySurface) {
        surface.clear();
        surface.draw_tile(&self.navigator.full_tile());
        surface.fill_cursor(&self.navigator.cursor_rect());
    }

    /// Advances the browser by one input sample
    pub fn tick(
        &mut self,
        sample: &InputSample,
        surface: &mut dyn DisplaySurface,
    ) -> Result<TickOutcome> {
        let joystick = *self
            .joystick
            .get_or_insert_with(|| Joystick::calibrate(sample, &self.config.input));

        let previous_rating = self.min_rating;
        self.min_rating = rating_from_dial(sample.rating_dial, self.config.input.dial_max);

        let mode_changed = self.select.press_edge(sample.select_pressed);
        if mode_changed {
            self.toggle_mode(surface);
        }

        let mut outcome = TickOutcome {
            mode: self.mode,
            mode_changed,
            ranked: false,
            min_rating: self.min_rating,
            rating_leds: rating_leds(self.min_rating),
            scroll_index: self.scroll_index,
            navigation: None,
            page: None,
        };

        match self.mode {
            ViewMode::Map => {
                // The cursor may move, so the next list needs a fresh ranking.
                self.needs_resort = true;
                let frame = self.navigator.step(joystick.delta(sample));
                frame.draw(surface);
                outcome.navigation = Some(frame);
            }
            ViewMode::List => {
                let result = if self.needs_resort {
                    self.resort(surface).map(|(ranked, page)| {
                        outcome.ranked = ranked;
                        Some(page)
                    })
                } else {
                    let direction = joystick.vertical(sample);
                    if direction != 0 {
                        self.scroll(direction);
                    }
                    if direction != 0 || self.min_rating != previous_rating || self.page_stale {
                        self.render_page(surface).map(Some)
                    } else {
                        Ok(None)
                    }
                };
                outcome.page = self.recover(result)?;
                outcome.scroll_index = self.scroll_index;
            }
        }

        Ok(outcome)
    }

    fn toggle_mode(&mut self, surface: &mut dyn DisplaySurface) {
        self.mode = match self.mode {
            ViewMode::Map => ViewMode::List,
            ViewMode::List => ViewMode::Map,
        };
        log::info!("{}", self.mode);

        if self.mode == ViewMode::Map {
            surface.clear();
            surface.draw_tile(&self.navigator.full_tile());
        }
    }

    /// Ranks around the cursor unless the ranking is already for this spot,
    /// then shows the first page
    fn resort(&mut self, surface: &mut dyn DisplaySurface) -> Result<(bool, Vec<ListItem>)> {
        let query = self.navigator.geo_position();
        let ranked = self.ranker.query() != Some(query);
        if ranked {
            self.ranker.rank(&mut self.cache, query)?;
        }
        self.scroll_index = 0;
        let page = self.render_page(surface)?;
        self.needs_resort = false;
        Ok((ranked, page))
    }

    /// Moves one scroll step, clamped to `[0, record_count - page_capacity]`
    fn scroll(&mut self, direction: i32) {
        let max_scroll = self
            .config
            .store
            .record_count
            .saturating_sub(self.list.page_capacity());
        self.scroll_index = if direction < 0 {
            self.scroll_index.saturating_sub(1)
        } else {
            (self.scroll_index + 1).min(max_scroll)
        };
    }

    /// Renders the page at `scroll_index`. A failed render leaves the page
    /// stale so the next list tick tries again.
    fn render_page(&mut self, surface: &mut dyn DisplaySurface) -> Result<Vec<ListItem>> {
        self.page_stale = true;
        let page = self.list.visible_page(
            self.ranker.entries(),
            &mut self.cache,
            self.min_rating,
            self.scroll_index,
        )?;
        self.list.render(&page, surface);
        self.page_stale = false;
        Ok(page)
    }

    /// A failed read leaves stale records in the cache; drop them so the
    /// next attempt goes back to storage
    fn recover<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(BrowserError::StorageReadFailed { .. }) = &result {
            self.cache.invalidate();
        }
        result
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn needs_resort(&self) -> bool {
        self.needs_resort
    }

    pub fn scroll_index(&self) -> usize {
        self.scroll_index
    }

    pub fn min_rating(&self) -> u8 {
        self.min_rating
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn ranking(&self) -> &[RankedEntry] {
        self.ranker.entries()
    }

    pub fn cache(&self) -> &PagedRecordCache<D> {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut PagedRecordCache<D> {
        &mut self.cache
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }
}
