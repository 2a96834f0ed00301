//! Rating-filtered, scrollable venue list
//!
//! The list walks a distance ranking from nearest to farthest, hides venues
//! below the dial's minimum rating and pages through the rest. Each scroll
//! step advances three quarters of a page so consecutive screens share a
//! quarter page of context.

use crate::{
    core::config::ListConfig,
    records::{cache::PagedRecordCache, device::BlockDevice},
    rendering::surface::DisplaySurface,
    spatial::ranking::RankedEntry,
    Result,
};

/// Converts a raw half-star rating (0..=10) to whole stars, rounding halves up
pub fn normalized_rating(raw: i8) -> i16 {
    (raw as i16 + 1) / 2
}

/// Number of qualifying entries skipped before the page at `scroll_index`
pub fn skip_distance(scroll_index: usize, page_capacity: usize) -> usize {
    scroll_index * (page_capacity * 3 / 4)
}

/// One visible row of the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// Position in the distance ranking
    pub rank: usize,
    pub index: usize,
    pub distance: u32,
    pub rating: i8,
    pub stars: i16,
    pub name: String,
}

impl ListItem {
    /// The row as printed: the first `chars_per_line` characters of the name
    pub fn display_line(&self, chars_per_line: usize) -> String {
        self.name.chars().take(chars_per_line).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilteredListRenderer {
    page_capacity: usize,
    chars_per_line: usize,
}

impl FilteredListRenderer {
    pub fn new(config: &ListConfig) -> Self {
        Self {
            page_capacity: config.page_capacity,
            chars_per_line: config.chars_per_line,
        }
    }

    pub fn page_capacity(&self) -> usize {
        self.page_capacity
    }

    /// Selects the rows visible at `scroll_index`.
    ///
    /// Entries rated below `min_rating` stars neither show nor count toward
    /// the skip. Only shown rows are fetched from `cache`. The scan stops at
    /// the end of `ranking`, so the last page may be short or empty.
    pub fn visible_page<D: BlockDevice>(
        &self,
        ranking: &[RankedEntry],
        cache: &mut PagedRecordCache<D>,
        min_rating: u8,
        scroll_index: usize,
    ) -> Result<Vec<ListItem>> {
        let skip = skip_distance(scroll_index, self.page_capacity);
        let qualifying = ranking
            .iter()
            .enumerate()
            .filter(|(_, entry)| normalized_rating(entry.rating) >= min_rating as i16)
            .skip(skip)
            .take(self.page_capacity);

        let mut items = Vec::with_capacity(self.page_capacity);
        for (rank, entry) in qualifying {
            let record = cache.fetch(entry.index)?;
            items.push(ListItem {
                rank,
                index: entry.index,
                distance: entry.distance,
                rating: record.rating,
                stars: normalized_rating(record.rating),
                name: record.name().into_owned(),
            });
        }

        if items.len() < self.page_capacity {
            log::debug!(
                "short list page at scroll {}: {} of {} rows",
                scroll_index,
                items.len(),
                self.page_capacity
            );
        }
        Ok(items)
    }

    /// Clears the display and prints one line per row
    pub fn render(&self, items: &[ListItem], surface: &mut dyn DisplaySurface) {
        surface.clear();
        for item in items {
            surface.print_line(&item.display_line(self.chars_per_line));
        }
    }
}
