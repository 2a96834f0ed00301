use crate::{
    core::geo::GeoPoint,
    records::{cache::PagedRecordCache, device::BlockDevice},
    Result,
};

/// A record's distance from the current query point.
///
/// The raw rating is copied in so filtering a ranking never has to go back
/// to storage for records that end up hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedEntry {
    pub index: usize,
    pub distance: u32,
    pub rating: i8,
}

/// Orders every record by Manhattan distance from a query point.
///
/// The entry buffer is sized to the record count once and refilled on every
/// ranking. Ties keep no particular order: only ascending distance is
/// guaranteed.
pub struct DistanceRanker {
    entries: Vec<RankedEntry>,
    query: Option<GeoPoint>,
}

impl DistanceRanker {
    pub fn new(record_count: usize) -> Self {
        Self {
            entries: Vec::with_capacity(record_count),
            query: None,
        }
    }

    /// Scores every record against `query` and sorts by ascending distance.
    ///
    /// Records are visited in index order so each page is read once. A storage
    /// failure leaves the ranker without a ranking.
    pub fn rank<D: BlockDevice>(
        &mut self,
        cache: &mut PagedRecordCache<D>,
        query: GeoPoint,
    ) -> Result<&[RankedEntry]> {
        self.entries.clear();
        self.query = None;

        for index in 0..cache.record_count() {
            let record = cache.fetch(index)?;
            self.entries.push(RankedEntry {
                index,
                distance: query.manhattan_distance(&record.location),
                rating: record.rating,
            });
        }

        self.entries.sort_unstable_by_key(|entry| entry.distance);
        self.query = Some(query);
        log::info!(
            "ranked {} records around ({}, {})",
            self.entries.len(),
            query.lat,
            query.lon
        );
        Ok(&self.entries)
    }

    /// Query point of the current ranking, if any
    pub fn query(&self) -> Option<GeoPoint> {
        self.query
    }

    pub fn is_ranked(&self) -> bool {
        self.query.is_some()
    }

    /// Entries of the current ranking, empty when nothing is ranked
    pub fn entries(&self) -> &[RankedEntry] {
        if self.is_ranked() {
            &self.entries
        } else {
            &[]
        }
    }
}
