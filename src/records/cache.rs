use crate::core::config::StoreLayout;
use crate::records::device::BlockDevice;
use crate::records::record::{decode_page, Record};
use crate::{BrowserError, Result};

/// Counters describing how the resident page has been used
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub failed_reads: usize,
}

/// Single-slot page cache over the on-storage record array.
///
/// Exactly one page (one storage block of records) is resident at a time.
/// Fetching any record of the resident page touches no storage; fetching
/// from another page costs one block read and replaces the slot.
///
/// A failed block read still marks the requested page as resident while the
/// buffer keeps the previous page's records, so later fetches from that page
/// return stale data until [`invalidate`](Self::invalidate) is called.
pub struct PagedRecordCache<D: BlockDevice> {
    device: D,
    layout: StoreLayout,
    page: Vec<Record>,
    block: Vec<u8>,
    resident: Option<usize>,
    stats: CacheStats,
}

impl<D: BlockDevice> PagedRecordCache<D> {
    /// Create a cache over `device` for the records described by `layout`
    pub fn new(device: D, layout: StoreLayout) -> Result<Self> {
        layout.validate()?;
        if device.block_size() != layout.block_size {
            return Err(BrowserError::InvalidConfig(format!(
                "device block size {} does not match layout block size {}",
                device.block_size(),
                layout.block_size
            )));
        }
        Ok(Self {
            device,
            page: vec![Record::default(); layout.page_size],
            block: vec![0; layout.block_size],
            layout,
            resident: None,
            stats: CacheStats::default(),
        })
    }

    /// Returns the record at `index`, loading its page if it is not resident
    pub fn fetch(&mut self, index: usize) -> Result<Record> {
        if index >= self.layout.record_count {
            return Err(BrowserError::IndexOutOfRange {
                index,
                len: self.layout.record_count,
            });
        }

        let page_index = index / self.layout.page_size;
        if self.resident == Some(page_index) {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
            self.load_page(page_index)?;
        }
        Ok(self.page[index % self.layout.page_size])
    }

    fn load_page(&mut self, page_index: usize) -> Result<()> {
        let block = self.layout.base_block + page_index as u64;
        log::debug!("loading record page {} from block {}", page_index, block);

        let read = self.device.read_block(block, &mut self.block);
        self.resident = Some(page_index);

        if let Err(e) = read {
            self.stats.failed_reads += 1;
            log::warn!(
                "block {} read failed, page {} now holds stale records: {}",
                block,
                page_index,
                e
            );
            return Err(BrowserError::StorageReadFailed { block });
        }

        decode_page(&self.block, &mut self.page)
    }

    /// Forget the resident page so the next fetch re-reads storage
    pub fn invalidate(&mut self) {
        self.resident = None;
    }

    pub fn resident_page(&self) -> Option<usize> {
        self.resident
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn record_count(&self) -> usize {
        self.layout.record_count
    }

    pub fn page_count(&self) -> usize {
        self.layout.page_count()
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::GeoPoint;
    use crate::records::device::MemoryBlockDevice;

    fn records(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| Record::new(GeoPoint::new(i as i32, 0), 6, &format!("Venue {i}")))
            .collect()
    }

    fn cache(n: usize) -> PagedRecordCache<MemoryBlockDevice> {
        let device = MemoryBlockDevice::from_records(50, &records(n)).unwrap();
        PagedRecordCache::new(device, StoreLayout::with_records(50, n)).unwrap()
    }

    #[test]
    fn test_one_read_per_page_run() {
        let mut cache = cache(32);
        for i in [0, 3, 7, 1, 7] {
            assert_eq!(cache.fetch(i).unwrap(), records(32)[i]);
        }
        assert_eq!(cache.device().reads(), 1);
        assert_eq!(cache.resident_page(), Some(0));

        assert_eq!(cache.fetch(8).unwrap(), records(32)[8]);
        assert_eq!(cache.device().reads(), 2);
        assert_eq!(cache.device().read_log(), &[50, 51]);
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 4,
                misses: 2,
                failed_reads: 0
            }
        );
    }

    #[test]
    fn test_alternating_pages_reread() {
        let mut cache = cache(32);
        cache.fetch(0).unwrap();
        cache.fetch(9).unwrap();
        cache.fetch(1).unwrap();
        assert_eq!(cache.device().reads(), 3);
    }

    #[test]
    fn test_out_of_range_does_not_touch_storage() {
        let mut cache = cache(10);
        assert!(matches!(
            cache.fetch(10),
            Err(BrowserError::IndexOutOfRange { index: 10, len: 10 })
        ));
        assert_eq!(cache.device().reads(), 0);
        assert_eq!(cache.resident_page(), None);
    }

    #[test]
    fn test_partial_last_page() {
        let mut cache = cache(10);
        assert_eq!(cache.page_count(), 2);
        assert_eq!(cache.fetch(9).unwrap(), records(10)[9]);
    }

    #[test]
    fn test_failed_read_keeps_stale_page_resident() {
        let mut cache = cache(24);
        cache.fetch(2).unwrap();
        cache.device_mut().fail_block(51);

        assert!(matches!(
            cache.fetch(10),
            Err(BrowserError::StorageReadFailed { block: 51 })
        ));
        assert_eq!(cache.resident_page(), Some(1));

        // Page 1 is now "resident" but still holds page 0's records.
        assert_eq!(cache.fetch(10).unwrap(), records(24)[2]);
        assert_eq!(cache.device().reads(), 2);
        assert_eq!(cache.stats().failed_reads, 1);
    }

    #[test]
    fn test_invalidate_forces_reread() {
        let mut cache = cache(24);
        cache.device_mut().fail_block(51);
        assert!(cache.fetch(10).is_err());

        cache.device_mut().heal_block(51);
        cache.invalidate();
        assert_eq!(cache.fetch(10).unwrap(), records(24)[10]);
        assert_eq!(cache.device().reads(), 2);
    }

    #[test]
    fn test_rejects_mismatched_block_size() {
        let device = MemoryBlockDevice::from_records(0, &records(8)).unwrap();
        let layout = StoreLayout {
            page_size: 4,
            block_size: 256,
            ..StoreLayout::with_records(0, 8)
        };
        assert!(PagedRecordCache::new(device, layout).is_err());
    }
}
