//! On-storage venue record layout
//!
//! A record is 64 little-endian bytes:
//!
//! | offset | size | field                                   |
//! |--------|------|-----------------------------------------|
//! | 0      | 4    | latitude, i32 fixed-point               |
//! | 4      | 4    | longitude, i32 fixed-point              |
//! | 8      | 1    | rating, i8 half-stars 0..=10            |
//! | 9      | 55   | name, NUL-terminated unless it is full  |

use crate::core::constants::{NAME_CAPACITY, RECORD_SIZE};
use crate::core::geo::GeoPoint;
use crate::{BrowserError, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Fixed-width numeric prefix of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct RecordHeader {
    latitude: i32,
    longitude: i32,
    rating: i8,
}

const HEADER_SIZE: usize = 9;

/// A venue as stored on the card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub location: GeoPoint,
    /// Raw rating in half-stars
    pub rating: i8,
    name: [u8; NAME_CAPACITY],
}

impl Default for Record {
    fn default() -> Self {
        Self {
            location: GeoPoint::new(0, 0),
            rating: 0,
            name: [0; NAME_CAPACITY],
        }
    }
}

impl Record {
    /// Creates a record, truncating `name` to the field capacity
    pub fn new(location: GeoPoint, rating: i8, name: &str) -> Self {
        let mut field = [0u8; NAME_CAPACITY];
        let bytes = name.as_bytes();
        let len = bytes.len().min(NAME_CAPACITY);
        field[..len].copy_from_slice(&bytes[..len]);
        Self {
            location,
            rating,
            name: field,
        }
    }

    /// Name bytes up to the terminator, or the whole field when it is full
    pub fn name_bytes(&self) -> &[u8] {
        let end = self
            .name
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(NAME_CAPACITY);
        &self.name[..end]
    }

    pub fn name(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.name_bytes())
    }

    /// Decodes one record from the start of `bytes`
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < RECORD_SIZE {
            return Err(BrowserError::Decode(Box::new(bincode::ErrorKind::Custom(
                format!("record needs {RECORD_SIZE} bytes, got {}", bytes.len()),
            ))));
        }
        let header: RecordHeader = bincode::deserialize(&bytes[..HEADER_SIZE])?;
        let mut name = [0u8; NAME_CAPACITY];
        name.copy_from_slice(&bytes[HEADER_SIZE..RECORD_SIZE]);
        Ok(Self {
            location: GeoPoint::new(header.latitude, header.longitude),
            rating: header.rating,
            name,
        })
    }

    /// Encodes the record into its on-storage form
    pub fn encode(&self) -> Result<[u8; RECORD_SIZE]> {
        let header = RecordHeader {
            latitude: self.location.lat,
            longitude: self.location.lon,
            rating: self.rating,
        };
        let mut out = [0u8; RECORD_SIZE];
        let prefix = bincode::serialize(&header)?;
        out[..HEADER_SIZE].copy_from_slice(&prefix);
        out[HEADER_SIZE..].copy_from_slice(&self.name);
        Ok(out)
    }
}

/// Decodes consecutive records from a block into `page`
pub fn decode_page(block: &[u8], page: &mut [Record]) -> Result<()> {
    for (slot, chunk) in page.iter_mut().zip(block.chunks_exact(RECORD_SIZE)) {
        *slot = Record::decode(chunk)?;
    }
    Ok(())
}

/// Packs records into whole blocks, zero-filling the tail of the last block
pub fn encode_blocks(records: &[Record], block_size: usize) -> Result<Vec<u8>> {
    let per_block = block_size / RECORD_SIZE;
    let blocks = records.len().div_ceil(per_block.max(1));
    let mut out = vec![0u8; blocks * block_size];
    for (i, record) in records.iter().enumerate() {
        let start = i * RECORD_SIZE;
        out[start..start + RECORD_SIZE].copy_from_slice(&record.encode()?);
    }
    Ok(out)
}
