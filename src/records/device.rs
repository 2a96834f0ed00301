//! Block storage seam for the record store
//!
//! Reads are whole-block and synchronous. A failed read reports an error and
//! makes no promise about the destination buffer.

use crate::core::constants::BLOCK_SIZE;
use crate::records::record::{encode_blocks, Record};
use crate::Result;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

/// Trait for anything that can read fixed-size blocks by absolute block number
pub trait BlockDevice {
    fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    /// Fill `buf` (exactly one block) with the contents of `block`
    fn read_block(&mut self, block: u64, buf: &mut [u8]) -> io::Result<()>;
}

impl<T: BlockDevice + ?Sized> BlockDevice for Box<T> {
    fn block_size(&self) -> usize {
        (**self).block_size()
    }

    fn read_block(&mut self, block: u64, buf: &mut [u8]) -> io::Result<()> {
        (**self).read_block(block, buf)
    }
}

/// Block device over a disk image or a records-only file
#[derive(Debug)]
pub struct FileBlockDevice {
    file: File,
    /// Absolute block number stored at byte 0 of the file
    first_block: u64,
    block_size: usize,
}

impl FileBlockDevice {
    /// Opens a raw card image where block `n` starts at byte `n * block_size`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_at(path, 0)
    }

    /// Opens a file whose first byte is absolute block `first_block`.
    ///
    /// Lets a file holding only the record pages stand in for the whole card.
    pub fn open_at(path: impl AsRef<Path>, first_block: u64) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        log::debug!(
            "opened block device {} (first block {})",
            path.as_ref().display(),
            first_block
        );
        Ok(Self {
            file,
            first_block,
            block_size: BLOCK_SIZE,
        })
    }
}

impl BlockDevice for FileBlockDevice {
    fn block_size(&self) -> usize {
        self.block_size
    }

    fn read_block(&mut self, block: u64, buf: &mut [u8]) -> io::Result<()> {
        let relative = block.checked_sub(self.first_block).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("block {block} precedes file start {}", self.first_block),
            )
        })?;
        self.file
            .seek(SeekFrom::Start(relative * self.block_size as u64))?;
        self.file.read_exact(&mut buf[..self.block_size])
    }
}

/// In-memory block device that counts reads and can inject failures
#[derive(Debug, Clone, Default)]
pub struct MemoryBlockDevice {
    data: Vec<u8>,
    first_block: u64,
    block_size: usize,
    reads: usize,
    read_log: Vec<u64>,
    failing: BTreeSet<u64>,
}

impl MemoryBlockDevice {
    /// Wraps raw bytes whose first block is absolute block `first_block`
    pub fn new(data: Vec<u8>, first_block: u64) -> Self {
        Self {
            data,
            first_block,
            block_size: BLOCK_SIZE,
            reads: 0,
            read_log: Vec::new(),
            failing: BTreeSet::new(),
        }
    }

    /// Packs `records` into pages starting at absolute block `first_block`
    pub fn from_records(first_block: u64, records: &[Record]) -> Result<Self> {
        Ok(Self::new(encode_blocks(records, BLOCK_SIZE)?, first_block))
    }

    /// Makes every later read of `block` fail
    pub fn fail_block(&mut self, block: u64) {
        self.failing.insert(block);
    }

    pub fn heal_block(&mut self, block: u64) {
        self.failing.remove(&block);
    }

    /// Number of read attempts, failed ones included
    pub fn reads(&self) -> usize {
        self.reads
    }

    /// Block numbers in the order they were read
    pub fn read_log(&self) -> &[u64] {
        &self.read_log
    }
}

impl BlockDevice for MemoryBlockDevice {
    fn block_size(&self) -> usize {
        self.block_size
    }

    fn read_block(&mut self, block: u64, buf: &mut [u8]) -> io::Result<()> {
        self.reads += 1;
        self.read_log.push(block);

        if self.failing.contains(&block) {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("injected failure reading block {block}"),
            ));
        }

        let start = block
            .checked_sub(self.first_block)
            .map(|relative| relative as usize * self.block_size)
            .filter(|start| start + self.block_size <= self.data.len())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("block {block} is outside the device"),
                )
            })?;
        buf[..self.block_size].copy_from_slice(&self.data[start..start + self.block_size]);
        Ok(())
    }
}
