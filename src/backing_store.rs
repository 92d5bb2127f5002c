//! Read-only secondary storage that pages are loaded from on a fault.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use log::trace;

use crate::constants::PAGE_SIZE;
use crate::error::{Result, VmError};

/// Random-access page source backed by any `Read + Seek` byte source
pub struct BackingStore<S = File> {
    source: S,

    /// size captured once when the store is opened
    len: u64,
}

impl BackingStore<File> {
    /// Open a backing store file read-only
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| VmError::OpenBackingStore {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(file)
    }
}

impl<S: Read + Seek> BackingStore<S> {
    pub fn new(mut source: S) -> Result<Self> {
        let len = source.seek(SeekFrom::End(0))?;
        Ok(BackingStore { source, len })
    }

    /// Size of the source in bytes
    #[inline]
    pub fn len(&self) -> u64 {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of complete pages the source holds
    #[inline]
    pub fn page_count(&self) -> usize {
        (self.len / PAGE_SIZE as u64) as usize
    }

    /// Fails with `BackingStoreTooSmall` unless the whole of `page` lies
    /// inside the source. Returns the page's starting byte offset.
    pub fn check_page(&self, page: usize) -> Result<u64> {
        let start = (page as u64).checked_mul(PAGE_SIZE as u64);
        let required = start.and_then(|s| s.checked_add(PAGE_SIZE as u64));

        match (start, required) {
            (Some(start), Some(required)) if required <= self.len => Ok(start),
            (_, required) => Err(VmError::BackingStoreTooSmall {
                page,
                required: required.unwrap_or(u64::MAX),
                available: self.len,
            }),
        }
    }

    /// Reads page `page` (bytes `[page * PAGE_SIZE, (page + 1) * PAGE_SIZE)`) into `dest`.
    pub fn read_page(&mut self, page: usize, dest: &mut [u8; PAGE_SIZE]) -> Result<()> {
        let start = self.check_page(page)?;

        trace!("loading page {} from backing store offset {}", page, start);
        self.source.seek(SeekFrom::Start(start))?;
        self.source.read_exact(dest)?;

        Ok(())
    }
}
